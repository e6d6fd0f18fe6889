//! Random-access row-major cursor over a [`Layout`].
//!
//! A [`ViewCursor`] is either at a valid position (an index tuple inside
//! the shape) or at the end sentinel, one past the last position. The last
//! axis moves fastest. All arithmetic works in place on the inline index
//! and never allocates.
//!
//! Sign convention: [`ViewCursor::distance_from`] is
//! `rank(self) - rank(other)` with `rank(end) = len`, so
//! `end - begin == len` and `begin - end == -len`. Moving before the first
//! position is an `ArithmeticRange` failure ([`StriaError::BeforeBegin`]);
//! moving past the end sentinel is an `OutOfRange` failure
//! ([`StriaError::CursorOutOfRange`]).

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;
use stria_core::{Index, StriaError};

use crate::layout::Layout;

/// Row-major cursor bound to one layout.
#[derive(Clone, Debug)]
pub struct ViewCursor<'l> {
    layout: &'l Layout,
    index: Index,
    at_end: bool,
}

impl<'l> ViewCursor<'l> {
    /// Cursor at the first position (all indices zero).
    pub fn begin(layout: &'l Layout) -> Self {
        Self {
            layout,
            index: SmallVec::from_elem(0, layout.ndim()),
            at_end: false,
        }
    }

    /// The end sentinel, one past the last position.
    pub fn end(layout: &'l Layout) -> Self {
        Self {
            layout,
            index: SmallVec::from_elem(0, layout.ndim()),
            at_end: true,
        }
    }

    /// Cursor at an explicit position.
    pub fn at(layout: &'l Layout, index: &[usize]) -> Result<Self, StriaError> {
        layout.check_index(index)?;
        Ok(Self {
            layout,
            index: SmallVec::from_slice(index),
            at_end: false,
        })
    }

    /// The layout this cursor walks.
    pub fn layout(&self) -> &'l Layout {
        self.layout
    }

    /// Current position, or `None` at the end sentinel.
    pub fn index(&self) -> Option<&[usize]> {
        if self.at_end {
            None
        } else {
            Some(&self.index)
        }
    }

    /// `true` at the end sentinel.
    pub fn is_end(&self) -> bool {
        self.at_end
    }

    /// Row-major rank of the position; `len` at the end sentinel.
    pub fn rank(&self) -> usize {
        if self.at_end {
            self.layout.len()
        } else {
            self.layout.rank_of(&self.index)
        }
    }

    /// Move one position forward. Overflowing axis 0 reaches the end sentinel.
    ///
    /// # Errors
    ///
    /// `CursorOutOfRange` when already at the end sentinel.
    pub fn step_forward(&mut self) -> Result<(), StriaError> {
        if self.at_end {
            return Err(StriaError::CursorOutOfRange {
                rank: self.layout.len() + 1,
                len: self.layout.len(),
            });
        }
        let shape = self.layout.shape();
        for axis in (0..shape.len()).rev() {
            self.index[axis] += 1;
            if self.index[axis] < shape[axis] {
                return Ok(());
            }
            self.index[axis] = 0;
        }
        self.at_end = true;
        Ok(())
    }

    /// Move one position back. From the end sentinel this reaches the last
    /// position.
    ///
    /// # Errors
    ///
    /// `BeforeBegin` at the first position; the cursor is left unchanged.
    pub fn step_back(&mut self) -> Result<(), StriaError> {
        let shape = self.layout.shape();
        if self.at_end {
            for (i, &d) in self.index.iter_mut().zip(shape.iter()) {
                *i = d - 1;
            }
            self.at_end = false;
            return Ok(());
        }
        if self.index.iter().all(|&i| i == 0) {
            return Err(StriaError::BeforeBegin { steps: 1 });
        }
        for axis in (0..shape.len()).rev() {
            if self.index[axis] > 0 {
                self.index[axis] -= 1;
                return Ok(());
            }
            self.index[axis] = shape[axis] - 1;
        }
        Ok(())
    }

    /// Move `n` positions forward, as `n` calls to [`step_forward`](Self::step_forward).
    ///
    /// `n` is split into per-axis digits through the index strides (most
    /// significant axis first), added component-wise, and carries are
    /// propagated from the last axis towards axis 0.
    ///
    /// # Errors
    ///
    /// `CursorOutOfRange` if the move would pass the end sentinel; the
    /// cursor is left unchanged.
    pub fn advance(&mut self, n: usize) -> Result<(), StriaError> {
        if n == 0 {
            return Ok(());
        }
        let len = self.layout.len();
        let rank = self.rank();
        if n > len - rank {
            return Err(StriaError::CursorOutOfRange {
                rank: rank.saturating_add(n),
                len,
            });
        }

        let shape = self.layout.shape();
        let weights = self.layout.index_strides();
        let mut rem = n;
        for (i, &w) in self.index.iter_mut().zip(weights.iter()) {
            *i += rem / w;
            rem %= w;
        }
        for axis in (1..shape.len()).rev() {
            if self.index[axis] >= shape[axis] {
                let carry = self.index[axis] / shape[axis];
                self.index[axis] %= shape[axis];
                self.index[axis - 1] += carry;
            }
        }
        if self.index[0] >= shape[0] {
            // Only reachable with rank + n == len.
            self.index.iter_mut().for_each(|i| *i = 0);
            self.at_end = true;
        }
        Ok(())
    }

    /// Move `n` positions back, as `n` calls to [`step_back`](Self::step_back).
    ///
    /// From the end sentinel the first step lands on the last position and
    /// the remaining `n - 1` are subtracted digit-wise with borrows.
    ///
    /// # Errors
    ///
    /// `BeforeBegin` if the move would go before the first position; the
    /// cursor is left unchanged.
    pub fn retreat(&mut self, n: usize) -> Result<(), StriaError> {
        if n == 0 {
            return Ok(());
        }
        let rank = self.rank();
        if n > rank {
            return Err(StriaError::BeforeBegin { steps: n - rank });
        }
        let mut n = n;
        if self.at_end {
            self.step_back()?;
            n -= 1;
            if n == 0 {
                return Ok(());
            }
        }

        let shape = self.layout.shape();
        let weights = self.layout.index_strides();
        let mut digits: Index = SmallVec::from_elem(0, shape.len());
        let mut rem = n;
        for (d, &w) in digits.iter_mut().zip(weights.iter()) {
            *d = rem / w;
            rem %= w;
        }
        let mut borrow = 0usize;
        for axis in (0..shape.len()).rev() {
            let take = digits[axis] + borrow;
            if self.index[axis] >= take {
                self.index[axis] -= take;
                borrow = 0;
            } else {
                // Axis 0 never borrows: n <= rank was checked above.
                self.index[axis] = self.index[axis] + shape[axis] - take;
                borrow = 1;
            }
        }
        Ok(())
    }

    /// A new cursor `n` positions away (negative `n` moves back).
    pub fn offset(&self, n: isize) -> Result<Self, StriaError> {
        let mut out = self.clone();
        if n >= 0 {
            out.advance(n.unsigned_abs())?;
        } else {
            out.retreat(n.unsigned_abs())?;
        }
        Ok(out)
    }

    /// Signed number of steps from `other` to `self`:
    /// `Σ (self[i] - other[i]) * index_strides[i]`, with the end sentinel
    /// counted as rank `len`.
    pub fn distance_from(&self, other: &ViewCursor<'_>) -> isize {
        self.rank() as isize - other.rank() as isize
    }

    fn same_layout(&self, other: &ViewCursor<'_>) -> bool {
        std::ptr::eq(self.layout, other.layout)
    }
}

impl PartialEq for ViewCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_layout(other)
            && self.at_end == other.at_end
            && (self.at_end || self.index == other.index)
    }
}

impl PartialOrd for ViewCursor<'_> {
    /// Lexicographic over positions, the end sentinel last. Cursors of
    /// different layouts are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_layout(other) {
            return None;
        }
        Some(match (self.at_end, other.at_end) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.index.cmp(&other.index),
        })
    }
}

impl fmt::Display for ViewCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at_end {
            return write!(f, "(end)");
        }
        write!(f, "(")?;
        for (k, i) in self.index.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, ")")
    }
}

/// Iterator over every position of a layout in row-major order.
#[derive(Clone, Debug)]
pub struct Positions<'l> {
    cursor: ViewCursor<'l>,
}

impl<'l> Positions<'l> {
    /// Positions of `layout`, starting at the first.
    pub fn new(layout: &'l Layout) -> Self {
        Self {
            cursor: ViewCursor::begin(layout),
        }
    }
}

impl Iterator for Positions<'_> {
    type Item = Index;

    fn next(&mut self) -> Option<Index> {
        let idx = self.cursor.index()?;
        let out = SmallVec::from_slice(idx);
        self.cursor.step_forward().ok()?;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cursor.layout.len() - self.cursor.rank();
        (left, Some(left))
    }
}

impl ExactSizeIterator for Positions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stria_core::ErrorKind;

    fn layout(shape: &[usize]) -> Layout {
        Layout::contiguous(shape).unwrap()
    }

    #[test]
    fn increment_carries_leftward() {
        let l = layout(&[2, 2, 3]);
        let mut c = ViewCursor::at(&l, &[0, 1, 2]).unwrap();
        c.step_forward().unwrap();
        assert_eq!(c.index(), Some(&[1, 0, 0][..]));
    }

    #[test]
    fn increment_past_last_reaches_end() {
        let l = layout(&[2, 3]);
        let mut c = ViewCursor::at(&l, &[1, 2]).unwrap();
        c.step_forward().unwrap();
        assert!(c.is_end());
        assert_eq!(c, ViewCursor::end(&l));
        let err = c.step_forward().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn decrement_at_begin_is_arithmetic_range() {
        let l = layout(&[2, 3]);
        let mut c = ViewCursor::begin(&l);
        let err = c.step_back().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArithmeticRange);
        assert_eq!(c, ViewCursor::begin(&l));
    }

    #[test]
    fn decrement_end_reaches_last() {
        let l = layout(&[2, 3, 4]);
        let mut c = ViewCursor::end(&l);
        c.step_back().unwrap();
        assert_eq!(c.index(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn decrement_borrows_leftward() {
        let l = layout(&[3, 3]);
        let mut c = ViewCursor::at(&l, &[2, 0]).unwrap();
        c.step_back().unwrap();
        assert_eq!(c.index(), Some(&[1, 2][..]));
    }

    #[test]
    fn end_minus_begin_is_len_and_converse_is_negative() {
        let l = layout(&[4, 5]);
        let b = ViewCursor::begin(&l);
        let e = ViewCursor::end(&l);
        assert_eq!(e.distance_from(&b), 20);
        assert_eq!(b.distance_from(&e), -20);
        assert_eq!(e.distance_from(&e), 0);
    }

    #[test]
    fn advance_lands_exactly_on_end() {
        let l = layout(&[3, 4]);
        let c = ViewCursor::begin(&l).offset(12).unwrap();
        assert!(c.is_end());
        let err = ViewCursor::begin(&l).offset(13).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn retreat_from_end_steps_back_first() {
        let l = layout(&[3, 4]);
        let c = ViewCursor::end(&l).offset(-1).unwrap();
        assert_eq!(c.index(), Some(&[2, 3][..]));
        let c = ViewCursor::end(&l).offset(-12).unwrap();
        assert_eq!(c, ViewCursor::begin(&l));
        let err = ViewCursor::end(&l).offset(-13).unwrap_err();
        assert_eq!(err, StriaError::BeforeBegin { steps: 1 });
    }

    #[test]
    fn failed_moves_leave_cursor_unchanged() {
        let l = layout(&[2, 2]);
        let mut c = ViewCursor::at(&l, &[1, 0]).unwrap();
        assert!(c.advance(3).is_err());
        assert_eq!(c.index(), Some(&[1, 0][..]));
        assert!(c.retreat(3).is_err());
        assert_eq!(c.index(), Some(&[1, 0][..]));
    }

    #[test]
    fn ordering_is_lexicographic_with_end_last() {
        let l = layout(&[2, 3]);
        let a = ViewCursor::at(&l, &[0, 2]).unwrap();
        let b = ViewCursor::at(&l, &[1, 0]).unwrap();
        assert!(a < b);
        assert!(b > a);
        assert!(b < ViewCursor::end(&l));
        assert!(!(a < a.clone()));
    }

    #[test]
    fn cursors_of_different_layouts_never_equal() {
        let l1 = layout(&[2, 3]);
        let l2 = layout(&[2, 3]);
        assert_ne!(ViewCursor::begin(&l1), ViewCursor::begin(&l2));
        assert_ne!(ViewCursor::end(&l1), ViewCursor::end(&l2));
        assert_eq!(
            ViewCursor::begin(&l1).partial_cmp(&ViewCursor::begin(&l2)),
            None
        );
    }

    #[test]
    fn display_formats_position() {
        let l = layout(&[2, 3]);
        assert_eq!(ViewCursor::at(&l, &[1, 2]).unwrap().to_string(), "(1, 2)");
        assert_eq!(ViewCursor::end(&l).to_string(), "(end)");
    }

    #[test]
    fn positions_visit_row_major_order() {
        let l = layout(&[2, 2]);
        let all: Vec<Vec<usize>> = Positions::new(&l).map(|i| i.to_vec()).collect();
        assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(Positions::new(&l).len(), 4);
    }

    fn arb_shape() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..5, 1..5)
    }

    proptest! {
        #[test]
        fn advance_equals_repeated_increments(shape in arb_shape(), pick in 0usize..1024) {
            let l = layout(&shape);
            let n = pick % (l.len() + 1);
            let jumped = ViewCursor::begin(&l).offset(n as isize).unwrap();
            let mut walked = ViewCursor::begin(&l);
            for _ in 0..n {
                walked.step_forward().unwrap();
            }
            prop_assert_eq!(&jumped, &walked);
            prop_assert_eq!(jumped.distance_from(&ViewCursor::begin(&l)), n as isize);
        }

        #[test]
        fn advance_from_any_start(shape in arb_shape(), a in 0usize..1024, b in 0usize..1024) {
            let l = layout(&shape);
            let start = a % l.len();
            let n = b % (l.len() - start + 1);
            let from = ViewCursor::begin(&l).offset(start as isize).unwrap();
            let jumped = from.offset(n as isize).unwrap();
            let mut walked = from.clone();
            for _ in 0..n {
                walked.step_forward().unwrap();
            }
            prop_assert_eq!(&jumped, &walked);
            prop_assert_eq!(jumped.distance_from(&from), n as isize);
        }

        #[test]
        fn retreat_equals_repeated_decrements(shape in arb_shape(), a in 0usize..1024, b in 0usize..1024) {
            let l = layout(&shape);
            let start = a % (l.len() + 1);
            let n = b % (start + 1);
            let from = ViewCursor::begin(&l).offset(start as isize).unwrap();
            let jumped = from.offset(-(n as isize)).unwrap();
            let mut walked = from.clone();
            for _ in 0..n {
                walked.step_back().unwrap();
            }
            prop_assert_eq!(&jumped, &walked);
            prop_assert_eq!(from.distance_from(&jumped), n as isize);
        }

        #[test]
        fn decrement_undoes_increment(shape in arb_shape(), a in 0usize..1024) {
            let l = layout(&shape);
            let p = ViewCursor::begin(&l).offset((a % l.len()) as isize).unwrap();
            let mut q = p.clone();
            q.step_forward().unwrap();
            q.step_back().unwrap();
            prop_assert_eq!(p, q);
        }

        #[test]
        fn ordering_agrees_with_distance(shape in arb_shape(), a in 0usize..1024, b in 0usize..1024) {
            let l = layout(&shape);
            let x = ViewCursor::begin(&l).offset((a % (l.len() + 1)) as isize).unwrap();
            let y = ViewCursor::begin(&l).offset((b % (l.len() + 1)) as isize).unwrap();
            let d = x.distance_from(&y);
            prop_assert_eq!(x.partial_cmp(&y), Some(d.cmp(&0)));
        }
    }
}
