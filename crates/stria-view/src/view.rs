//! Shared and exclusive strided views over borrowed buffers.

use std::fmt;

use stria_core::StriaError;

use crate::cursor::{Positions, ViewCursor};
use crate::layout::{row_major_strides, Layout};
use crate::owned::OwnedArray;

fn foreign_cursor(cursor: &ViewCursor<'_>) -> StriaError {
    StriaError::config(format!(
        "cursor {cursor} does not belong to a view with this layout"
    ))
}

fn end_cursor(layout: &Layout) -> StriaError {
    StriaError::CursorOutOfRange {
        rank: layout.len(),
        len: layout.len(),
    }
}

fn short_buffer(what: &str, have: usize, need: usize) -> StriaError {
    StriaError::config(format!(
        "{what} holds {have} elements, view has {need} positions"
    ))
}

/// Buffer offset of the element a cursor points at.
fn cursor_offset(layout: &Layout, cursor: &ViewCursor<'_>) -> Result<usize, StriaError> {
    if cursor.layout() != layout {
        return Err(foreign_cursor(cursor));
    }
    let index = cursor.index().ok_or_else(|| end_cursor(layout))?;
    Ok(layout.offset_of(index))
}

// ── StridedView ─────────────────────────────────────────────────────

/// A read-only strided view over a borrowed buffer.
///
/// The view never owns, allocates or frees the buffer; `'a` ties it to the
/// caller's storage. Cloning a view is cheap (the buffer is shared, only
/// the inline layout is copied).
pub struct StridedView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            layout: self.layout.clone(),
        }
    }
}

impl<T> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedView")
            .field("shape", &self.layout.shape())
            .field("strides", &self.layout.strides())
            .field("offset", &self.layout.offset())
            .finish()
    }
}

impl<'a, T> StridedView<'a, T> {
    /// View `data` through explicit per-axis element strides.
    pub fn new(data: &'a [T], shape: &[usize], strides: &[isize]) -> Result<Self, StriaError> {
        Self::with_offset(data, shape, strides, 0)
    }

    /// View `data` through explicit strides, starting at element `offset`.
    pub fn with_offset(
        data: &'a [T],
        shape: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self, StriaError> {
        let layout = Layout::new(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    /// Row-major dense view of the leading `volume(shape)` elements of `data`.
    pub fn contiguous(data: &'a [T], shape: &[usize]) -> Result<Self, StriaError> {
        Self::new(data, shape, &row_major_strides(shape))
    }

    /// One-dimensional dense view of the whole buffer.
    pub fn from_slice(data: &'a [T]) -> Result<Self, StriaError> {
        Self::contiguous(data, &[data.len()])
    }

    pub(crate) fn from_layout(data: &'a [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// The addressing scheme of this view.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Per-axis element strides.
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of addressable elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Always `false`: construction rejects zero extents.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Buffer offset of `index`.
    pub fn element_offset(&self, index: &[usize]) -> Result<usize, StriaError> {
        self.layout.element_offset(index)
    }

    /// Element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<&'a T, StriaError> {
        let data = self.data;
        Ok(&data[self.layout.element_offset(index)?])
    }

    /// Cursor at the first position.
    pub fn begin(&self) -> ViewCursor<'_> {
        ViewCursor::begin(&self.layout)
    }

    /// The end sentinel.
    pub fn end(&self) -> ViewCursor<'_> {
        ViewCursor::end(&self.layout)
    }

    /// Element a cursor points at.
    ///
    /// # Errors
    ///
    /// `CursorOutOfRange` at the end sentinel; `InvalidConfig` for a cursor
    /// over a different layout.
    pub fn value_at(&self, cursor: &ViewCursor<'_>) -> Result<&'a T, StriaError> {
        let data = self.data;
        Ok(&data[cursor_offset(&self.layout, cursor)?])
    }

    /// Elements in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            data: self.data,
            cursor: ViewCursor::begin(&self.layout),
        }
    }

    /// Multi-indices of every position, in row-major order.
    pub fn positions(&self) -> Positions<'_> {
        Positions::new(&self.layout)
    }

    /// Copy all elements, in row-major order, into the front of `dest`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `dest` is shorter than the view.
    pub fn copy_to(&self, dest: &mut [T]) -> Result<(), StriaError>
    where
        T: Copy,
    {
        if dest.len() < self.len() {
            return Err(short_buffer("destination", dest.len(), self.len()));
        }
        for (slot, v) in dest.iter_mut().zip(self.iter()) {
            *slot = *v;
        }
        Ok(())
    }

    /// Row-major elements as a fresh vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Dense owned copy with the same shape.
    pub fn to_owned_array(&self) -> Result<OwnedArray<T>, StriaError>
    where
        T: Clone,
    {
        OwnedArray::from_vec(self.to_vec(), self.layout.shape())
    }

    /// View with `axis` fixed at `index`, sharing this view's buffer.
    ///
    /// For a `[time, 3, 3]` stress series, `subview(0, t)` is the 3×3
    /// tensor at time `t`.
    pub fn subview(&self, axis: usize, index: usize) -> Result<StridedView<'a, T>, StriaError> {
        let layout = self.layout.select(axis, index, self.data.len())?;
        Ok(StridedView {
            data: self.data,
            layout,
        })
    }
}

impl<'v, T> IntoIterator for &'v StridedView<'_, T> {
    type Item = &'v T;
    type IntoIter = Iter<'v, T>;

    fn into_iter(self) -> Iter<'v, T> {
        self.iter()
    }
}

/// Row-major iterator over the elements of a view.
pub struct Iter<'v, T> {
    data: &'v [T],
    cursor: ViewCursor<'v>,
}

impl<'v, T> Iterator for Iter<'v, T> {
    type Item = &'v T;

    fn next(&mut self) -> Option<&'v T> {
        let offset = self.cursor.layout().offset_of(self.cursor.index()?);
        self.cursor.step_forward().ok()?;
        Some(&self.data[offset])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cursor.layout().len() - self.cursor.rank();
        (left, Some(left))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// ── StridedViewMut ──────────────────────────────────────────────────

/// An exclusive strided view over a mutably borrowed buffer.
pub struct StridedViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<T> fmt::Debug for StridedViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedViewMut")
            .field("shape", &self.layout.shape())
            .field("strides", &self.layout.strides())
            .field("offset", &self.layout.offset())
            .finish()
    }
}

impl<'a, T> StridedViewMut<'a, T> {
    /// Mutable view of `data` through explicit per-axis element strides.
    pub fn new(data: &'a mut [T], shape: &[usize], strides: &[isize]) -> Result<Self, StriaError> {
        Self::with_offset(data, shape, strides, 0)
    }

    /// Mutable view through explicit strides, starting at element `offset`.
    pub fn with_offset(
        data: &'a mut [T],
        shape: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self, StriaError> {
        let layout = Layout::new(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    /// Row-major dense mutable view.
    pub fn contiguous(data: &'a mut [T], shape: &[usize]) -> Result<Self, StriaError> {
        Self::new(data, shape, &row_major_strides(shape))
    }

    /// One-dimensional dense mutable view of the whole buffer.
    pub fn from_slice(data: &'a mut [T]) -> Result<Self, StriaError> {
        let len = data.len();
        Self::contiguous(data, &[len])
    }

    pub(crate) fn from_layout(data: &'a mut [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// The addressing scheme of this view.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Number of addressable elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Always `false`: construction rejects zero extents.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Per-axis element strides.
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Buffer offset of `index`.
    pub fn element_offset(&self, index: &[usize]) -> Result<usize, StriaError> {
        self.layout.element_offset(index)
    }

    /// Cursor at the first position.
    ///
    /// The cursor borrows this view, so mutating through a cursor needs
    /// one built over a clone of [`layout`](Self::layout) instead.
    pub fn begin(&self) -> ViewCursor<'_> {
        ViewCursor::begin(&self.layout)
    }

    /// The end sentinel.
    pub fn end(&self) -> ViewCursor<'_> {
        ViewCursor::end(&self.layout)
    }

    /// Read-only view over the same elements.
    pub fn as_view(&self) -> StridedView<'_, T> {
        StridedView {
            data: &*self.data,
            layout: self.layout.clone(),
        }
    }

    /// Element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<&T, StriaError> {
        Ok(&self.data[self.layout.element_offset(index)?])
    }

    /// Mutable element at `index`.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T, StriaError> {
        let offset = self.layout.element_offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<(), StriaError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Element a cursor points at. The cursor may come from any layout equal
    /// to this view's, e.g. one obtained through [`as_view`](Self::as_view).
    pub fn value_at(&self, cursor: &ViewCursor<'_>) -> Result<&T, StriaError> {
        Ok(&self.data[cursor_offset(&self.layout, cursor)?])
    }

    /// Mutable element a cursor points at.
    pub fn value_at_mut(&mut self, cursor: &ViewCursor<'_>) -> Result<&mut T, StriaError> {
        let offset = cursor_offset(&self.layout, cursor)?;
        Ok(&mut self.data[offset])
    }

    /// Apply `f` to every element in row-major order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        let layout = &self.layout;
        let data = &mut *self.data;
        let mut cursor = ViewCursor::begin(layout);
        while let Some(index) = cursor.index() {
            f(&mut data[layout.offset_of(index)]);
            if cursor.step_forward().is_err() {
                break;
            }
        }
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|slot| *slot = value.clone());
    }

    /// Copy the front of `source`, in row-major order, into the view.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `source` is shorter than the view.
    pub fn copy_from(&mut self, source: &[T]) -> Result<(), StriaError>
    where
        T: Copy,
    {
        if source.len() < self.len() {
            return Err(short_buffer("source", source.len(), self.len()));
        }
        let mut values = source.iter();
        self.for_each_mut(|slot| {
            if let Some(v) = values.next() {
                *slot = *v;
            }
        });
        Ok(())
    }

    /// Copy all elements, in row-major order, into the front of `dest`.
    pub fn copy_to(&self, dest: &mut [T]) -> Result<(), StriaError>
    where
        T: Copy,
    {
        self.as_view().copy_to(dest)
    }

    /// Mutable view with `axis` fixed at `index`, reborrowing this view.
    pub fn subview_mut(
        &mut self,
        axis: usize,
        index: usize,
    ) -> Result<StridedViewMut<'_, T>, StriaError> {
        let layout = self.layout.select(axis, index, self.data.len())?;
        Ok(StridedViewMut {
            data: &mut *self.data,
            layout,
        })
    }
}
