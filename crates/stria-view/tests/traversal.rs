//! Integration test: full traversals of strided views.
//!
//! Iteration, cursor dereference and indexed access must agree on every
//! position, for dense, transposed, padded and negative-stride layouts.

use proptest::prelude::*;
use stria_core::ErrorKind;
use stria_view::{Layout, OwnedArray, StridedView, StridedViewMut, ViewCursor};

fn buffer(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

// ── Fixed layouts ───────────────────────────────────────────────────

#[test]
fn padded_rows_skip_padding() {
    // 3 rows of 4 values, each row padded to 6 slots.
    let buf = buffer(18);
    let v = StridedView::new(&buf, &[3, 4], &[6, 1]).unwrap();
    assert_eq!(
        v.to_vec(),
        vec![0, 1, 2, 3, 6, 7, 8, 9, 12, 13, 14, 15]
    );
    assert!(!v.layout().is_contiguous());
}

#[test]
fn negative_stride_reverses_axis() {
    let buf = buffer(5);
    let rev = StridedView::with_offset(&buf, &[5], &[-1], 4).unwrap();
    assert_eq!(rev.to_vec(), vec![4, 3, 2, 1, 0]);
    assert_eq!(*rev.get(&[0]).unwrap(), 4);
}

#[test]
fn zero_stride_broadcasts() {
    let buf = [7];
    let v = StridedView::new(&buf, &[3, 2], &[0, 0]).unwrap();
    assert!(v.iter().all(|&x| x == 7));
    assert_eq!(v.len(), 6);
}

#[test]
fn span_past_buffer_is_rejected() {
    let buf = buffer(10);
    let err = StridedView::new(&buf, &[3, 4], &[4, 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    let err = StridedView::with_offset(&buf, &[4], &[-1], 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn cursor_walk_from_end_back_to_begin() {
    let buf = buffer(12);
    let v = StridedView::new(&buf, &[2, 3], &[6, 2]).unwrap();
    let mut c = v.end();
    let mut seen = Vec::new();
    while c != v.begin() {
        c.step_back().unwrap();
        seen.push(*v.value_at(&c).unwrap());
    }
    seen.reverse();
    assert_eq!(seen, v.to_vec());
    assert_eq!(c.step_back().unwrap_err().kind(), ErrorKind::ArithmeticRange);
}

#[test]
fn stress_series_copy_round_trip() {
    // 4 tensors of 3x3, stored time-last.
    let mut store = vec![0.0_f64; 36];
    let source: Vec<f64> = (0..36).map(|i| i as f64 * 0.5).collect();
    {
        let mut m = StridedViewMut::new(&mut store, &[4, 3, 3], &[1, 12, 4]).unwrap();
        m.copy_from(&source).unwrap();
        assert_eq!(*m.get(&[1, 0, 0]).unwrap(), 4.5);
    }
    let v = StridedView::new(&store, &[4, 3, 3], &[1, 12, 4]).unwrap();
    let mut out = vec![0.0; 36];
    v.copy_to(&mut out).unwrap();
    assert_eq!(out, source);
    let t2 = v.subview(0, 2).unwrap();
    assert_eq!(*t2.get(&[0, 1]).unwrap(), source[2 * 9 + 1]);
}

#[test]
fn owned_array_matches_view_traversal() {
    let buf = buffer(12);
    let t = StridedView::new(&buf, &[4, 3], &[1, 4]).unwrap();
    let owned: OwnedArray<i64> = t.to_owned_array().unwrap();
    for index in t.positions() {
        assert_eq!(owned.get(&index).unwrap(), t.get(&index).unwrap());
    }
}

// ── Properties ──────────────────────────────────────────────────────

/// Shape plus strides that keep every position inside a buffer of the
/// returned length.
fn arb_layout() -> impl Strategy<Value = (Vec<usize>, Vec<isize>, usize, usize)> {
    prop::collection::vec((1usize..=4, -3isize..=3), 1..=4).prop_map(|axes| {
        let shape: Vec<usize> = axes.iter().map(|&(n, _)| n).collect();
        let strides: Vec<isize> = axes.iter().map(|&(_, s)| s).collect();
        let mut neg = 0usize;
        let mut pos = 0usize;
        for (&n, &s) in shape.iter().zip(&strides) {
            let reach = (n - 1) * s.unsigned_abs();
            if s < 0 {
                neg += reach;
            } else {
                pos += reach;
            }
        }
        (shape, strides, neg, neg + pos + 1)
    })
}

proptest! {
    #[test]
    fn iteration_agrees_with_get((shape, strides, offset, len) in arb_layout()) {
        let buf = buffer(len);
        let v = StridedView::with_offset(&buf, &shape, &strides, offset).unwrap();
        let by_iter: Vec<i64> = v.iter().copied().collect();
        let by_get: Vec<i64> = v.positions().map(|i| *v.get(&i).unwrap()).collect();
        prop_assert_eq!(by_iter.len(), v.len());
        prop_assert_eq!(by_iter, by_get);
    }

    #[test]
    fn begin_plus_len_is_end((shape, strides, offset, len) in arb_layout()) {
        let buf = buffer(len);
        let v = StridedView::with_offset(&buf, &shape, &strides, offset).unwrap();
        let n = v.len() as isize;
        prop_assert_eq!(v.begin().offset(n).unwrap(), v.end());
        prop_assert_eq!(v.end().offset(-n).unwrap(), v.begin());
        prop_assert!(v.begin().offset(n + 1).is_err());
        prop_assert!(v.end().offset(-n - 1).is_err());
    }

    #[test]
    fn distance_inverts_offset(
        (shape, strides, offset, len) in arb_layout(),
        a in 0usize..256,
        b in 0usize..256,
    ) {
        let buf = buffer(len);
        let v = StridedView::with_offset(&buf, &shape, &strides, offset).unwrap();
        let a = (a % (v.len() + 1)) as isize;
        let b = (b % (v.len() + 1)) as isize;
        let ca = v.begin().offset(a).unwrap();
        let cb = ca.offset(b - a).unwrap();
        prop_assert_eq!(cb.distance_from(&ca), b - a);
        prop_assert_eq!(cb.rank() as isize, b);
    }

    #[test]
    fn layout_rank_round_trip(shape in prop::collection::vec(1usize..=5, 1..=5)) {
        let l = Layout::contiguous(&shape).unwrap();
        for rank in 0..l.len() {
            let index = l.index_of_rank(rank).unwrap();
            prop_assert_eq!(l.rank_of(&index), rank);
            prop_assert_eq!(l.element_offset(&index).unwrap(), rank);
            let c = ViewCursor::at(&l, &index).unwrap();
            prop_assert_eq!(c.rank(), rank);
        }
    }
}
