//! Strided multi-dimensional views over externally owned buffers.
//!
//! A view pairs a borrowed flat buffer with a [`Layout`] (shape, per-axis
//! element strides, base offset). Nothing is copied or allocated: the
//! view only translates multi-indices into buffer offsets, with bounds
//! checks on every access.
//!
//! # Types
//!
//! - [`StridedView`]: shared, read-only view over `&[T]`
//! - [`StridedViewMut`]: exclusive view over `&mut [T]`
//! - [`ViewCursor`]: random-access row-major cursor (last axis fastest)
//! - [`OwnedArray`]: contiguous owned array, for callers that need a
//!   private copy of what a view exposes
//!
//! # Cursor arithmetic
//!
//! Offsets added to or subtracted from a cursor are decomposed through
//! the layout's index strides, so `begin + n` always lands on the same
//! position as `n` single steps, and `(begin + n) - begin == n`.
//!
//! ```
//! use stria_view::StridedView;
//!
//! // Every other element of a 2x6 buffer, seen as 2x3.
//! let buf = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0];
//! let view = StridedView::new(&buf, &[2, 3], &[6, 2]).unwrap();
//! assert_eq!(*view.get(&[1, 2]).unwrap(), 10.0);
//!
//! let c = view.begin().offset(4).unwrap();
//! assert_eq!(c.index(), Some(&[1, 1][..]));
//! assert_eq!(c.distance_from(&view.begin()), 4);
//! assert_eq!(view.end().distance_from(&view.begin()), 6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod layout;
pub mod owned;
pub mod view;

pub use cursor::{Positions, ViewCursor};
pub use layout::{Layout, Strides};
pub use owned::OwnedArray;
pub use view::{Iter, StridedView, StridedViewMut};
