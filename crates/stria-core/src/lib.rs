//! Core types and helpers for the stria workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the error taxonomy shared by the view and fatigue crates, the inline
//! [`Index`] type used for multi-dimensional positions, and a handful of
//! scalar helpers (bracketing search, range scans, NaN checks).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod numeric;

pub use error::{ErrorKind, StriaError};
pub use index::{Index, MAX_NDIM};
