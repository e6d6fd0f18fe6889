//! Error types for the stria workspace.
//!
//! A single enum covers the four failure classes of the view and fatigue
//! layers. [`StriaError::kind`] folds the concrete variants onto those
//! classes so callers can branch without matching every variant.

use std::error::Error;
use std::fmt;

use crate::index::Index;

/// Coarse classification of a [`StriaError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad construction or configuration parameters.
    Configuration,
    /// An index or offset outside the valid position space.
    OutOfRange,
    /// NaN or an infinity where a finite real number is required.
    NumericInput,
    /// A cursor was moved before the first position.
    ArithmeticRange,
}

/// Errors from view construction, cursor arithmetic and fatigue evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum StriaError {
    /// Construction or configuration parameters are invalid.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
    /// A multi-index is outside the shape of the view.
    IndexOutOfRange {
        /// The offending index.
        index: Index,
        /// Shape of the view that rejected it.
        shape: Index,
    },
    /// A cursor was dereferenced at, stepped from, or advanced past the end.
    CursorOutOfRange {
        /// Row-major rank the operation would have reached.
        rank: usize,
        /// Number of positions in the view.
        len: usize,
    },
    /// A NaN was found where a real number is required.
    NanInput {
        /// Name of the offending input.
        what: &'static str,
        /// Position of the first NaN within the input, when it is a series.
        position: Option<usize>,
    },
    /// An infinity was found where a finite number is required.
    NonFinite {
        /// Name of the offending input.
        what: &'static str,
        /// Position of the first infinite value, when the input is a series.
        position: Option<usize>,
    },
    /// A cursor was moved before the first position.
    BeforeBegin {
        /// How many steps past the first position the move would have gone.
        steps: usize,
    },
}

impl StriaError {
    /// Shorthand for [`StriaError::InvalidConfig`].
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::IndexOutOfRange { .. } | Self::CursorOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::NanInput { .. } | Self::NonFinite { .. } => ErrorKind::NumericInput,
            Self::BeforeBegin { .. } => ErrorKind::ArithmeticRange,
        }
    }
}

impl fmt::Display for StriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            Self::IndexOutOfRange { index, shape } => {
                write!(
                    f,
                    "index {:?} out of range for shape {:?}",
                    index.as_slice(),
                    shape.as_slice()
                )
            }
            Self::CursorOutOfRange { rank, len } => {
                write!(f, "cursor rank {rank} out of range for {len} positions")
            }
            Self::NanInput { what, position } => {
                write!(f, "NaN in {what}")?;
                if let Some(p) = position {
                    write!(f, " at position {p}")?;
                }
                Ok(())
            }
            Self::NonFinite { what, position } => {
                write!(f, "non-finite value in {what}")?;
                if let Some(p) = position {
                    write!(f, " at position {p}")?;
                }
                Ok(())
            }
            Self::BeforeBegin { steps } => {
                write!(f, "cursor moved {steps} step(s) before the first position")
            }
        }
    }
}

impl Error for StriaError {}
