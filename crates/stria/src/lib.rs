//! Stria: strided array views and rainflow fatigue counting.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all stria sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use stria::prelude::*;
//!
//! // A load history stored as one column of a 2-channel buffer.
//! let buffer = [0.0, 2.0, 9.0, 5.0, 0.0, 1.0, 9.0, 6.0, 0.0, 0.0];
//! let history = StridedView::with_offset(&buffer, &[5], &[2], 1).unwrap();
//! assert_eq!(history.to_vec(), vec![2.0, 5.0, 1.0, 6.0, 0.0]);
//!
//! let mut counter = RainflowCounter::new(7).unwrap();
//! counter.set_stresses(&history).unwrap();
//! counter.set_mean_stress_correction(0.5).unwrap();
//! counter.set_sn_curve_parameters(1.0, 1.0, 1.0).unwrap();
//! let damage = counter.compute().unwrap();
//! assert!((damage - 8.0).abs() < 1e-12);
//! assert_eq!(counter.matrix().total(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stria-core` | Errors, `Index`, scalar helpers (`hunt`, `min_max`) |
//! | [`view`] | `stria-view` | Strided views, layouts, cursors, owned arrays |
//! | [`fatigue`] | `stria-fatigue` | Rainflow counter, damage, principal stresses, critical planes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Error taxonomy, inline index type and scalar helpers (`stria-core`).
pub use stria_core as types;

/// Strided views over borrowed buffers (`stria-view`).
///
/// [`view::StridedView`] and [`view::StridedViewMut`] address a flat buffer
/// through a [`view::Layout`]; [`view::ViewCursor`] walks it in row-major
/// order with random access.
pub use stria_view as view;

/// Rainflow counting and stress analysis (`stria-fatigue`).
///
/// [`fatigue::RainflowCounter`] computes Palmgren-Miner damage from a 1-D
/// stress view; [`fatigue::principal`] reduces 3×3 tensor series.
pub use stria_fatigue as fatigue;

/// Common imports for typical stria usage.
///
/// ```rust
/// use stria::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use stria_core::{ErrorKind, Index, StriaError};

    // Views
    pub use stria_view::{Layout, OwnedArray, StridedView, StridedViewMut, ViewCursor};

    // Fatigue
    pub use stria_fatigue::{
        critical_plane_damage, principal_stress_series, principal_stresses, scale_multiaxial,
        RainflowConfig, RainflowCounter, RainflowMatrix, RainflowMetrics, SnCurve,
    };
}
