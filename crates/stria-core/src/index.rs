//! Inline multi-dimensional index type.

use smallvec::SmallVec;

/// Maximum number of dimensions a view may have.
pub const MAX_NDIM: usize = 8;

/// A per-dimension index tuple (or shape) stored inline.
///
/// Capacity equals [`MAX_NDIM`], so construction-validated indices never
/// spill to the heap and cursor arithmetic never allocates.
pub type Index = SmallVec<[usize; MAX_NDIM]>;

/// Product of all extents, or `None` on overflow.
pub fn checked_volume(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}
