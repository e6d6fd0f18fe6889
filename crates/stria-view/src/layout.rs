//! Shape, stride and offset bookkeeping shared by all view types.

use smallvec::SmallVec;
use stria_core::index::checked_volume;
use stria_core::{Index, StriaError, MAX_NDIM};

/// Per-axis element strides, stored inline.
pub type Strides = SmallVec<[isize; MAX_NDIM]>;

/// Addressing scheme of a strided view.
///
/// Immutable after construction. Besides the caller-supplied shape,
/// strides and base offset, a layout carries the derived *index strides*
/// (`index_strides[last] = 1`, `index_strides[i] = index_strides[i + 1] * shape[i + 1]`),
/// which convert a row-major rank into a multi-index and back.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    shape: Index,
    strides: Strides,
    index_strides: Index,
    offset: usize,
    len: usize,
}

impl Layout {
    /// Build a layout and check that every reachable element lies inside a
    /// buffer of `buffer_len` elements.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `shape` is empty or longer than [`MAX_NDIM`],
    /// `shape` and `strides` differ in length, an extent is zero, or the
    /// reachable offset range leaves `[0, buffer_len)`.
    pub fn new(
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        buffer_len: usize,
    ) -> Result<Self, StriaError> {
        let ndim = shape.len();
        if ndim == 0 {
            return Err(StriaError::config("a view needs at least one dimension"));
        }
        if ndim > MAX_NDIM {
            return Err(StriaError::config(format!(
                "{ndim} dimensions requested, at most {MAX_NDIM} supported"
            )));
        }
        if strides.len() != ndim {
            return Err(StriaError::config(format!(
                "shape has {ndim} dimensions but {} strides were given",
                strides.len()
            )));
        }
        if let Some(axis) = shape.iter().position(|&d| d == 0) {
            return Err(StriaError::config(format!("extent of axis {axis} is zero")));
        }
        let len = checked_volume(shape)
            .ok_or_else(|| StriaError::config(format!("shape {shape:?} overflows usize")))?;

        let (lo, hi) = reachable_span(shape, strides, offset)?;
        if lo < 0 || hi < 0 || hi as usize >= buffer_len {
            return Err(StriaError::config(format!(
                "shape {shape:?} with strides {strides:?} and offset {offset} reaches \
                 elements [{lo}, {hi}] outside a buffer of {buffer_len}"
            )));
        }

        let mut index_strides: Index = SmallVec::from_elem(1, ndim);
        for i in (0..ndim - 1).rev() {
            index_strides[i] = index_strides[i + 1] * shape[i + 1];
        }

        Ok(Self {
            shape: SmallVec::from_slice(shape),
            strides: SmallVec::from_slice(strides),
            index_strides,
            offset,
            len,
        })
    }

    /// Row-major layout over a buffer holding exactly the shape's volume.
    pub fn contiguous(shape: &[usize]) -> Result<Self, StriaError> {
        let len = checked_volume(shape)
            .ok_or_else(|| StriaError::config(format!("shape {shape:?} overflows usize")))?;
        Self::new(shape, &row_major_strides(shape), 0, len)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of addressable positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: construction rejects zero extents.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-axis element strides.
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Per-axis rank strides (row-major weights of each index component).
    pub fn index_strides(&self) -> &[usize] {
        &self.index_strides
    }

    /// Base element offset into the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `true` if the layout walks the buffer densely in row-major order.
    pub fn is_contiguous(&self) -> bool {
        self.strides
            .iter()
            .zip(self.index_strides.iter())
            .all(|(&s, &is)| s == is as isize)
    }

    /// Check that `index` has the right rank and lies inside the shape.
    pub fn check_index(&self, index: &[usize]) -> Result<(), StriaError> {
        if index.len() != self.ndim() || index.iter().zip(self.shape.iter()).any(|(i, d)| i >= d)
        {
            return Err(StriaError::IndexOutOfRange {
                index: SmallVec::from_slice(&index[..index.len().min(MAX_NDIM)]),
                shape: self.shape.clone(),
            });
        }
        Ok(())
    }

    /// Buffer offset of `index`: `offset + Σ strides[i] * index[i]`.
    pub fn element_offset(&self, index: &[usize]) -> Result<usize, StriaError> {
        self.check_index(index)?;
        Ok(self.offset_of(index))
    }

    /// Buffer offset of an index already known to be in range.
    pub(crate) fn offset_of(&self, index: &[usize]) -> usize {
        let delta: isize = index
            .iter()
            .zip(self.strides.iter())
            .map(|(&i, &s)| i as isize * s)
            .sum();
        // In range by construction: `new` bounded every reachable offset.
        (self.offset as isize + delta) as usize
    }

    /// Row-major rank of an in-range index.
    pub fn rank_of(&self, index: &[usize]) -> usize {
        index
            .iter()
            .zip(self.index_strides.iter())
            .map(|(&i, &w)| i * w)
            .sum()
    }

    /// Multi-index of a row-major rank, or `None` if `rank >= len`.
    pub fn index_of_rank(&self, rank: usize) -> Option<Index> {
        if rank >= self.len {
            return None;
        }
        let mut rem = rank;
        Some(
            self.index_strides
                .iter()
                .map(|&w| {
                    let q = rem / w;
                    rem %= w;
                    q
                })
                .collect(),
        )
    }

    /// Layout obtained by fixing `axis` at `index` and dropping that axis.
    ///
    /// The result addresses the same buffer (of `buffer_len` elements).
    pub fn select(&self, axis: usize, index: usize, buffer_len: usize) -> Result<Self, StriaError> {
        if self.ndim() < 2 {
            return Err(StriaError::config(
                "cannot drop the only axis of a one-dimensional view",
            ));
        }
        if axis >= self.ndim() {
            return Err(StriaError::config(format!(
                "axis {axis} out of range for {} dimensions",
                self.ndim()
            )));
        }
        if index >= self.shape[axis] {
            let mut offending: Index = SmallVec::from_elem(0, self.ndim());
            offending[axis] = index;
            return Err(StriaError::IndexOutOfRange {
                index: offending,
                shape: self.shape.clone(),
            });
        }
        let base = self.offset as isize + self.strides[axis] * index as isize;
        let shape: Index = self
            .shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &d)| d)
            .collect();
        let strides: Strides = self
            .strides
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &s)| s)
            .collect();
        Self::new(&shape, &strides, base as usize, buffer_len)
    }
}

/// Row-major (last axis fastest) strides for a dense buffer.
pub fn row_major_strides(shape: &[usize]) -> Strides {
    let mut strides: Strides = SmallVec::from_elem(1, shape.len());
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

/// Smallest and largest element offset reachable through the layout.
fn reachable_span(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<(isize, isize), StriaError> {
    let overflow = || StriaError::config("stride arithmetic overflows isize");
    let base = isize::try_from(offset).map_err(|_| overflow())?;
    let mut lo = base;
    let mut hi = base;
    for (&d, &s) in shape.iter().zip(strides.iter()) {
        let extent = isize::try_from(d - 1).map_err(|_| overflow())?;
        let reach = s.checked_mul(extent).ok_or_else(overflow)?;
        if reach >= 0 {
            hi = hi.checked_add(reach).ok_or_else(overflow)?;
        } else {
            lo = lo.checked_add(reach).ok_or_else(overflow)?;
        }
    }
    Ok((lo, hi))
}
