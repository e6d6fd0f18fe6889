//! Contiguous owned arrays.

use stria_core::{Index, StriaError};

use crate::layout::Layout;
use crate::view::{StridedView, StridedViewMut};

/// A dense row-major array that owns its buffer.
///
/// The layout always satisfies [`Layout::is_contiguous`], so `as_slice`
/// returns elements in the same order a view iterates them.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedArray<T> {
    data: Vec<T>,
    layout: Layout,
}

impl<T> OwnedArray<T> {
    /// Take ownership of `data` as a row-major array of `shape`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the shape is invalid or `data.len()` differs from
    /// the shape's volume.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, StriaError> {
        let layout = Layout::contiguous(shape)?;
        if layout.len() != data.len() {
            return Err(StriaError::config(format!(
                "buffer holds {} elements, shape {shape:?} needs {}",
                data.len(),
                layout.len()
            )));
        }
        Ok(Self { data, layout })
    }

    /// Array of `shape` with every element set to `value`.
    pub fn filled(shape: &[usize], value: T) -> Result<Self, StriaError>
    where
        T: Clone,
    {
        let layout = Layout::contiguous(shape)?;
        Ok(Self {
            data: vec![value; layout.len()],
            layout,
        })
    }

    /// Per-axis extents.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: zero extents are rejected.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shared view over the whole array.
    pub fn view(&self) -> StridedView<'_, T> {
        StridedView::from_layout(&self.data, self.layout.clone())
    }

    /// Exclusive view over the whole array.
    pub fn view_mut(&mut self) -> StridedViewMut<'_, T> {
        StridedViewMut::from_layout(&mut self.data, self.layout.clone())
    }

    /// Element at `index`.
    pub fn get(&self, index: &[usize]) -> Result<&T, StriaError> {
        Ok(&self.data[self.layout.element_offset(index)?])
    }

    /// Row-major elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Give back the row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Multi-index of the `rank`-th element.
    pub fn index_of(&self, rank: usize) -> Option<Index> {
        self.layout.index_of_rank(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stria_core::ErrorKind;

    #[test]
    fn from_vec_checks_volume() {
        assert!(OwnedArray::from_vec(vec![0; 6], &[2, 3]).is_ok());
        let err = OwnedArray::from_vec(vec![0; 5], &[2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn filled_array_views() {
        let mut a = OwnedArray::filled(&[2, 2], 1.5).unwrap();
        a.view_mut().set(&[1, 0], 3.0).unwrap();
        assert_eq!(a.as_slice(), &[1.5, 1.5, 3.0, 1.5]);
        assert_eq!(*a.get(&[1, 0]).unwrap(), 3.0);
        assert_eq!(a.view().to_vec(), a.clone().into_vec());
    }

    #[test]
    fn index_of_rank() {
        let a = OwnedArray::filled(&[2, 3], 0u8).unwrap();
        assert_eq!(a.index_of(4).unwrap().as_slice(), &[1, 1]);
        assert!(a.index_of(6).is_none());
    }
}
