//! A blob bound to the grid its indices address.
//!
//! Flat indices only mean something against one width and height: cell 30
//! is `(0, 3)` on a 10x10 grid but `(5, 1)` on a 25x4 one. The tracers take
//! a [`Selection`] rather than a bare [`Blob`] so a structure picked on one
//! grid is never followed through frames of another.

use spacetime_types::{Blob, GridDims};

use crate::component::extract_component;
use crate::error::{TraceError, check_within};

/// A blob and the grid it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    dims: GridDims,
    blob: Blob,
}

impl Selection {
    /// Bind `blob` to `dims`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::CellOutOfBounds`] if any index lies outside
    /// `dims`.
    pub fn new(dims: GridDims, blob: Blob) -> Result<Self, TraceError> {
        check_within(&blob, dims)?;
        Ok(Self { dims, blob })
    }

    /// The component under `seed` in `cells`, bound to `dims`.
    ///
    /// # Errors
    ///
    /// See [`extract_component`].
    pub fn extract(cells: &[i8], dims: GridDims, seed: usize) -> Result<Self, TraceError> {
        let blob = extract_component(cells, dims, seed)?;
        Ok(Self { dims, blob })
    }

    /// Grid the indices address.
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// The selected cells.
    pub const fn blob(&self) -> &Blob {
        &self.blob
    }

    /// Number of selected cells.
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Fail unless this selection addresses a grid equal to `dims`.
    pub(crate) fn check_grid(&self, dims: GridDims) -> Result<(), TraceError> {
        if self.dims == dims {
            Ok(())
        } else {
            Err(TraceError::DimsMismatch {
                expected: dims,
                actual: self.dims,
            })
        }
    }
}
