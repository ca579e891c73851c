//! Error types for the `spacetime-trace` crate.
//!
//! Tracing has no failure modes of its own: exhausted history, death,
//! explosion and the voxel cap are all normal outcomes. The variants here
//! report caller mistakes, where continuing would produce geometrically
//! meaningless traces.

use spacetime_types::GridDims;

/// Precondition violations detected by the tracers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// A cell buffer does not have one value per grid cell.
    #[error("cell buffer has {actual} cells but the {dims} grid needs {expected}")]
    BufferLength {
        /// Grid the buffer was checked against.
        dims: GridDims,
        /// Required number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// A selection taken on one grid was traced against another.
    #[error("selection addresses a {actual} grid but the trace runs on {expected}")]
    DimsMismatch {
        /// Grid of the history or simulation being traced.
        expected: GridDims,
        /// Grid the selection was taken from.
        actual: GridDims,
    },

    /// A seed or blob cell lies outside the grid being traced.
    #[error("cell index {index} is outside the {dims} grid")]
    CellOutOfBounds {
        /// The offending index.
        index: usize,
        /// Grid the index was checked against.
        dims: GridDims,
    },
}

/// Errors raised while handing a scene to an export sink.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Writing the document failed.
    #[error("failed to write scene: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the document failed.
    #[error("failed to serialize scene: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Check that `cells` has exactly one value per cell of `dims`.
pub(crate) const fn check_buffer(cells: &[i8], dims: GridDims) -> Result<(), TraceError> {
    let expected = dims.cell_count();
    if cells.len() == expected {
        Ok(())
    } else {
        Err(TraceError::BufferLength {
            dims,
            expected,
            actual: cells.len(),
        })
    }
}

/// Check that every index of `cells` lies inside `dims`.
pub(crate) fn check_within<'a>(
    cells: impl IntoIterator<Item = &'a usize>,
    dims: GridDims,
) -> Result<(), TraceError> {
    match cells.into_iter().find(|&&index| !dims.contains(index)) {
        Some(&index) => Err(TraceError::CellOutOfBounds { index, dims }),
        None => Ok(()),
    }
}
