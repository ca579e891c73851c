//! Error types for the `spacetime-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`]. Running out
//! of recorded history is not an error; it is reported as `None`.

use spacetime_types::{GridDims, GridError};

/// Errors that can occur while recording or building lattices.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// A history store was requested with room for zero snapshots.
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    /// A frame from a differently shaped grid was offered to a store.
    #[error("frame from a {actual} grid offered to a {expected} store")]
    DimsMismatch {
        /// Grid the store records.
        expected: GridDims,
        /// Grid the frame came from.
        actual: GridDims,
    },

    /// A cell buffer does not match the grid it is recorded against.
    #[error("cell buffer has {actual} cells but the {dims} grid needs {expected}")]
    BufferLength {
        /// Grid the buffer was checked against.
        dims: GridDims,
        /// Required number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// An initial density outside `[0, 1]` was requested.
    #[error("initial density {density} is outside [0, 1]")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },

    /// Grid construction or addressing failed.
    #[error(transparent)]
    Grid(#[from] GridError),
}
