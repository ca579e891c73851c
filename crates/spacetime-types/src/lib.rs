//! Shared type definitions for the Spacetime lineage tracer.
//!
//! This crate is the single source of truth for the values that flow
//! between the history store, the tracers, and the exporters. Types that
//! reach the web viewer are exported to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`grid`] -- Toroidal grid dimensions, flat indexing, Moore neighbors
//! - [`cell`] -- Tri-state cell interpretation of raw `i8` buffers
//! - [`blob`] -- Ordered sets of cell indices
//! - [`voxel`] -- Voxels, colors, and the assembled scene document
//! - [`ids`] -- Type-safe UUID wrappers for scenes and traces

pub mod blob;
pub mod cell;
pub mod grid;
pub mod ids;
pub mod voxel;

// Re-export all public types at crate root for convenience.
pub use blob::Blob;
pub use cell::{CellState, is_alive};
pub use grid::{GridDims, GridError};
pub use ids::{SceneId, TraceId};
pub use voxel::{Rgb, Voxel, VoxelScene};
