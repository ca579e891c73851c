//! Causal-history tracing for toroidal cellular automata.
//!
//! Given a blob (one connected component of live cells at "now"), this
//! crate reconstructs its ancestry from a [`HistoryStore`] and its
//! descendants by re-simulating a fork of the live [`Simulation`], then
//! assembles both into a colored voxel scene.
//!
//! # Modules
//!
//! - [`component`] -- Flood-fill extraction under wrapped Moore adjacency.
//! - [`selection`] -- Blobs bound to the grid their indices address.
//! - [`frontier`] -- Geometric halos used to restrict each search step.
//! - [`overlap`] -- The shared one-step lineage rule.
//! - [`backward`] -- Ancestry through recorded history.
//! - [`forward`] -- Descent through speculative re-simulation.
//! - [`assembly`] -- Voxel scene assembly with a hard voxel budget.
//! - [`scene`] -- Export sinks for assembled scenes.
//! - [`error`] -- Precondition and export errors.
//!
//! [`HistoryStore`]: spacetime_world::HistoryStore
//! [`Simulation`]: spacetime_world::Simulation

pub mod assembly;
pub mod backward;
pub mod component;
pub mod error;
pub mod forward;
pub mod frontier;
pub mod overlap;
pub mod scene;
pub mod selection;

// Re-export primary types at crate root.
pub use assembly::{AssemblyOptions, assemble};
pub use backward::{BackwardEnd, BackwardTrace, trace_backward};
pub use component::{extract_component, find_components};
pub use error::{SceneError, TraceError};
pub use forward::{ForwardEnd, ForwardOptions, ForwardTrace, trace_forward};
pub use frontier::{candidates, frontier};
pub use overlap::follow_overlap;
pub use scene::{CollectingSink, JsonSceneWriter, VoxelSink};
pub use selection::Selection;
