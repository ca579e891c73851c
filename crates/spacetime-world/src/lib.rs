//! Recorded history and the simulation interface for the Spacetime tracer.
//!
//! # Modules
//!
//! - [`history`] -- [`HistoryStore`], the bounded ring buffer of past grid
//!   states with absolute tick bookkeeping.
//! - [`simulation`] -- The [`Simulation`] trait the tracers consume.
//! - [`life`] -- [`LifeGrid`], a reference toroidal Game-of-Life engine.
//! - [`error`] -- Error types for recording and lattice construction.

pub mod error;
pub mod history;
pub mod life;
pub mod simulation;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use history::{HistoryStore, Snapshot};
pub use life::LifeGrid;
pub use simulation::Simulation;
