//! The simulation engine interface consumed by the tracers.
//!
//! The engine is the sole mutator of its lattice. Tracing code only ever
//! reads the current buffer through [`Simulation::cells`], and forward
//! speculation happens on an independent copy obtained from
//! [`Simulation::fork`] so the simulation being displayed is never stepped
//! behind the viewer's back.

use spacetime_types::GridDims;

/// A steppable cellular automaton on a toroidal grid.
pub trait Simulation {
    /// Grid dimensions. Must agree with the length of [`cells`](Self::cells).
    fn dims(&self) -> GridDims;

    /// Current lattice, one tri-state value per cell, row-major.
    fn cells(&self) -> &[i8];

    /// Advance the lattice by one step.
    fn tick(&mut self);

    /// Number of steps taken since construction.
    fn generation(&self) -> u64;

    /// Snapshot-and-fork: an independently owned copy that can be stepped
    /// without affecting `self`.
    #[must_use]
    fn fork(&self) -> Self
    where
        Self: Sized;
}
