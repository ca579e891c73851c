//! The viewer session: single owner of the simulation and its history.
//!
//! Every step ticks the simulation and records the new state exactly once,
//! so the [`HistoryStore`] always ends at the state the viewer is showing.
//! Traces start from that state: the blob under the selected cell is
//! followed back through the store and forward through a fork of the
//! simulation, then assembled into a [`VoxelScene`].

use std::collections::BTreeMap;

use spacetime_trace::{
    AssemblyOptions, BackwardEnd, BackwardTrace, ForwardEnd, ForwardOptions, ForwardTrace,
    Selection, TraceError, assemble, trace_backward, trace_forward,
};
use spacetime_types::{GridError, TraceId, VoxelScene};
use spacetime_world::{HistoryStore, Simulation, WorldError};
use tracing::{debug, info};

use crate::config::{HistoryConfig, TraceConfig};

/// Errors raised while driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Recording a frame failed.
    #[error("history error: {source}")]
    World {
        /// The underlying history error.
        #[from]
        source: WorldError,
    },

    /// A tracer rejected its input.
    #[error("trace error: {source}")]
    Trace {
        /// The underlying tracer error.
        #[from]
        source: TraceError,
    },

    /// The selected cell is not on the grid.
    #[error("invalid selection: {source}")]
    Selection {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Everything produced by tracing one selected structure.
#[derive(Debug, Clone)]
pub struct TraceReport {
    /// Identifier of this trace.
    pub id: TraceId,
    /// The selected cell.
    pub seed: (usize, usize),
    /// The structure under the selected cell at "now".
    pub selection: Selection,
    /// Ancestry through recorded history.
    pub backward: BackwardTrace,
    /// Descent through re-simulation.
    pub forward: ForwardTrace,
    /// The assembled voxel scene.
    pub scene: VoxelScene,
}

/// Drives a simulation while recording it, and traces on request.
#[derive(Debug)]
pub struct ViewerSession<S: Simulation> {
    simulation: S,
    history: HistoryStore,
    backward_frames: usize,
    forward: ForwardOptions,
    assembly: AssemblyOptions,
}

impl<S: Simulation> ViewerSession<S> {
    /// Take ownership of `simulation` and record its current state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::World`] if the history store cannot be
    /// created or the initial state cannot be recorded.
    pub fn new(
        simulation: S,
        history: HistoryConfig,
        trace: &TraceConfig,
    ) -> Result<Self, SessionError> {
        let mut store = HistoryStore::new(simulation.dims(), history.capacity)?;
        store.push(simulation.dims(), simulation.cells())?;
        info!(
            dims = %simulation.dims(),
            capacity = history.capacity,
            "Viewer session started"
        );
        Ok(Self {
            simulation,
            history: store,
            backward_frames: trace.backward_frames,
            forward: trace.forward_options(),
            assembly: trace.assembly_options(),
        })
    }

    /// Advance the simulation one tick and record the result.
    ///
    /// Returns the absolute tick assigned to the new frame.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::World`] if the simulation's grid or buffer no
    /// longer matches the recorded grid. Nothing is recorded in that case.
    pub fn step(&mut self) -> Result<u64, SessionError> {
        self.simulation.tick();
        let tick = self
            .history
            .push(self.simulation.dims(), self.simulation.cells())?;
        Ok(tick)
    }

    /// Step `ticks` times.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first [`step`](Self::step) failure.
    pub fn run(&mut self, ticks: u64) -> Result<(), SessionError> {
        for _ in 0..ticks {
            self.step()?;
        }
        debug!(
            ticks,
            total_ticks = self.history.total_ticks(),
            "Session advanced"
        );
        Ok(())
    }

    /// Trace the structure under cell `(x, y)` of the current state.
    ///
    /// A dead or empty cell yields a report with empty traces and an empty
    /// scene.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Selection`] if `(x, y)` is off the grid, or
    /// [`SessionError::Trace`] if a tracer rejects the current state.
    pub fn trace_at(&self, x: usize, y: usize) -> Result<TraceReport, SessionError> {
        let dims = self.simulation.dims();
        let seed = dims.index_of(x, y)?;
        let id = TraceId::new();
        let selection = Selection::extract(self.simulation.cells(), dims, seed)?;
        let now = self.history.latest().map_or(0, |frame| frame.tick());

        if selection.is_empty() {
            debug!(trace_id = %id, x, y, "Selected cell is not alive");
            let backward = BackwardTrace {
                frames: BTreeMap::new(),
                end: BackwardEnd::NoAncestors { tick: now },
            };
            let forward = ForwardTrace {
                frames: BTreeMap::new(),
                end: ForwardEnd::Died { step: 0 },
            };
            let mut scene = assemble(&backward, &forward, dims, &self.assembly);
            scene.now_tick = now;
            return Ok(TraceReport {
                id,
                seed: (x, y),
                selection,
                backward,
                forward,
                scene,
            });
        }

        let backward = trace_backward(&self.history, &selection, self.backward_frames)?;
        let forward = trace_forward(&self.simulation, &selection, &self.forward)?;
        let scene = assemble(&backward, &forward, dims, &self.assembly);

        info!(
            trace_id = %id,
            x,
            y,
            cells = selection.len(),
            past_frames = backward.len(),
            future_frames = forward.len(),
            voxels = scene.len(),
            truncated = scene.truncated,
            "Trace complete"
        );

        Ok(TraceReport {
            id,
            seed: (x, y),
            selection,
            backward,
            forward,
            scene,
        })
    }

    /// The simulation being displayed.
    pub const fn simulation(&self) -> &S {
        &self.simulation
    }

    /// Recorded history, newest frame equal to the current state.
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }
}
