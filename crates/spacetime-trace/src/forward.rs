//! Forward lineage through speculative re-simulation.
//!
//! The live simulation is forked once and only the fork is stepped, so the
//! state the viewer displays is never advanced. Futures are reproducible
//! only if the engine's tick is deterministic.

use std::collections::BTreeMap;

use serde::Serialize;
use spacetime_types::Blob;
use spacetime_world::Simulation;
use tracing::debug;

use crate::error::{TraceError, check_buffer};
use crate::overlap::follow_overlap;
use crate::selection::Selection;

/// Default fraction of the grid a descendant may cover before the walk
/// stops.
pub const DEFAULT_STOP_ON_EXPANDED: f64 = 0.5;

/// Default number of forward steps.
pub const DEFAULT_FORWARD_FRAMES: usize = 32;

/// Bounds for a forward walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardOptions {
    /// Maximum number of ticks to simulate.
    pub max_frames: usize,
    /// Stop once a descendant covers more than this fraction of the grid.
    pub stop_on_expanded: f64,
}

impl Default for ForwardOptions {
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_FORWARD_FRAMES,
            stop_on_expanded: DEFAULT_STOP_ON_EXPANDED,
        }
    }
}

/// Why a forward walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForwardEnd {
    /// No alive cell overlapped the blob after `step` ticks.
    Died {
        /// The step at which the structure vanished.
        step: usize,
    },
    /// The descendant grew past the expansion limit at `step`.
    Expanded {
        /// The step at which the limit was exceeded.
        step: usize,
        /// Size of the oversized descendant.
        size: usize,
    },
    /// `max_frames` steps were simulated.
    StepLimit,
}

/// Descendants of a blob keyed by relative step (`1..=k`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardTrace {
    /// Blob per step after "now". Terminal empty or oversized frames are
    /// not recorded.
    pub frames: BTreeMap<usize, Blob>,
    /// Why the walk stopped.
    pub end: ForwardEnd,
}

impl ForwardTrace {
    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no step was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Trace `selection` forward by stepping a fork of `simulation`.
///
/// The selection is expected to be a full connected component of the
/// simulation's current state.
///
/// # Errors
///
/// Returns [`TraceError::DimsMismatch`] if the selection was taken on
/// another grid, or if the fork changes shape while stepping, and
/// [`TraceError::BufferLength`] if the simulation's buffer disagrees with
/// its own dimensions.
pub fn trace_forward<S: Simulation>(
    simulation: &S,
    selection: &Selection,
    options: &ForwardOptions,
) -> Result<ForwardTrace, TraceError> {
    let dims = simulation.dims();
    check_buffer(simulation.cells(), dims)?;
    selection.check_grid(dims)?;

    let mut frames = BTreeMap::new();
    let mut end = ForwardEnd::StepLimit;

    if options.max_frames == 0 {
        return Ok(ForwardTrace { frames, end });
    }

    let mut fork = simulation.fork();
    let mut active = selection.blob().clone();

    for step in 1..=options.max_frames {
        fork.tick();
        selection.check_grid(fork.dims())?;
        let cells = fork.cells();
        check_buffer(cells, dims)?;

        let descendants = follow_overlap(cells, dims, &active);
        if descendants.is_empty() {
            end = ForwardEnd::Died { step };
            break;
        }
        if exceeds_fraction(descendants.len(), dims.cell_count(), options.stop_on_expanded) {
            end = ForwardEnd::Expanded {
                step,
                size: descendants.len(),
            };
            break;
        }

        frames.insert(step, descendants.clone());
        active = descendants;
    }

    debug!(
        recorded = frames.len(),
        start_cells = selection.len(),
        ?end,
        "Forward trace finished"
    );
    Ok(ForwardTrace { frames, end })
}

fn exceeds_fraction(size: usize, area: usize, fraction: f64) -> bool {
    // Grid sizes stay far below 2^52 cells.
    #[allow(clippy::cast_precision_loss)]
    let (size, area) = (size as f64, area as f64);
    size > fraction * area
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use spacetime_types::GridDims;
    use spacetime_world::LifeGrid;

    use super::*;

    fn blob_at(dims: GridDims, coords: &[(usize, usize)]) -> Blob {
        coords
            .iter()
            .map(|&(x, y)| dims.index_of(x, y).unwrap())
            .collect()
    }

    fn select(dims: GridDims, coords: &[(usize, usize)]) -> Selection {
        Selection::new(dims, blob_at(dims, coords)).unwrap()
    }

    /// Fills the whole grid with live cells on its first tick.
    #[derive(Clone)]
    struct Flood {
        dims: GridDims,
        cells: Vec<i8>,
        generation: u64,
    }

    impl Simulation for Flood {
        fn dims(&self) -> GridDims {
            self.dims
        }
        fn cells(&self) -> &[i8] {
            &self.cells
        }
        fn tick(&mut self) {
            self.cells.iter_mut().for_each(|c| *c = 1);
            self.generation += 1;
        }
        fn generation(&self) -> u64 {
            self.generation
        }
        fn fork(&self) -> Self {
            self.clone()
        }
    }

    /// Keeps its cells but re-reads them as a 25x4 grid after one tick.
    #[derive(Clone)]
    struct Reshape {
        dims: GridDims,
        cells: Vec<i8>,
    }

    impl Simulation for Reshape {
        fn dims(&self) -> GridDims {
            self.dims
        }
        fn cells(&self) -> &[i8] {
            &self.cells
        }
        fn tick(&mut self) {
            self.dims = GridDims::new(25, 4).unwrap();
        }
        fn generation(&self) -> u64 {
            0
        }
        fn fork(&self) -> Self {
            self.clone()
        }
    }

    #[test]
    fn oscillator_runs_to_step_limit() {
        let dims = GridDims::new(10, 10).unwrap();
        let blinker = [(3, 4), (4, 4), (5, 4)];
        let sim = LifeGrid::with_alive(dims, &blinker).unwrap();
        let options = ForwardOptions {
            max_frames: 7,
            ..ForwardOptions::default()
        };
        let trace = trace_forward(&sim, &select(dims, &blinker), &options).unwrap();
        assert_eq!(trace.len(), 7);
        assert_eq!(trace.end, ForwardEnd::StepLimit);
        assert_eq!(trace.frames[&1], blob_at(dims, &[(4, 3), (4, 4), (4, 5)]));
        assert_eq!(trace.frames[&2], blob_at(dims, &blinker));
    }

    #[test]
    fn lone_cell_dies_on_first_step() {
        let dims = GridDims::new(10, 10).unwrap();
        let sim = LifeGrid::with_alive(dims, &[(5, 5)]).unwrap();
        let trace =
            trace_forward(&sim, &select(dims, &[(5, 5)]), &ForwardOptions::default()).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.end, ForwardEnd::Died { step: 1 });
    }

    #[test]
    fn explosion_stops_the_walk() {
        let dims = GridDims::new(6, 6).unwrap();
        let mut cells = vec![0; 36];
        cells[14] = 1;
        let sim = Flood {
            dims,
            cells,
            generation: 0,
        };
        let selection = Selection::new(dims, [14].into_iter().collect()).unwrap();
        let trace = trace_forward(&sim, &selection, &ForwardOptions::default()).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.end, ForwardEnd::Expanded { step: 1, size: 36 });
    }

    #[test]
    fn live_simulation_is_not_advanced() {
        let dims = GridDims::new(12, 12).unwrap();
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let sim = LifeGrid::with_alive(dims, &glider).unwrap();
        let before = sim.clone();
        let trace =
            trace_forward(&sim, &select(dims, &glider), &ForwardOptions::default()).unwrap();
        assert_eq!(sim, before);
        assert_eq!(sim.generation(), 0);
        // A glider on an empty torus never dies or explodes.
        assert_eq!(trace.len(), DEFAULT_FORWARD_FRAMES);
        assert!(trace.frames.values().all(|b| b.len() == 5));
    }

    #[test]
    fn zero_frames_is_empty() {
        let dims = GridDims::new(4, 4).unwrap();
        let sim = LifeGrid::new(dims);
        let options = ForwardOptions {
            max_frames: 0,
            ..ForwardOptions::default()
        };
        let empty = Selection::new(dims, Blob::new()).unwrap();
        let trace = trace_forward(&sim, &empty, &options).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.end, ForwardEnd::StepLimit);
    }

    #[test]
    fn selection_from_equal_area_grid_is_rejected() {
        let square = GridDims::new(10, 10).unwrap();
        let wide = GridDims::new(25, 4).unwrap();
        let sim = LifeGrid::from_cells(wide, vec![1; 100]).unwrap();
        let blinker = select(square, &[(3, 4), (4, 4), (5, 4)]);
        assert_eq!(
            trace_forward(&sim, &blinker, &ForwardOptions::default()),
            Err(TraceError::DimsMismatch {
                expected: wide,
                actual: square,
            })
        );
    }

    #[test]
    fn fork_changing_shape_is_rejected() {
        let square = GridDims::new(10, 10).unwrap();
        let blinker = [(3, 4), (4, 4), (5, 4)];
        let sim = Reshape {
            dims: square,
            cells: LifeGrid::with_alive(square, &blinker).unwrap().cells().to_vec(),
        };
        assert_eq!(
            trace_forward(&sim, &select(square, &blinker), &ForwardOptions::default()),
            Err(TraceError::DimsMismatch {
                expected: GridDims::new(25, 4).unwrap(),
                actual: square,
            })
        );
    }

    #[test]
    fn fraction_threshold_is_strict() {
        assert!(!exceeds_fraction(50, 100, 0.5));
        assert!(exceeds_fraction(51, 100, 0.5));
    }
}
