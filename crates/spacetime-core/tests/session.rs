//! Session-level tests: recording while stepping, then tracing a selection.

#![allow(clippy::unwrap_used)]

use spacetime_core::config::{HistoryConfig, TraceConfig};
use spacetime_core::{SpacetimeConfig, ViewerSession};
use spacetime_trace::{BackwardEnd, ForwardEnd};
use spacetime_types::GridDims;
use spacetime_world::{LifeGrid, Simulation};

const GLIDER: [(usize, usize); 5] = [(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)];

fn glider_session(capacity: usize, trace: &TraceConfig) -> ViewerSession<LifeGrid> {
    let dims = GridDims::new(40, 40).unwrap();
    let grid = LifeGrid::with_alive(dims, &GLIDER).unwrap();
    ViewerSession::new(grid, HistoryConfig { capacity }, trace).unwrap()
}

fn any_live_cell(session: &ViewerSession<LifeGrid>) -> (usize, usize) {
    let sim = session.simulation();
    let index = sim.cells().iter().position(|&raw| raw == 1).unwrap();
    sim.dims().coords_of(index).unwrap()
}

#[test]
fn glider_trace_covers_history_and_future() {
    let trace = TraceConfig {
        backward_frames: 20,
        forward_frames: 8,
        ..TraceConfig::default()
    };
    let mut session = glider_session(32, &trace);
    session.run(10).unwrap();

    let (x, y) = any_live_cell(&session);
    let report = session.trace_at(x, y).unwrap();

    assert_eq!(report.seed, (x, y));
    assert_eq!(report.selection.len(), 5);
    assert_eq!(report.backward.len(), 11);
    assert_eq!(report.backward.end, BackwardEnd::HistoryExhausted);
    assert_eq!(report.backward.now_tick(), Some(10));
    assert_eq!(report.forward.len(), 8);
    assert_eq!(report.forward.end, ForwardEnd::StepLimit);
    assert_eq!(report.scene.len(), 95);
    assert_eq!(report.scene.now_tick, 10);

    // Tracing never advances the displayed simulation.
    assert_eq!(session.simulation().generation(), 10);
    assert_eq!(session.history().total_ticks(), 11);
}

#[test]
fn small_history_bounds_the_past() {
    let mut session = glider_session(4, &TraceConfig::default());
    session.run(12).unwrap();
    let (x, y) = any_live_cell(&session);
    let report = session.trace_at(x, y).unwrap();
    assert_eq!(report.backward.len(), 4);
    assert_eq!(report.backward.earliest().map(|(tick, _)| tick), Some(9));
}

#[test]
fn voxel_budget_from_config_is_enforced() {
    let trace = TraceConfig {
        max_voxels: 12,
        ..TraceConfig::default()
    };
    let mut session = glider_session(16, &trace);
    session.run(6).unwrap();
    let (x, y) = any_live_cell(&session);
    let report = session.trace_at(x, y).unwrap();
    assert_eq!(report.scene.len(), 12);
    assert!(report.scene.truncated);
    assert!(report.scene.voxels.iter().all(|v| v.t <= 0));
}

#[test]
fn configured_random_session_runs() {
    let config = SpacetimeConfig::parse(
        "grid:\n  width: 24\n  height: 24\n  seed: 3\nhistory:\n  capacity: 8\nrun:\n  warmup_ticks: 6\n",
    )
    .unwrap();
    let dims = config.grid.dims().unwrap();
    let grid = LifeGrid::random(dims, config.grid.seed, config.grid.initial_density).unwrap();
    let mut session = ViewerSession::new(grid, config.history, &config.trace).unwrap();
    session.run(config.run.warmup_ticks).unwrap();
    assert_eq!(session.history().len(), 7);

    let report = session.trace_at(0, 0).unwrap();
    assert!(report.scene.len() <= config.trace.max_voxels);
}
