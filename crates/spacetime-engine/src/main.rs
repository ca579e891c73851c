//! Engine binary for the Spacetime lineage tracer.
//!
//! Runs a seeded Game-of-Life lattice while recording its history, traces
//! one structure backward and forward from the final state, and writes the
//! resulting voxel scene as JSON for the web viewer.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `spacetime-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the lattice and open a viewer session
//! 4. Warm up: step and record
//! 5. Pick the configured seed cell, or the largest live structure
//! 6. Trace and export the scene

mod error;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use spacetime_core::{SpacetimeConfig, ViewerSession};
use spacetime_trace::{JsonSceneWriter, VoxelSink, find_components};
use spacetime_world::{LifeGrid, Simulation};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

const CONFIG_PATH: &str = "spacetime-config.yaml";

fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, from_file) = load_config(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging. RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
        }))
        .with_target(true)
        .init();

    info!("spacetime-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        width = config.grid.width,
        height = config.grid.height,
        seed = config.grid.seed,
        history = config.history.capacity,
        backward_frames = config.trace.backward_frames,
        forward_frames = config.trace.forward_frames,
        "Configuration loaded"
    );

    // 3. Seed the lattice.
    let dims = config.grid.dims()?;
    let grid = LifeGrid::random(dims, config.grid.seed, config.grid.initial_density)?;
    info!(alive = grid.alive_count(), "Lattice seeded");
    let mut session = ViewerSession::new(grid, config.history, &config.trace)?;

    // 4. Warm up.
    session.run(config.run.warmup_ticks)?;
    info!(
        generation = session.simulation().generation(),
        recorded = session.history().len(),
        "Warmup complete"
    );

    // 5. Pick what to trace.
    let seed = match config.run.seed_cell {
        Some([x, y]) => Some((x, y)),
        None => largest_structure(&session)?,
    };
    let Some((x, y)) = seed else {
        warn!("No live structure to trace");
        return Ok(());
    };

    // 6. Trace and export.
    let report = session.trace_at(x, y)?;
    let path = &config.run.output_path;
    let file = File::create(path).map_err(|source| EngineError::Output {
        path: path.display().to_string(),
        source,
    })?;
    let mut sink = JsonSceneWriter::new(BufWriter::new(file));
    sink.accept(&report.scene)?;

    info!(
        trace_id = %report.id,
        scene_id = %report.scene.id,
        voxels = report.scene.len(),
        truncated = report.scene.truncated,
        path = %path.display(),
        "Scene exported"
    );
    Ok(())
}

/// Load the configuration, falling back to defaults when the file is
/// absent. The flag reports whether the file was read.
fn load_config(path: &Path) -> Result<(SpacetimeConfig, bool), EngineError> {
    if path.exists() {
        Ok((SpacetimeConfig::from_file(path)?, true))
    } else {
        Ok((SpacetimeConfig::default(), false))
    }
}

/// Coordinates of a cell in the largest structure of the current state.
fn largest_structure<S: Simulation>(
    session: &ViewerSession<S>,
) -> Result<Option<(usize, usize)>, EngineError> {
    let simulation = session.simulation();
    let dims = simulation.dims();
    let components = find_components(simulation.cells(), dims)?;
    let cell = components
        .first()
        .and_then(|blob| blob.iter().next().copied())
        .and_then(|index| dims.coords_of(index));
    if let Some(blob) = components.first() {
        info!(
            structures = components.len(),
            largest = blob.len(),
            "Selected largest structure"
        );
    }
    Ok(cell)
}
