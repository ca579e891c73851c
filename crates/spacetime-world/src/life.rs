//! Reference Game-of-Life engine (B3/S23) on a torus.
//!
//! [`LifeGrid`] implements [`Simulation`] so the engine binary and the test
//! suites have a deterministic lattice to record and trace. It double
//! buffers: each tick reads the active buffer, writes the scratch buffer,
//! then swaps the two.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spacetime_types::{CellState, GridDims, is_alive};

use crate::error::WorldError;
use crate::simulation::Simulation;

/// Conway's Game of Life on a wrapping grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGrid {
    dims: GridDims,
    cells: Vec<i8>,
    scratch: Vec<i8>,
    generation: u64,
}

impl LifeGrid {
    /// An all-dead grid.
    pub fn new(dims: GridDims) -> Self {
        let cells = vec![CellState::DEAD; dims.cell_count()];
        Self {
            dims,
            scratch: cells.clone(),
            cells,
            generation: 0,
        }
    }

    /// A grid seeded with live cells at probability `density`.
    ///
    /// The same `seed` always produces the same lattice.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDensity`] if `density` is outside `[0, 1]`.
    pub fn random(dims: GridDims, seed: u64, density: f64) -> Result<Self, WorldError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(WorldError::InvalidDensity { density });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Self::new(dims);
        for cell in &mut grid.cells {
            if rng.random_bool(density) {
                *cell = CellState::ALIVE;
            }
        }
        Ok(grid)
    }

    /// A grid adopting an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BufferLength`] if `cells` does not fit `dims`.
    pub fn from_cells(dims: GridDims, cells: Vec<i8>) -> Result<Self, WorldError> {
        let expected = dims.cell_count();
        if cells.len() != expected {
            return Err(WorldError::BufferLength {
                dims,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            dims,
            scratch: vec![CellState::DEAD; expected],
            cells,
            generation: 0,
        })
    }

    /// A grid with exactly the listed `(x, y)` cells alive.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if any coordinate is outside the grid.
    pub fn with_alive(dims: GridDims, alive: &[(usize, usize)]) -> Result<Self, WorldError> {
        let mut grid = Self::new(dims);
        for &(x, y) in alive {
            grid.set_alive(x, y, true)?;
        }
        Ok(grid)
    }

    /// Set or clear a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if the coordinate is outside the grid.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> Result<(), WorldError> {
        let index = self.dims.index_of(x, y)?;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = if alive { CellState::ALIVE } else { CellState::DEAD };
        }
        Ok(())
    }

    /// Number of live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&raw| is_alive(raw)).count()
    }

    fn live_neighbors(&self, index: usize) -> usize {
        self.dims
            .moore_neighbors(index)
            .filter(|&n| self.cells.get(n).copied().is_some_and(is_alive))
            .count()
    }
}

impl Simulation for LifeGrid {
    fn dims(&self) -> GridDims {
        self.dims
    }

    fn cells(&self) -> &[i8] {
        &self.cells
    }

    fn tick(&mut self) {
        for index in 0..self.cells.len() {
            let alive = self.cells.get(index).copied().is_some_and(is_alive);
            let next = match (alive, self.live_neighbors(index)) {
                (true, 2 | 3) | (false, 3) => CellState::ALIVE,
                _ => CellState::DEAD,
            };
            if let Some(out) = self.scratch.get_mut(index) {
                *out = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation = self.generation.saturating_add(1);
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn fork(&self) -> Self {
        self.clone()
    }
}
