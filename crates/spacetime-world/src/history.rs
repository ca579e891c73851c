//! Bounded history of grid snapshots.
//!
//! The [`HistoryStore`] is a fixed-capacity ring buffer. Each push copies a
//! cell buffer into owned storage and assigns it the next absolute tick.
//! Frames are addressed by a non-positive offset from the latest push:
//! `0` is the newest frame, `-1` the one before it, and so on back to
//! `-(len - 1)`. Anything outside that window is simply unavailable, which
//! is how the backward tracer learns it has run out of history.
//!
//! # Invariants
//!
//! - `len() <= capacity()` at all times; the oldest frame is overwritten
//!   once the buffer is full.
//! - `total_ticks()` grows by exactly one per push and never decreases,
//!   even across [`HistoryStore::clear`].
//! - Every stored buffer was taken from a grid equal to `dims()` and has
//!   exactly `dims().cell_count()` cells.

use spacetime_types::GridDims;
use tracing::trace;

use crate::error::WorldError;

/// One recorded grid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    tick: u64,
    cells: Box<[i8]>,
}

impl Snapshot {
    /// Absolute tick this snapshot was recorded at.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Raw cell buffer.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }
}

/// Fixed-capacity circular buffer of past grid states.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dims: GridDims,
    capacity: usize,
    frames: Vec<Snapshot>,
    /// Slot the next push writes to.
    head: usize,
    /// Number of valid frames.
    count: usize,
    total_ticks: u64,
}

impl HistoryStore {
    /// Create an empty store for grids of `dims`, holding at most
    /// `capacity` frames.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(dims: GridDims, capacity: usize) -> Result<Self, WorldError> {
        if capacity == 0 {
            return Err(WorldError::ZeroCapacity);
        }
        Ok(Self {
            dims,
            capacity,
            frames: Vec::with_capacity(capacity),
            head: 0,
            count: 0,
            total_ticks: 0,
        })
    }

    /// Record a grid state taken from a `dims` grid. Returns the absolute
    /// tick assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DimsMismatch`] if `dims` differs from the
    /// store's grid, even when the cell counts agree, or
    /// [`WorldError::BufferLength`] if `cells` does not fit the grid.
    /// Nothing is recorded in either case.
    pub fn push(&mut self, dims: GridDims, cells: &[i8]) -> Result<u64, WorldError> {
        if dims != self.dims {
            return Err(WorldError::DimsMismatch {
                expected: self.dims,
                actual: dims,
            });
        }
        let expected = self.dims.cell_count();
        if cells.len() != expected {
            return Err(WorldError::BufferLength {
                dims: self.dims,
                expected,
                actual: cells.len(),
            });
        }

        let tick = self.total_ticks;
        let snapshot = Snapshot {
            tick,
            cells: cells.into(),
        };

        if self.frames.len() < self.capacity {
            self.frames.push(snapshot);
        } else if let Some(slot) = self.frames.get_mut(self.head) {
            trace!(evicted_tick = slot.tick, tick, "History full, overwriting oldest frame");
            *slot = snapshot;
        }

        self.head = self
            .head
            .saturating_add(1)
            .checked_rem(self.capacity)
            .unwrap_or(0);
        self.count = self.count.saturating_add(1).min(self.capacity);
        self.total_ticks = self.total_ticks.saturating_add(1);
        Ok(tick)
    }

    /// The frame `|offset|` pushes before the latest one.
    ///
    /// Returns `None` when `offset > 0` or when not enough history has been
    /// recorded to reach that far back.
    pub fn frame_at(&self, offset: i64) -> Option<&Snapshot> {
        let slot = self.slot_for(offset)?;
        self.frames.get(slot)
    }

    /// Absolute tick of the frame at `offset`, i.e. `total_ticks - 1 + offset`.
    ///
    /// Defined exactly when [`frame_at`](Self::frame_at) is.
    pub fn tick_at(&self, offset: i64) -> Option<u64> {
        let depth = self.depth_of(offset)?;
        self.total_ticks
            .checked_sub(1)?
            .checked_sub(u64::try_from(depth).ok()?)
    }

    /// The most recently pushed frame.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.frame_at(0)
    }

    /// Grid dimensions every frame conforms to.
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Maximum number of frames retained.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of frames currently available.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no frame has been recorded (or all were cleared).
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of pushes over the store's lifetime.
    pub const fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Drop every stored frame. The tick counter keeps counting.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.head = 0;
        self.count = 0;
    }

    fn depth_of(&self, offset: i64) -> Option<usize> {
        if offset > 0 {
            return None;
        }
        let depth = usize::try_from(offset.unsigned_abs()).ok()?;
        (depth < self.count).then_some(depth)
    }

    fn slot_for(&self, offset: i64) -> Option<usize> {
        let depth = self.depth_of(offset)?;
        // Newest frame sits just behind `head`.
        self.head
            .checked_add(self.capacity)?
            .checked_sub(1)?
            .checked_sub(depth)?
            .checked_rem(self.capacity)
    }
}
