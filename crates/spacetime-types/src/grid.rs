//! Toroidal grid geometry.
//!
//! A [`GridDims`] value fixes the `width x height` of a lattice for the
//! lifetime of a trace. Cells are addressed by a flat index
//! `y * width + x`, and both axes wrap, so every cell has a full Moore
//! neighborhood regardless of where it sits.

use serde::Serialize;
use ts_rs::TS;

/// Errors raised when constructing or addressing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// One of the extents is zero.
    #[error("grid extents must be non-zero (got {width}x{height})")]
    ZeroExtent {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// `width * height` does not fit in a `usize`.
    #[error("grid {width}x{height} has more cells than can be addressed")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}

/// Immutable dimensions of a toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridDims {
    width: usize,
    height: usize,
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroExtent`] if either extent is zero, or
    /// [`GridError::TooLarge`] if the cell count overflows `usize`.
    pub const fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroExtent { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> usize {
        // The constructor guarantees the product fits.
        self.width.saturating_mul(self.height)
    }

    /// Whether `index` addresses a cell of this grid.
    pub const fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Flat index of the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the grid.
    pub const fn index_of(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y.saturating_mul(self.width).saturating_add(x))
    }

    /// Column and row of a flat index, or `None` if it is outside the grid.
    pub const fn coords_of(&self, index: usize) -> Option<(usize, usize)> {
        if !self.contains(index) {
            return None;
        }
        match (index.checked_rem(self.width), index.checked_div(self.width)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// Flat index of `(x, y)` after wrapping both coordinates onto the torus.
    pub fn wrapped_index(&self, x: i64, y: i64) -> usize {
        let wx = wrap_signed(x, self.width);
        let wy = wrap_signed(y, self.height);
        wy.saturating_mul(self.width).saturating_add(wx)
    }

    /// The distinct Moore neighbors of `index` on the torus.
    ///
    /// Normally eight cells. On grids one or two cells wide the wrapped
    /// offsets collide, so duplicates and the cell itself are dropped.
    /// `index` is expected to lie inside the grid.
    pub fn moore_neighbors(&self, index: usize) -> impl Iterator<Item = usize> + use<> {
        let raw = self.raw_neighbors(index);
        raw.into_iter()
            .enumerate()
            .filter(move |&(pos, cell)| {
                cell != index && !raw.get(..pos).is_some_and(|seen| seen.contains(&cell))
            })
            .map(|(_, cell)| cell)
    }

    fn raw_neighbors(&self, index: usize) -> [usize; 8] {
        let x = index.checked_rem(self.width).unwrap_or(0);
        let y = index
            .checked_div(self.width)
            .and_then(|row| row.checked_rem(self.height))
            .unwrap_or(0);

        let cols = [step_back(x, self.width), x, step_forward(x, self.width)];
        let rows = [step_back(y, self.height), y, step_forward(y, self.height)];
        let at = |row: usize, col: usize| row.saturating_mul(self.width).saturating_add(col);

        let [west, _, east] = cols;
        let [north, _, south] = rows;
        [
            at(north, west),
            at(north, x),
            at(north, east),
            at(y, west),
            at(y, east),
            at(south, west),
            at(south, x),
            at(south, east),
        ]
    }
}

impl core::fmt::Display for GridDims {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

const fn step_back(v: usize, extent: usize) -> usize {
    if v == 0 { extent.saturating_sub(1) } else { v.saturating_sub(1) }
}

const fn step_forward(v: usize, extent: usize) -> usize {
    let next = v.saturating_add(1);
    if next >= extent { 0 } else { next }
}

fn wrap_signed(v: i64, extent: usize) -> usize {
    let Ok(extent_i) = i64::try_from(extent) else {
        return usize::try_from(v).unwrap_or(0);
    };
    let wrapped = v.checked_rem_euclid(extent_i).unwrap_or(0);
    usize::try_from(wrapped).unwrap_or(0)
}
