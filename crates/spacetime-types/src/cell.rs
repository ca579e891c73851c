//! Tri-state cell values.
//!
//! Simulations expose their lattice as a flat `i8` buffer. Game-of-Life
//! engines write `0`/`1`; Ising engines write `-1`/`+1` spins. Only the
//! alive value (`+1`) takes part in connectivity and tracing; every other
//! value is background.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Interpreted state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CellState {
    /// Empty cell (`0`).
    Dead,
    /// Live cell (`+1`).
    Alive,
    /// Any other value, such as a down spin (`-1`).
    Other,
}

impl CellState {
    /// Raw value of a live cell.
    pub const ALIVE: i8 = 1;
    /// Raw value of an empty cell.
    pub const DEAD: i8 = 0;
    /// Raw value used for the non-alive sentinel.
    pub const OTHER: i8 = -1;

    /// Interpret a raw buffer value.
    pub const fn from_raw(raw: i8) -> Self {
        match raw {
            Self::ALIVE => Self::Alive,
            Self::DEAD => Self::Dead,
            _ => Self::Other,
        }
    }

    /// Whether this state participates in tracing.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Whether a raw buffer value is alive.
pub const fn is_alive(raw: i8) -> bool {
    CellState::from_raw(raw).is_alive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_one_is_alive() {
        assert!(is_alive(1));
        assert!(!is_alive(0));
        assert!(!is_alive(-1));
        assert!(!is_alive(2));
        assert_eq!(CellState::from_raw(2), CellState::Other);
        assert_eq!(CellState::from_raw(CellState::OTHER), CellState::Other);
    }
}
