//! One step of lineage: from a blob to its overlapping structure in an
//! adjacent frame.
//!
//! Both tracers share this rule. The search is restricted to the blob's
//! footprint plus its halo, and every alive cell found there is grown to its
//! full component. This is a spatial-overlap heuristic, not a causal
//! derivation from the update rule: a structure that moves more than one
//! cell between two recorded frames is lost.

use spacetime_types::{Blob, GridDims};

use crate::component::flood_fill;
use crate::frontier::candidates;

/// The union of every component of `frame` that touches or overlaps `active`.
///
/// Returns an empty blob when nothing alive lies within one cell of
/// `active`. `frame` must hold one value per cell of `dims`.
pub fn follow_overlap(frame: &[i8], dims: GridDims, active: &Blob) -> Blob {
    let mut next = Blob::new();
    for cell in candidates(active, dims) {
        // A cell already absorbed belongs to a component we have grown.
        if next.contains(cell) {
            continue;
        }
        next.absorb(flood_fill(frame, dims, cell));
    }
    next
}
