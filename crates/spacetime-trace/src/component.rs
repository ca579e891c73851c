//! Connected-component extraction on a single frame.
//!
//! Connectivity uses the Moore neighborhood with wraparound on both axes,
//! the same neighborhood the automaton itself counts, so an extracted
//! component is a structure the simulation would treat as contiguous.

use std::cmp::Reverse;

use spacetime_types::{Blob, GridDims, is_alive};

use crate::error::{TraceError, check_buffer};

/// The connected component containing `seed`.
///
/// Returns an empty blob when the seed cell is not alive: querying the
/// background never expands.
///
/// # Errors
///
/// Returns [`TraceError::BufferLength`] if `cells` does not match `dims`, or
/// [`TraceError::CellOutOfBounds`] if `seed` is outside the grid.
pub fn extract_component(cells: &[i8], dims: GridDims, seed: usize) -> Result<Blob, TraceError> {
    check_buffer(cells, dims)?;
    if !dims.contains(seed) {
        return Err(TraceError::CellOutOfBounds { index: seed, dims });
    }
    Ok(flood_fill(cells, dims, seed))
}

/// Every alive component of a frame, largest first.
///
/// Components of equal size keep the order of their lowest cell index.
///
/// # Errors
///
/// Returns [`TraceError::BufferLength`] if `cells` does not match `dims`.
pub fn find_components(cells: &[i8], dims: GridDims) -> Result<Vec<Blob>, TraceError> {
    check_buffer(cells, dims)?;

    let mut labelled = Blob::new();
    let mut components = Vec::new();
    for (index, &raw) in cells.iter().enumerate() {
        if !is_alive(raw) || labelled.contains(index) {
            continue;
        }
        let component = flood_fill(cells, dims, index);
        labelled.extend(component.iter().copied());
        components.push(component);
    }

    components.sort_by_key(|component| Reverse(component.len()));
    Ok(components)
}

/// Flood fill from `seed` over cells sharing its (alive) state.
///
/// Callers guarantee `cells` matches `dims`. Each cell is visited at most
/// once, so the cost is linear in the component size.
pub(crate) fn flood_fill(cells: &[i8], dims: GridDims, seed: usize) -> Blob {
    let Some(&state) = cells.get(seed) else {
        return Blob::new();
    };
    if !is_alive(state) {
        return Blob::new();
    }

    let mut component = Blob::new();
    component.insert(seed);
    let mut pending = vec![seed];

    while let Some(cell) = pending.pop() {
        for neighbor in dims.moore_neighbors(cell) {
            if cells.get(neighbor) == Some(&state) && component.insert(neighbor) {
                pending.push(neighbor);
            }
        }
    }

    component
}
