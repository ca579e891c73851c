//! Geometric halos around sets of cells.

use std::collections::BTreeSet;

use spacetime_types::GridDims;

/// Every cell Moore-adjacent (with wraparound) to some cell of `cells`.
///
/// The halo is purely geometric: cell states are not consulted. An input
/// cell appears in the output only when it neighbors another input cell.
pub fn frontier<'a>(cells: impl IntoIterator<Item = &'a usize>, dims: GridDims) -> BTreeSet<usize> {
    cells
        .into_iter()
        .flat_map(|&cell| dims.moore_neighbors(cell))
        .collect()
}

/// The region worth examining in an adjacent time slice: the cells
/// themselves plus their [`frontier`].
pub fn candidates<'a>(
    cells: impl IntoIterator<Item = &'a usize> + Clone,
    dims: GridDims,
) -> BTreeSet<usize> {
    let mut region = frontier(cells.clone(), dims);
    region.extend(cells.into_iter().copied());
    region
}
