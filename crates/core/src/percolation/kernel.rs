//! Ignition-edge connectivity kernel
//!
//! Every occupied cell in the first column ignites, and fire spreads only
//! between occupied cells at Manhattan distance 1. The burned set is the
//! union of connected components touching the ignition edge; the kernel
//! reports it as a percentage of all occupied cells.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::union_find::{ComponentPartition, DisjointSet};
use crate::grid::Grid;

/// Errors from the connectivity kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Burned-area ratio is undefined when no cell is occupied
    EmptyGrid,
}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::EmptyGrid => {
                write!(f, "Undefined burned-area ratio for grid with no occupied cells")
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Label the occupied cells of a grid with their connected components
///
/// Returns the occupied cells in row-major discovery order together with the
/// component partition over their indices. Adjacency is 4-connectivity;
/// edges are generated by probing each cell's right and down neighbor
/// through a coordinate map, so each unordered pair is visited exactly once
/// and the construction stays linear in the occupied-cell count.
pub fn grid_components(grid: &Grid) -> (Vec<(u32, u32)>, ComponentPartition) {
    let occupied: Vec<(u32, u32)> = grid.occupied_cells().collect();

    let mut index_of: FxHashMap<(u32, u32), u32> = FxHashMap::default();
    index_of.reserve(occupied.len());
    for (i, &cell) in occupied.iter().enumerate() {
        index_of.insert(cell, i as u32);
    }

    let mut forest = DisjointSet::new(occupied.len());
    for (i, &(row, col)) in occupied.iter().enumerate() {
        if let Some(&right) = index_of.get(&(row, col + 1)) {
            forest.union(i as u32, right);
        }
        if let Some(&down) = index_of.get(&(row + 1, col)) {
            forest.union(i as u32, down);
        }
    }

    let partition = forest.components();
    (occupied, partition)
}

/// Percentage of occupied cells reachable from the ignition edge
///
/// Pure function of the grid: the result does not depend on traversal or
/// indexing order, and repeated calls return the same value. An empty
/// ignition column means no fire starts, giving 0.0.
///
/// # Errors
/// Returns [`KernelError::EmptyGrid`] when the grid has no occupied cell,
/// since the burned fraction has no denominator there. Callers decide
/// whether that means "nothing burns" or "drop the trial".
pub fn burned_area(grid: &Grid) -> Result<f64, KernelError> {
    let (occupied, partition) = grid_components(grid);
    if occupied.is_empty() {
        return Err(KernelError::EmptyGrid);
    }

    // Components touching the ignition edge burn in their entirety; count
    // each component once even when several of its cells sit on the edge.
    let mut burning_roots = FxHashSet::default();
    let mut burned: u64 = 0;
    for (i, &(_, col)) in occupied.iter().enumerate() {
        if col == 0 {
            let root = partition.membership[i];
            if burning_roots.insert(root) {
                burned += u64::from(partition.sizes[&root]);
            }
        }
    }

    let total = occupied.len() as u64;
    debug!(
        "kernel: {} occupied, {} components, {} ignited, {} burned",
        total,
        partition.component_count(),
        burning_roots.len(),
        burned
    );

    Ok(burned as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize, cells: &[u8]) -> Grid {
        Grid::from_cells(rows, cols, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_grid_is_explicit_error() {
        let empty = Grid::empty(3, 3).unwrap();
        assert_eq!(burned_area(&empty), Err(KernelError::EmptyGrid));
    }

    #[test]
    fn test_full_grid_burns_completely() {
        let full = grid(3, 4, &[1; 12]);
        assert_eq!(burned_area(&full).unwrap(), 100.0);
    }

    #[test]
    fn test_single_column_grid_burns_completely() {
        let column = grid(5, 1, &[1; 5]);
        assert_eq!(burned_area(&column).unwrap(), 100.0);
    }

    #[test]
    fn test_no_tree_on_ignition_edge_burns_nothing() {
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            0, 1, 1,
            0, 0, 1,
            0, 1, 0,
        ]);
        assert_eq!(burned_area(&g).unwrap(), 0.0);
    }

    #[test]
    fn test_disconnected_component_survives() {
        // Left pair touches the edge and burns; right column of three does not.
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            1, 0, 1,
            1, 0, 1,
            0, 0, 1,
        ]);
        assert_eq!(burned_area(&g).unwrap(), 40.0);
    }

    #[test]
    fn test_fire_spreads_around_corners() {
        // Single snaking component from the edge to the far corner.
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            1, 1, 0,
            0, 1, 0,
            0, 1, 1,
        ]);
        assert_eq!(burned_area(&g).unwrap(), 100.0);
    }

    #[test]
    fn test_diagonal_neighbors_do_not_connect() {
        // The (1,1) cell only touches the edge cell diagonally.
        #[rustfmt::skip]
        let g = grid(2, 2, &[
            1, 0,
            0, 1,
        ]);
        assert_eq!(burned_area(&g).unwrap(), 50.0);
    }

    #[test]
    fn test_kernel_is_idempotent() {
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            1, 0, 1,
            1, 1, 0,
            0, 1, 1,
        ]);
        let first = burned_area(&g).unwrap();
        let second = burned_area(&g).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_sizes_cover_occupied_cells() {
        #[rustfmt::skip]
        let g = grid(4, 4, &[
            1, 0, 1, 1,
            0, 1, 0, 1,
            1, 1, 0, 0,
            0, 0, 1, 0,
        ]);
        let (occupied, partition) = grid_components(&g);
        assert_eq!(partition.total_members(), occupied.len() as u64);
        assert_eq!(occupied.len(), g.occupied_count());
    }
}
