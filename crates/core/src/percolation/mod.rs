//! Site-percolation connectivity analysis
//!
//! The kernel decides which occupied cells a fire starting on the ignition
//! edge (the first column) can reach under 4-connectivity, and what fraction
//! of all occupied cells that reachable set represents.

mod kernel;
mod union_find;

// Re-export main types
pub use kernel::{burned_area, grid_components, KernelError};
pub use union_find::{ComponentPartition, DisjointSet};
