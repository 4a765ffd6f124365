//! Top-level module for the grid topology: how the global grid is split
//! among ranks and which sides of each block face a neighbour.

pub mod decomposition;

pub use decomposition::{Decomposition, Neighbors, Side};
