//! Grid engine for the territorial tree simulation.
//!
//! Trees occupy cells of a square grid, spread mutated copies of their genome
//! into empty neighbours, drain health from the neighbours they attack, and
//! die once their health runs out.

pub mod grid;
pub mod mutation;
pub mod stats;

pub use grid::Grid;
pub use mutation::mutate;
pub use stats::PopulationStats;
