//! Solver adapters.

pub mod highs;

pub use highs::HighsSolver;
