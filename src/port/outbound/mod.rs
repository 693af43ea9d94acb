//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the pricing core depends on:
//! record storage and a linear programming backend.

pub mod solver;
pub mod store;
