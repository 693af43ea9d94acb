//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!          ┌─────────────────────────┐
//!          │      Application        │
//!          │   (pricing, reports)    │
//!          └───────────┬─────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!    ┌───────────┐           ┌───────────┐
//!    │   Store   │           │  Solver   │
//!    │  Adapter  │           │  Adapter  │
//!    └───────────┘           └───────────┘
//! ```

pub mod outbound;

pub use outbound::solver::{
    Constraint, ConstraintSense, LpProblem, LpSolution, SolutionStatus, Solver, VariableBounds,
};
pub use outbound::store::{InventoryStore, MenuStore, RunStore, Store};
