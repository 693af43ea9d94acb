//! Feastfair - restaurant menu price optimization.
//!
//! This crate chooses a profit-maximizing price for every menu item from a
//! linear demand estimate, optionally keeping expected ingredient use within
//! the stock on hand.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Menu items, ingredients, recipes and optimization results
//! - **`application::pricing`** - Pluggable pricing methods
//!   - `ClosedFormPricer` - exact maximum of each item's profit parabola
//!   - `GridSearchPricer` - best of N evenly spaced candidate prices
//!   - `LinearizedPricer` - two-point linearization solved as an LP
//! - **`port`** - `Store` and `Solver` traits
//! - **`adapter`** - SQLite and in-memory stores, the HiGHS solver, the CLI
//!
//! # Modules
//!
//! - [`adapter`] - Inbound CLI and outbound store/solver implementations
//! - [`application`] - Pricing engine and run export
//! - [`domain`] - Storage-agnostic menu and pricing types
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration and logging setup
//! - [`port`] - Trait definitions implemented by adapters
//!
//! # Example
//!
//! ```
//! use feastfair::application::pricing::optimize;
//! use feastfair::domain::{MenuItem, MenuItemSpec};
//! use rust_decimal_macros::dec;
//!
//! let cake = MenuItem::try_new(MenuItemSpec {
//!     name: "Chocolate Cake".into(),
//!     cost: dec!(2.00),
//!     current_price: Some(dec!(4.99)),
//!     min_price: dec!(4.00),
//!     max_price: dec!(8.00),
//!     base_demand: dec!(20),
//!     elasticity: dec!(0.5),
//! })
//! .unwrap();
//!
//! let outcome = optimize(&[cake]).unwrap();
//! assert_eq!(outcome.items[0].price, dec!(7.00));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
