//! Domain validation errors for menu and inventory types.
//!
//! These errors are returned by `try_new` constructors when a domain
//! invariant is violated.
//!
//! # Examples
//!
//! ```
//! use feastfair::domain::error::DomainError;
//! use feastfair::domain::menu::{MenuItem, MenuItemSpec};
//! use rust_decimal_macros::dec;
//!
//! let result = MenuItem::try_new(MenuItemSpec {
//!     name: "Espresso".into(),
//!     cost: dec!(0.80),
//!     current_price: None,
//!     min_price: dec!(3.00),
//!     max_price: dec!(2.00),
//!     base_demand: dec!(40),
//!     elasticity: dec!(0.5),
//! });
//!
//! assert!(matches!(result, Err(DomainError::InvertedPriceRange { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Names are required for every record shown to an operator.
    #[error("{entity} name cannot be empty")]
    EmptyName {
        /// Kind of record being validated.
        entity: &'static str,
    },

    /// Ingredient units are required so quantities stay comparable.
    #[error("ingredient unit cannot be empty")]
    EmptyUnit,

    /// A monetary or quantity field was negative.
    #[error("{field} must be 0 or greater, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value that was provided.
        value: Decimal,
    },

    /// A value is too large for pricing arithmetic to stay exact.
    #[error("{field} must not exceed {limit} in magnitude, got {value}")]
    TooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value that was provided.
        value: Decimal,
        /// Largest accepted magnitude.
        limit: Decimal,
    },

    /// The lower price bound exceeds the upper bound.
    #[error("min_price {min} must not exceed max_price {max}")]
    InvertedPriceRange {
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// Recipe quantities must be strictly positive.
    #[error("recipe quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The invalid quantity.
        quantity: Decimal,
    },

    /// A pricing method name did not match any known method.
    #[error("unknown pricing method '{0}' (expected closed-form, grid-search or linearized)")]
    UnknownMethod(String),
}

/// Reject negative values for the named field.
pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::Negative { field, value });
    }
    Ok(())
}

/// Largest accepted price, cost, demand or stock quantity.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted elasticity magnitude.
pub const MAX_ELASTICITY: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Reject values whose magnitude exceeds `limit`.
pub(crate) fn ensure_within(
    field: &'static str,
    value: Decimal,
    limit: Decimal,
) -> Result<(), DomainError> {
    if value.abs() > limit {
        return Err(DomainError::TooLarge {
            field,
            value,
            limit,
        });
    }
    Ok(())
}

/// Reject negative values or values above [`MAX_AMOUNT`].
pub(crate) fn ensure_amount(field: &'static str, value: Decimal) -> Result<(), DomainError> {
    ensure_non_negative(field, value)?;
    ensure_within(field, value, MAX_AMOUNT)
}
