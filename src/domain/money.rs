//! Monetary and quantity types.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Units sold or ingredient quantity, represented as a Decimal.
pub type Quantity = Decimal;
