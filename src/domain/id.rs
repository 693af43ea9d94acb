//! Domain identifier types.
//!
//! Records are keyed by SQLite row ids. The newtypes keep a menu item id from
//! being passed where an ingredient id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Raw row id.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

row_id!(
    /// Identifier of a stored menu item.
    MenuItemId
);

row_id!(
    /// Identifier of a stored ingredient.
    IngredientId
);

row_id!(
    /// Identifier of a persisted optimization run.
    RunId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_raw_integer() {
        assert_eq!(MenuItemId::new(7).to_string(), "7");
        assert_eq!(RunId::from(12).get(), 12);
    }

    #[test]
    fn ids_parse_from_cli_text() {
        assert_eq!(" 5".parse::<MenuItemId>(), Ok(MenuItemId::new(5)));
        assert!("five".parse::<IngredientId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&IngredientId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
