//! Device data model.
//!
//! A device is a named symbol type (`cls`) with a default category.
//! Built-in devices come from configuration; user-defined devices are created
//! the first time an unknown symbol is assigned to a region.

use serde::{Deserialize, Serialize};

/// A symbol type and its default category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Unique symbol name, matched against region `cls`.
    pub symbol_name: String,
    /// Default category for regions of this symbol.
    pub category: String,
    /// False for built-in devices, which keep their category.
    #[serde(default)]
    pub user_defined: bool,
    /// Unique identifier
    pub id: String,
}

impl Device {
    /// Create a user-defined device.
    pub fn user_defined(
        id: impl Into<String>,
        symbol_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            category: category.into(),
            user_defined: true,
            id: id.into(),
        }
    }

    /// Create a built-in device.
    pub fn builtin(
        id: impl Into<String>,
        symbol_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            user_defined: false,
            ..Self::user_defined(id, symbol_name, category)
        }
    }
}
