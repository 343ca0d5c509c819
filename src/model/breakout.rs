//! Breakout data model.
//!
//! Breakouts are named sub-groups of regions whose visibility can be toggled
//! independently of the rest of the document.

use serde::{Deserialize, Serialize};

/// A named, toggleable group of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakout {
    /// Unique identifier referenced by `Region::breakout`
    pub id: String,
    /// Display name
    pub name: String,
    /// Always true; lets consumers tell breakouts apart from other groups.
    #[serde(default = "is_breakout")]
    pub is_breakout: bool,
    /// Whether this breakout is the one currently shown
    #[serde(default)]
    pub visible: bool,
}

fn is_breakout() -> bool {
    true
}

impl Breakout {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_breakout: true,
            visible: false,
        }
    }
}
