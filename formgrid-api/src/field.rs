//! Item identity and the closed set of field types a form can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a placed item.
///
/// The same id names the item in the document and its rectangle in the
/// owning grid's layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of field an item renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Header,
    TextField,
    Checklist,
    /// A container holding its own nested grid of items.
    Section,
}

impl FieldType {
    /// Every selectable type, in menu order.
    pub const ALL: &'static [FieldType] = &[
        FieldType::Header,
        FieldType::TextField,
        FieldType::Checklist,
        FieldType::Section,
    ];

    /// Wire name, as shown in the type menu.
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "HEADER",
            Self::TextField => "TEXT_FIELD",
            Self::Checklist => "CHECKLIST",
            Self::Section => "SECTION",
        }
    }

    pub fn is_section(self) -> bool {
        matches!(self, Self::Section)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
