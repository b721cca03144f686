//! Engine error types.

use formgrid_api::ItemId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// Unusable configuration: empty breakpoint table, non-positive
    /// column count or container width, and similar.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An id is already present in the layout or document.
    #[error("duplicate id: {0}")]
    DuplicateId(ItemId),

    /// No item (or no section, for nested operations) with this id.
    #[error("not found: {0}")]
    NotFound(ItemId),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
