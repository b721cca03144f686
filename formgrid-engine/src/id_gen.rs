//! Id generation for new items.

use formgrid_api::ItemId;

/// Produces a fresh, globally unique id on every call.
pub trait IdGenerator {
    fn next_id(&mut self) -> ItemId;
}

/// Random v4 UUIDs. The default for live documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ItemId {
        ItemId(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids for seeds and tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("item")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        let id = ItemId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
