//! Layout Store
//!
//! The ordered rectangles of one grid instance. Order is insertion order and
//! survives moves, so "first collision" is deterministic.

use formgrid_api::{GridPosition, GridRect, ItemId};

use crate::error::{GridError, Result};
use crate::geometry::rects_overlap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStore {
    rects: Vec<GridRect>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Build a store from an existing layout, rejecting duplicate ids.
    pub fn from_rects(rects: impl IntoIterator<Item = GridRect>) -> Result<Self> {
        let mut store = Self::new();
        for rect in rects {
            store.insert(rect)?;
        }
        Ok(store)
    }

    /// Append a rectangle.
    pub fn insert(&mut self, rect: GridRect) -> Result<()> {
        if self.contains(&rect.id) {
            return Err(GridError::DuplicateId(rect.id));
        }
        self.rects.push(rect);
        Ok(())
    }

    /// Move/resize the rectangle for `id` without changing its slot.
    pub fn update(&mut self, id: &ItemId, position: GridPosition) -> Result<()> {
        let rect = self
            .rects
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| GridError::NotFound(id.clone()))?;
        rect.set_position(position);
        Ok(())
    }

    /// Apply a full layout delivered by the substrate.
    ///
    /// Every delivered id must already be present. Store order is kept;
    /// rectangles the delivery omits keep their current position.
    pub fn replace_all(&mut self, rects: &[GridRect]) -> Result<()> {
        for (i, rect) in rects.iter().enumerate() {
            if !self.contains(&rect.id) {
                return Err(GridError::NotFound(rect.id.clone()));
            }
            if rects[..i].iter().any(|r| r.id == rect.id) {
                return Err(GridError::DuplicateId(rect.id.clone()));
            }
        }
        if rects.len() < self.rects.len() {
            tracing::warn!(
                delivered = rects.len(),
                stored = self.rects.len(),
                "layout delivery is missing rectangles; keeping their last positions"
            );
        }
        for rect in rects {
            self.update(&rect.id, rect.position())?;
        }
        Ok(())
    }

    /// Snapshot of every rectangle in store order.
    pub fn all(&self) -> Vec<GridRect> {
        self.rects.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridRect> {
        self.rects.iter()
    }

    pub fn get(&self, id: &ItemId) -> Option<&GridRect> {
        self.rects.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// First row below all content; 0 when empty.
    pub fn bottom(&self) -> u32 {
        self.rects.iter().map(GridRect::bottom).max().unwrap_or(0)
    }

    /// First rectangle in store order that overlaps `candidate`.
    ///
    /// `exclude` skips an item's own rectangle while it is being dragged.
    pub fn find_collision(
        &self,
        candidate: &GridPosition,
        exclude: Option<&ItemId>,
    ) -> Option<&GridRect> {
        self.rects
            .iter()
            .filter(|r| Some(&r.id) != exclude)
            .find(|r| rects_overlap(&r.position(), candidate))
    }

    /// Pull every rectangle inside `columns`, shrinking first and then
    /// shifting left. Returns true if anything moved.
    pub fn clamp_to_columns(&mut self, columns: u32) -> bool {
        let columns = columns.max(1);
        let mut changed = false;
        for rect in &mut self.rects {
            let w = rect.w.clamp(1, columns);
            let x = rect.x.min(columns - w);
            if w != rect.w || x != rect.x {
                rect.w = w;
                rect.x = x;
                changed = true;
            }
        }
        changed
    }
}
