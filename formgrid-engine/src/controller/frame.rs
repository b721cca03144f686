//! Render description produced by a controller each frame.
//!
//! All rectangles are in top-level container pixels, nested grids included,
//! so the host can position every box without knowing about nesting.

use formgrid_api::{FieldType, GridPosition, GridRect, GridTarget, ItemId};

use crate::primitives::Rect;

/// Text shown on the placement overlay.
pub const ADD_FIELD_LABEL: &str = "Add New Field";

#[derive(Debug, Clone, PartialEq)]
pub struct GridFrame {
    pub target: GridTarget,
    pub columns: u32,
    /// The grid's own area: the container for the root, the section box for
    /// nested grids.
    pub bounds: Rect,
    pub items: Vec<PlacedItem>,
    pub candidate: Option<CandidateOverlay>,
    pub menu: Option<MenuFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub field_type: FieldType,
    pub cell: GridRect,
    pub bounds: Rect,
    /// The section's own grid.
    pub nested: Option<Box<GridFrame>>,
}

/// The "add field" affordance over a free cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOverlay {
    pub position: GridPosition,
    pub bounds: Rect,
    pub label: &'static str,
}

/// The open type menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFrame {
    pub anchor: Rect,
    pub options: &'static [FieldType],
}

impl GridFrame {
    /// Depth-first walk over this grid and every nested one.
    pub fn grids(&self) -> Vec<&GridFrame> {
        let mut out = vec![self];
        for item in &self.items {
            if let Some(nested) = &item.nested {
                out.extend(nested.grids());
            }
        }
        out
    }

    /// The visible candidate, wherever it is.
    pub fn active_candidate(&self) -> Option<(&GridTarget, &CandidateOverlay)> {
        self.grids()
            .into_iter()
            .find_map(|grid| grid.candidate.as_ref().map(|c| (&grid.target, c)))
    }

    /// The open menu, wherever it is.
    pub fn active_menu(&self) -> Option<&MenuFrame> {
        self.grids().into_iter().find_map(|grid| grid.menu.as_ref())
    }

    pub fn find_item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.grids()
            .into_iter()
            .find_map(|grid| grid.items.iter().find(|item| &item.id == id))
    }
}
