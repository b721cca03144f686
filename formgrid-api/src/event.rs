//! Events the host UI delivers to the engine.

use serde::{Deserialize, Serialize};

use crate::{FieldType, GridRect, ItemId};

/// Which grid an event addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridTarget {
    /// The document's top-level grid.
    #[default]
    Root,
    /// The nested grid owned by the SECTION item with this id.
    Section(ItemId),
}

impl GridTarget {
    pub fn section_id(&self) -> Option<&ItemId> {
        match self {
            Self::Root => None,
            Self::Section(id) => Some(id),
        }
    }
}

/// Host events, processed strictly in delivery order.
///
/// Pointer coordinates are relative to the top-level grid container; the
/// engine maps them into nested grids itself. Drag, resize and layout events
/// come from the layout substrate of one specific grid, so they carry a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridEvent {
    /// Pointer moved over the grid area.
    PointerMoved { x: f32, y: f32 },

    /// Pointer left the grid area.
    PointerLeft,

    /// The "add field" overlay was clicked; opens the type menu.
    CandidateClicked,

    /// A type was picked from the open menu.
    MenuSelected(FieldType),

    /// The menu closed without a selection.
    MenuDismissed,

    DragStarted { target: GridTarget },

    /// Drag finished; `layout` is the substrate's authoritative result.
    DragStopped { target: GridTarget, layout: Vec<GridRect> },

    ResizeStarted { target: GridTarget },

    ResizeStopped { target: GridTarget, layout: Vec<GridRect> },

    /// The substrate re-laid out a grid (compaction, drag preview, mount).
    LayoutChanged { target: GridTarget, layout: Vec<GridRect> },

    /// The container was measured at a new pixel width.
    WidthChanged { width: f32 },
}
