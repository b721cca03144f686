//! Placement Cursor
//!
//! Tracks the free cell under the pointer and the "add field" menu opened on
//! it. Every pointer move is validated on its own: bounds first, then
//! occupancy, so a candidate never covers a filled cell no matter how far the
//! pointer jumped between events.
//!
//! ```text
//!            move (free cell)            click
//!   Idle ───────────────────▶ Candidate ───────▶ Suspended(Menu)
//!    ▲  ◀── leave / occupied ──┘                   │ select / dismiss
//!    └─────────────────────────────────────────────┘
//!   drag/resize start ──▶ Suspended(Drag|Resize) ──stop──▶ Idle
//! ```

use formgrid_api::{FieldType, GridPosition};

use crate::config::{GridConfig, RowLimit};
use crate::geometry::{cell_at, position_rect};
use crate::layout_store::LayoutStore;
use crate::primitives::{Point, Rect};

/// Why the cursor stopped following the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendReason {
    /// The type menu is open on the candidate.
    Menu,
    Drag,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Idle,
    Candidate(GridPosition),
    Suspended {
        reason: SuspendReason,
        /// The candidate the menu is anchored to. Always `None` for drags.
        candidate: Option<GridPosition>,
    },
}

/// A confirmed "add this type here" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertRequest {
    pub field_type: FieldType,
    pub position: GridPosition,
}

#[derive(Debug, Clone, Default)]
pub struct PlacementCursor {
    state: CursorState,
}

impl PlacementCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// The candidate, if one is being offered and not frozen by a drag.
    ///
    /// Stays visible while the menu is open so the menu has an anchor.
    pub fn candidate(&self) -> Option<GridPosition> {
        match self.state {
            CursorState::Candidate(pos) => Some(pos),
            CursorState::Suspended {
                reason: SuspendReason::Menu,
                candidate,
            } => candidate,
            _ => None,
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self.state, CursorState::Suspended { .. })
    }

    pub fn is_menu_open(&self) -> bool {
        matches!(
            self.state,
            CursorState::Suspended {
                reason: SuspendReason::Menu,
                ..
            }
        )
    }

    /// Pixel anchor of the open menu.
    pub fn menu_anchor(&self, config: &GridConfig) -> Option<Rect> {
        match self.state {
            CursorState::Suspended {
                reason: SuspendReason::Menu,
                candidate: Some(pos),
            } => Some(position_rect(config, &pos)),
            _ => None,
        }
    }

    /// Re-evaluate the candidate for a pointer position in grid-local pixels.
    ///
    /// Returns true if the visible candidate changed.
    pub fn pointer_moved(&mut self, config: &GridConfig, point: Point, store: &LayoutStore) -> bool {
        if self.is_suspended() {
            return false;
        }

        let next = cell_at(config, point).filter(|cell| is_placeable(config, store, cell));

        match next {
            Some(cell) if self.state == CursorState::Candidate(cell) => false,
            Some(cell) => {
                tracing::trace!(x = cell.x, y = cell.y, "placement candidate");
                self.state = CursorState::Candidate(cell);
                true
            }
            None => self.clear(),
        }
    }

    /// Pointer left the grid (or moved into a nested one).
    pub fn pointer_left(&mut self) -> bool {
        if self.is_suspended() {
            return false;
        }
        self.clear()
    }

    /// Drop the candidate unless the menu is open. Returns true if it was showing.
    pub fn clear(&mut self) -> bool {
        match self.state {
            CursorState::Candidate(_) => {
                self.state = CursorState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Freeze for a drag or resize. The open menu wins over a drag.
    pub fn begin_interaction(&mut self, reason: SuspendReason) -> bool {
        if self.is_menu_open() {
            return false;
        }
        let had_candidate = self.candidate().is_some();
        self.state = CursorState::Suspended {
            reason,
            candidate: None,
        };
        had_candidate
    }

    /// Thaw after the drag or resize that froze the cursor.
    pub fn end_interaction(&mut self, reason: SuspendReason) {
        if let CursorState::Suspended { reason: current, .. } = self.state {
            if current == reason {
                self.state = CursorState::Idle;
            }
        }
    }

    /// Open the type menu on the current candidate, returning its anchor.
    pub fn open_menu(&mut self, config: &GridConfig) -> Option<Rect> {
        let CursorState::Candidate(pos) = self.state else {
            return None;
        };
        self.state = CursorState::Suspended {
            reason: SuspendReason::Menu,
            candidate: Some(pos),
        };
        Some(position_rect(config, &pos))
    }

    /// Confirm a type. Closes the menu and consumes the candidate.
    pub fn select(&mut self, field_type: FieldType) -> Option<InsertRequest> {
        let CursorState::Suspended {
            reason: SuspendReason::Menu,
            candidate: Some(position),
        } = self.state
        else {
            return None;
        };
        self.state = CursorState::Idle;
        Some(InsertRequest {
            field_type,
            position,
        })
    }

    /// Close the menu without inserting.
    pub fn dismiss(&mut self) -> bool {
        if self.is_menu_open() {
            self.state = CursorState::Idle;
            true
        } else {
            false
        }
    }
}

/// Whether a new item may be placed at `cell`: inside the columns, clear of
/// every stored rectangle, and within the row limit.
pub(crate) fn is_placeable(config: &GridConfig, store: &LayoutStore, cell: &GridPosition) -> bool {
    let within_rows = match config.row_limit {
        RowLimit::Unbounded => true,
        RowLimit::ContentHeight => cell.bottom() <= store.bottom().max(1),
    };
    cell.right() <= config.columns && within_rows && store.find_collision(cell, None).is_none()
}
