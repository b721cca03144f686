//! Grid Controller
//!
//! One controller per grid instance. It owns that grid's layout store and
//! placement cursor, and one child controller per SECTION item in the grid.
//! A child is the same component with narrower metrics: its column count is
//! the section's width in columns and its container is the section's box.
//!
//! Controllers never own document data. Their stores mirror the document's
//! layouts and are re-synced from it whenever the document changes.

mod frame;
mod surface;

pub use frame::{ADD_FIELD_LABEL, CandidateOverlay, GridFrame, MenuFrame, PlacedItem};
pub use surface::{EventOutcome, FormSurface};

use formgrid_api::{FieldType, GridRect, GridTarget, ItemId};
use indexmap::IndexMap;

use crate::config::GridConfig;
use crate::cursor::{PlacementCursor, SuspendReason};
use crate::document::Item;
use crate::error::{GridError, Result};
use crate::geometry::{container_height, position_rect};
use crate::layout_store::LayoutStore;
use crate::primitives::{Point, Rect};

/// Layouts the controllers had to adjust while syncing, to be written back.
pub(crate) type Adjustments = Vec<(GridTarget, Vec<GridRect>)>;

#[derive(Debug, Clone)]
pub struct GridController {
    target: GridTarget,
    config: GridConfig,
    store: LayoutStore,
    cursor: PlacementCursor,
    sections: IndexMap<ItemId, GridController>,
}

impl GridController {
    /// The top-level grid. Its configuration must be valid.
    pub(crate) fn root(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(GridTarget::Root, config))
    }

    /// A section's grid. Metrics are derived, so they are not validated;
    /// a collapsed section simply maps to zero-sized rectangles.
    fn nested(id: ItemId, config: GridConfig) -> Self {
        Self::with_config(GridTarget::Section(id), config)
    }

    fn with_config(target: GridTarget, config: GridConfig) -> Self {
        Self {
            target,
            config,
            store: LayoutStore::new(),
            cursor: PlacementCursor::new(),
            sections: IndexMap::new(),
        }
    }

    pub fn target(&self) -> &GridTarget {
        &self.target
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn cursor(&self) -> &PlacementCursor {
        &self.cursor
    }

    /// The child controller of a section in this grid.
    pub fn section(&self, id: &ItemId) -> Option<&GridController> {
        self.sections.get(id)
    }

    /// Find the controller for `target` in this subtree.
    pub fn find(&self, target: &GridTarget) -> Option<&GridController> {
        if &self.target == target {
            return Some(self);
        }
        self.sections.values().find_map(|s| s.find(target))
    }

    pub(crate) fn find_mut(&mut self, target: &GridTarget) -> Option<&mut GridController> {
        if &self.target == target {
            return Some(self);
        }
        self.sections.values_mut().find_map(|s| s.find_mut(target))
    }

    /// The controller whose type menu is open, if any.
    pub fn menu_owner(&self) -> Option<&GridController> {
        if self.cursor.is_menu_open() {
            return Some(self);
        }
        self.sections.values().find_map(|s| s.menu_owner())
    }

    pub(crate) fn menu_owner_mut(&mut self) -> Option<&mut GridController> {
        if self.cursor.is_menu_open() {
            return Some(self);
        }
        self.sections.values_mut().find_map(|s| s.menu_owner_mut())
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut PlacementCursor {
        &mut self.cursor
    }

    /// Swap metrics. A changed geometry invalidates the candidate, and a
    /// changed column count also closes the menu, whose cell may no longer
    /// exist. Returns true if a candidate or menu went away.
    pub(crate) fn set_config(&mut self, config: GridConfig) -> bool {
        if self.config == config {
            return false;
        }
        let mut changed = false;
        if self.config.columns != config.columns && self.cursor.dismiss() {
            tracing::debug!(grid = ?self.target, "column count changed; closed the type menu");
            changed = true;
        }
        self.config = config;
        changed | self.cursor.clear()
    }

    /// Pixel box of a section in this grid's local coordinates.
    fn section_bounds(&self, id: &ItemId) -> Option<Rect> {
        self.store
            .get(id)
            .map(|rect| position_rect(&self.config, &rect.position()))
    }

    /// Metrics for the grid inside the section occupying `rect`.
    fn nested_config(&self, rect: &GridRect) -> GridConfig {
        let bounds = position_rect(&self.config, &rect.position());
        GridConfig {
            columns: rect.w.max(1),
            container_width: bounds.width,
            ..self.config.clone()
        }
    }

    /// Mirror the document's view of this grid: load the layout, then create,
    /// reconfigure or drop child controllers to match the sections.
    ///
    /// Nested layouts that no longer fit their section are clamped, and the
    /// clamped layouts are reported through `adjusted`.
    pub(crate) fn sync(
        &mut self,
        items: &[Item],
        layout: &[GridRect],
        adjusted: &mut Adjustments,
    ) -> Result<()> {
        if self.store.iter().ne(layout.iter()) {
            self.store = LayoutStore::from_rects(layout.iter().cloned())?;
        }
        if matches!(self.target, GridTarget::Section(_))
            && self.store.clamp_to_columns(self.config.columns)
        {
            tracing::debug!(grid = ?self.target, "clamped nested layout to section width");
            adjusted.push((self.target.clone(), self.store.all()));
        }

        self.sections
            .retain(|id, _| items.iter().any(|item| item.id() == id && item.is_section()));

        for item in items {
            let (Some(children), Some(child_layout)) = (item.children(), item.child_layout())
            else {
                continue;
            };
            let rect = self
                .store
                .get(item.id())
                .ok_or_else(|| GridError::NotFound(item.id().clone()))?;
            let config = self.nested_config(rect);
            let nested = self
                .sections
                .entry(item.id().clone())
                .or_insert_with(|| GridController::nested(item.id().clone(), config.clone()));
            nested.set_config(config);
            nested.sync(children, child_layout, adjusted)?;
        }
        Ok(())
    }

    /// Route a pointer position (local pixels) to this grid or the section
    /// under it. Returns true if any candidate changed.
    pub(crate) fn pointer_moved(&mut self, point: Point) -> bool {
        let hovered = self.sections.keys().enumerate().find_map(|(index, id)| {
            self.section_bounds(id)
                .filter(|bounds| bounds.contains(point))
                .map(|bounds| (index, bounds))
        });

        let mut changed = false;
        match hovered {
            Some((index, bounds)) => {
                changed |= self.cursor.pointer_left();
                for (i, nested) in self.sections.values_mut().enumerate() {
                    if i == index {
                        changed |= nested.pointer_moved(point - bounds.origin());
                    } else {
                        changed |= nested.pointer_left();
                    }
                }
            }
            None => {
                for nested in self.sections.values_mut() {
                    changed |= nested.pointer_left();
                }
                changed |= self.cursor.pointer_moved(&self.config, point, &self.store);
            }
        }
        changed
    }

    pub(crate) fn pointer_left(&mut self) -> bool {
        let mut changed = self.cursor.pointer_left();
        for nested in self.sections.values_mut() {
            changed |= nested.pointer_left();
        }
        changed
    }

    /// Open the type menu on whichever grid shows a candidate.
    pub(crate) fn open_menu(&mut self) -> bool {
        if self.cursor.open_menu(&self.config).is_some() {
            return true;
        }
        self.sections.values_mut().any(|s| s.open_menu())
    }

    /// Freeze every cursor in the subtree for a drag or resize.
    pub(crate) fn begin_interaction(&mut self, reason: SuspendReason) -> bool {
        let mut changed = self.cursor.begin_interaction(reason);
        for nested in self.sections.values_mut() {
            changed |= nested.begin_interaction(reason);
        }
        changed
    }

    pub(crate) fn end_interaction(&mut self, reason: SuspendReason) {
        self.cursor.end_interaction(reason);
        for nested in self.sections.values_mut() {
            nested.end_interaction(reason);
        }
    }

    /// The layout that results from a substrate delivery, without applying it.
    ///
    /// Nested grids keep items inside the section's columns.
    pub(crate) fn preview_layout(&self, delivered: &[GridRect]) -> Result<LayoutStore> {
        let mut store = self.store.clone();
        store.replace_all(delivered)?;
        if matches!(self.target, GridTarget::Section(_)) {
            store.clamp_to_columns(self.config.columns);
        }
        Ok(store)
    }

    /// Describe this grid for rendering. `bounds` is where the grid sits in
    /// top-level pixels.
    pub(crate) fn frame(&self, items: &[Item], bounds: Rect) -> GridFrame {
        let origin = bounds.origin();
        let placed = items
            .iter()
            .filter_map(|item| {
                let cell = self.store.get(item.id())?;
                let item_bounds = position_rect(&self.config, &cell.position()).translate(origin);
                let nested = match (self.sections.get(item.id()), item.children()) {
                    (Some(child), Some(children)) => {
                        Some(Box::new(child.frame(children, item_bounds)))
                    }
                    _ => None,
                };
                Some(PlacedItem {
                    id: item.id().clone(),
                    field_type: item.field_type(),
                    cell: cell.clone(),
                    bounds: item_bounds,
                    nested,
                })
            })
            .collect();

        let candidate = self.cursor.candidate().map(|position| CandidateOverlay {
            position,
            bounds: position_rect(&self.config, &position).translate(origin),
            label: ADD_FIELD_LABEL,
        });
        let menu = self.cursor.menu_anchor(&self.config).map(|anchor| MenuFrame {
            anchor: anchor.translate(origin),
            options: FieldType::ALL,
        });

        GridFrame {
            target: self.target.clone(),
            columns: self.config.columns,
            bounds,
            items: placed,
            candidate,
            menu,
        }
    }

    /// Pixel height the grid's content needs.
    pub fn content_height(&self) -> f32 {
        container_height(&self.config, self.store.bottom())
    }
}
