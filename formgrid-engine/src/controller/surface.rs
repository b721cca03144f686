//! Form Surface
//!
//! The entry point a host talks to. Owns the current document value, the
//! root grid controller (and through it every nested one), the responsive
//! state and the id generator. Host events go in through [`FormSurface::handle`],
//! render descriptions come out of [`FormSurface::frame`].

use formgrid_api::{FieldType, GridEvent, GridRect, GridTarget, ItemId};

use super::{GridController, GridFrame};
use crate::breakpoint::ResolvedBreakpoint;
use crate::config::EngineConfig;
use crate::cursor::{SuspendReason, is_placeable};
use crate::document::Document;
use crate::error::{GridError, Result};
use crate::id_gen::{IdGenerator, UuidGenerator};
use crate::primitives::{Point, Rect};
use crate::responsive::ResponsiveState;

/// What handling one event did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Something visible changed: candidate, menu, layout or items.
    pub redraw: bool,
    /// The document value was replaced.
    pub document_changed: bool,
    /// Id of the item created by a menu selection.
    pub inserted: Option<ItemId>,
}

pub struct FormSurface {
    document: Document,
    root: GridController,
    responsive: Option<ResponsiveState>,
    ids: Box<dyn IdGenerator>,
}

impl FormSurface {
    /// A surface over `document` that mints UUID ids.
    pub fn new(config: EngineConfig, document: Document) -> Result<Self> {
        Self::with_id_generator(config, document, UuidGenerator)
    }

    pub fn with_id_generator(
        config: EngineConfig,
        document: Document,
        ids: impl IdGenerator + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let mut grid = config.grid;
        let responsive = match config.responsive {
            Some(responsive) => {
                let state = ResponsiveState::new(responsive, grid.container_width)?;
                grid.columns = state.active().columns;
                Some(state)
            }
            None => None,
        };

        let mut document = document;
        if let Some(state) = &responsive {
            let layout = state.initial_layout(document.layout())?;
            if layout.as_slice() != document.layout() {
                tracing::debug!(breakpoint = %state.active().name, "fitted layout to mount breakpoint");
                document = document.update_layout(&GridTarget::Root, layout)?;
            }
        }

        let mut surface = Self {
            document: Document::new(),
            root: GridController::root(grid)?,
            responsive,
            ids: Box::new(ids),
        };
        surface.adopt(document)?;
        tracing::debug!(
            items = surface.document.items().len(),
            columns = surface.root.config().columns,
            "form surface ready"
        );
        Ok(surface)
    }

    /// The current document snapshot.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> &GridController {
        &self.root
    }

    /// The controller of any grid in the tree.
    pub fn grid(&self, target: &GridTarget) -> Option<&GridController> {
        self.root.find(target)
    }

    /// Active breakpoint, in responsive mode.
    pub fn breakpoint(&self) -> Option<&ResolvedBreakpoint> {
        self.responsive.as_ref().map(ResponsiveState::active)
    }

    /// Render description for the whole tree.
    pub fn frame(&self) -> GridFrame {
        let config = self.root.config();
        let bounds = Rect::new(0.0, 0.0, config.container_width, self.root.content_height());
        self.root.frame(self.document.items(), bounds)
    }

    /// Apply one host event.
    pub fn handle(&mut self, event: GridEvent) -> Result<EventOutcome> {
        tracing::trace!(?event, "grid event");
        let before = self.document.clone();
        let mut inserted = None;

        let redraw = match event {
            GridEvent::PointerMoved { x, y } => {
                // The menu is modal.
                self.root.menu_owner().is_none() && self.root.pointer_moved(Point::new(x, y))
            }
            GridEvent::PointerLeft => self.root.pointer_left(),
            GridEvent::CandidateClicked => self.root.open_menu(),
            GridEvent::MenuSelected(field_type) => {
                let menu_open = self.root.menu_owner().is_some();
                inserted = self.insert_selected(field_type)?;
                menu_open
            }
            GridEvent::MenuDismissed => self
                .root
                .menu_owner_mut()
                .is_some_and(|grid| grid.cursor_mut().dismiss()),
            GridEvent::DragStarted { target } => self.begin(&target, SuspendReason::Drag)?,
            GridEvent::DragStopped { target, layout } => {
                self.finish(&target, &layout, SuspendReason::Drag)?
            }
            GridEvent::ResizeStarted { target } => self.begin(&target, SuspendReason::Resize)?,
            GridEvent::ResizeStopped { target, layout } => {
                self.finish(&target, &layout, SuspendReason::Resize)?
            }
            GridEvent::LayoutChanged { target, layout } => self.commit_layout(&target, &layout)?,
            GridEvent::WidthChanged { width } => self.width_changed(width)?,
        };

        let document_changed = !self.document.ptr_eq(&before);
        Ok(EventOutcome {
            redraw: redraw || document_changed,
            document_changed,
            inserted,
        })
    }

    fn begin(&mut self, target: &GridTarget, reason: SuspendReason) -> Result<bool> {
        if self.root.find(target).is_none() {
            return Err(not_found(target));
        }
        Ok(self.root.begin_interaction(reason))
    }

    fn finish(
        &mut self,
        target: &GridTarget,
        layout: &[GridRect],
        reason: SuspendReason,
    ) -> Result<bool> {
        let changed = self.commit_layout(target, layout)?;
        self.root.end_interaction(reason);
        Ok(changed)
    }

    /// Write a substrate layout back into the store and the document.
    fn commit_layout(&mut self, target: &GridTarget, layout: &[GridRect]) -> Result<bool> {
        let grid = self.root.find(target).ok_or_else(|| not_found(target))?;
        let store = grid.preview_layout(layout)?;
        if &store == grid.store() {
            return Ok(false);
        }
        let document = self.document.update_layout(target, store.all())?;
        self.adopt(document)?;
        Ok(true)
    }

    /// Turn the open menu's selection into a new item.
    fn insert_selected(&mut self, field_type: FieldType) -> Result<Option<ItemId>> {
        let Some(grid) = self.root.menu_owner_mut() else {
            return Ok(None);
        };
        let Some(request) = grid.cursor_mut().select(field_type) else {
            return Ok(None);
        };
        if !is_placeable(grid.config(), grid.store(), &request.position) {
            tracing::debug!(
                x = request.position.x,
                y = request.position.y,
                "candidate is no longer placeable; dropping selection"
            );
            return Ok(None);
        }
        let target = grid.target().clone();

        let (document, id) = match &target {
            GridTarget::Root => self.document.insert_top_level(
                request.field_type,
                request.position,
                self.ids.as_mut(),
            )?,
            GridTarget::Section(parent) => self.document.insert_nested(
                request.field_type,
                request.position,
                parent,
                self.ids.as_mut(),
            )?,
        };
        self.adopt(document)?;
        Ok(Some(id))
    }

    fn width_changed(&mut self, width: f32) -> Result<bool> {
        let mut config = self.root.config().clone().with_width(width);
        if let Some(state) = &self.responsive {
            config.columns = state.columns_for(width)?;
        }
        config.validate()?;

        let switch = match &mut self.responsive {
            Some(state) => state.width_changed(width, self.document.layout())?,
            None => None,
        };
        if &config == self.root.config() && switch.is_none() {
            return Ok(false);
        }

        self.root.set_config(config);
        let document = match switch {
            Some(switch) => self
                .document
                .update_layout(&GridTarget::Root, switch.layout)?,
            None => self.document.clone(),
        };
        self.adopt(document)?;
        Ok(true)
    }

    /// Make `document` current and bring every controller in line with it,
    /// writing back any layouts the nested grids had to clamp.
    fn adopt(&mut self, document: Document) -> Result<()> {
        let mut adjusted = Vec::new();
        self.root
            .sync(document.items(), document.layout(), &mut adjusted)?;

        let mut document = document;
        for (target, layout) in adjusted {
            document = document.update_layout(&target, layout)?;
        }
        self.document = document;
        Ok(())
    }
}

fn not_found(target: &GridTarget) -> GridError {
    match target {
        GridTarget::Section(id) => GridError::NotFound(id.clone()),
        GridTarget::Root => GridError::NotFound(ItemId::new("root")),
    }
}
