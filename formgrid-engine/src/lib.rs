//! Formgrid Engine: grid placement for a form builder.
//!
//! The engine owns the interaction rules of a drag-and-drop form canvas:
//! - Pixel/cell geometry for a fixed-column, fixed-row-height grid
//! - A placement cursor that offers free cells under the pointer
//! - A type menu that turns the offered cell into a new item
//! - SECTION items that carry their own nested grid
//! - Optional responsive column counts driven by the container width
//!
//! # Architecture
//!
//! The [`Document`] is an immutable value holding the form tree. A
//! [`FormSurface`] owns the current document plus one [`GridController`] per
//! grid (root and every section). Host events go in through
//! [`FormSurface::handle`]; the host renders from [`FormSurface::frame`].
//!
//! ```ignore
//! use formgrid_engine::{Document, EngineConfig, FormSurface, SequentialIds};
//! use formgrid_api::{FieldType, GridEvent};
//!
//! let document = Document::sample(&mut SequentialIds::new("seed"));
//! let mut surface = FormSurface::new(EngineConfig::default(), document)?;
//! surface.handle(GridEvent::PointerMoved { x: 200.0, y: 90.0 })?;
//! surface.handle(GridEvent::CandidateClicked)?;
//! let outcome = surface.handle(GridEvent::MenuSelected(FieldType::Header))?;
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;
pub mod geometry;

// Layout state
pub mod breakpoint;
pub mod responsive;
pub mod layout_store;
pub mod cursor;

// Document model
pub mod document;
pub mod id_gen;

// Controllers
pub mod controller;

pub use breakpoint::{Breakpoint, BreakpointTable, ResolvedBreakpoint};
pub use config::{EngineConfig, GridConfig, RowLimit};
pub use controller::{
    ADD_FIELD_LABEL, CandidateOverlay, EventOutcome, FormSurface, GridController, GridFrame,
    MenuFrame, PlacedItem,
};
pub use cursor::{CursorState, InsertRequest, PlacementCursor, SuspendReason};
pub use document::{Document, DocumentDelta, Item};
pub use error::{GridError, Result};
pub use id_gen::{IdGenerator, SequentialIds, UuidGenerator};
pub use layout_store::LayoutStore;
pub use primitives::{Point, Rect};
pub use responsive::{BreakpointPolicy, BreakpointSwitch, ResponsiveConfig};
