//! Formgrid API - Shared types for the form-builder grid engine.
//!
//! Everything the host UI and the engine exchange lives here: item identity,
//! field types, grid rectangles, and the events the host feeds into the engine.

mod event;
mod field;
mod rect;

pub use event::*;
pub use field::*;
pub use rect::*;
