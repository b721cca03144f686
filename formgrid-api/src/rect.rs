//! Grid-space rectangles.
//!
//! Grid units are cells: `x`/`w` count columns, `y`/`h` count rows.

use serde::{Deserialize, Serialize};

use crate::ItemId;

/// A cell-aligned position and span, without identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridPosition {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A single 1x1 cell.
    pub const fn cell(x: u32, y: u32) -> Self {
        Self { x, y, w: 1, h: 1 }
    }

    /// Exclusive right edge, in columns.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge, in rows.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn with_id(self, id: ItemId) -> GridRect {
        GridRect {
            id,
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// A placed item's rectangle inside one grid.
///
/// Serializes with the key `i` for the id, the shape layout substrates use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    #[serde(rename = "i", alias = "id")]
    pub id: ItemId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(id: impl Into<ItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn position(&self) -> GridPosition {
        GridPosition {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// Move and resize, keeping the id.
    pub fn set_position(&mut self, position: GridPosition) {
        self.x = position.x;
        self.y = position.y;
        self.w = position.w;
        self.h = position.h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_uses_short_id_key() {
        let rect = GridRect::new("a", 1, 2, 3, 4);
        let json = serde_json::to_value(&rect).unwrap();
        assert_eq!(json["i"], "a");
        assert_eq!(json["w"], 3);

        let parsed: GridRect =
            serde_json::from_str(r#"{"id":"b","x":0,"y":0,"w":1,"h":1}"#).unwrap();
        assert_eq!(parsed.id, ItemId::new("b"));
    }

    #[test]
    fn edges_are_exclusive() {
        let pos = GridPosition::new(1, 2, 3, 4);
        assert_eq!(pos.right(), 4);
        assert_eq!(pos.bottom(), 6);
        assert_eq!(GridPosition::cell(5, 6), GridPosition::new(5, 6, 1, 1));
    }

    #[test]
    fn set_position_keeps_identity() {
        let mut rect = GridRect::new("a", 0, 0, 1, 1);
        rect.set_position(GridPosition::new(2, 3, 2, 1));
        assert_eq!(rect, GridRect::new("a", 2, 3, 2, 1));
        assert_eq!(rect.position().with_id(ItemId::new("a")), rect);
    }
}
