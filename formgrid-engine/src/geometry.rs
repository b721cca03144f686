//! Cell ↔ pixel geometry.
//!
//! Columns share the container width evenly after subtracting the gaps
//! between them and the padding on both sides. Rows have a fixed height.
//! Every cell advances by its size plus one margin, so an item spanning `w`
//! columns also covers the `w - 1` gaps inside it.

use formgrid_api::GridPosition;

use crate::config::GridConfig;
use crate::primitives::{Point, Rect};

/// Width of a single column in pixels.
///
/// Returns 0 when the metrics cannot produce a usable column (no columns,
/// no width, or gaps wider than the container).
pub fn column_width(config: &GridConfig) -> f32 {
    if config.columns == 0 || !(config.container_width > 0.0) {
        return 0.0;
    }
    let [margin_x, _] = config.margin;
    let [padding_x, _] = config.container_padding;
    let columns = config.columns as f32;
    let width = (config.container_width - (columns - 1.0) * margin_x - 2.0 * padding_x) / columns;
    width.max(0.0)
}

/// Pixel rectangle of the span starting at cell `(x, y)`.
///
/// Degenerate metrics give [`Rect::ZERO`] rather than an error; configuration
/// is validated before a grid is built.
pub fn cell_to_pixel_rect(config: &GridConfig, x: u32, y: u32, w: u32, h: u32) -> Rect {
    let col_width = column_width(config);
    if col_width <= 0.0 {
        return Rect::ZERO;
    }
    let [margin_x, margin_y] = config.margin;
    let [padding_x, padding_y] = config.container_padding;
    let row_height = config.row_height;

    Rect {
        left: padding_x + x as f32 * (col_width + margin_x),
        top: padding_y + y as f32 * (row_height + margin_y),
        width: w as f32 * col_width + w.saturating_sub(1) as f32 * margin_x,
        height: h as f32 * row_height + h.saturating_sub(1) as f32 * margin_y,
    }
}

/// Pixel rectangle of a grid position.
#[inline]
pub fn position_rect(config: &GridConfig, position: &GridPosition) -> Rect {
    cell_to_pixel_rect(config, position.x, position.y, position.w, position.h)
}

/// The cell under a pointer, if the pointer maps into the grid.
///
/// Points in the padding or margin strips resolve to the cell whose stride
/// they fall in. Columns are bounded by the column count; rows are not.
/// Metrics without a usable column map nothing.
pub fn cell_at(config: &GridConfig, point: Point) -> Option<GridPosition> {
    let col_width = column_width(config);
    if col_width <= 0.0 || !(config.row_height > 0.0) {
        return None;
    }
    let stride_x = col_width + config.margin[0];
    let stride_y = config.row_height + config.margin[1];

    let col = ((point.x - config.container_padding[0]) / stride_x).floor();
    let row = ((point.y - config.container_padding[1]) / stride_y).floor();
    if !(col.is_finite() && row.is_finite()) || col < 0.0 || row < 0.0 {
        return None;
    }
    if col >= config.columns as f32 {
        return None;
    }
    Some(GridPosition::cell(col as u32, row as u32))
}

/// Pixel height of a grid holding `rows` rows, padding included.
pub fn container_height(config: &GridConfig, rows: u32) -> f32 {
    let [_, margin_y] = config.margin;
    let [_, padding_y] = config.container_padding;
    if rows == 0 {
        return 2.0 * padding_y;
    }
    rows as f32 * config.row_height + (rows - 1) as f32 * margin_y + 2.0 * padding_y
}

/// Whether two grid spans share a cell. Spans are half-open on both axes.
#[inline]
pub fn rects_overlap(a: &GridPosition, b: &GridPosition) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}
