//! Pixel-space primitives.
//!
//! Grid-space rectangles live in `formgrid_api`; these types carry the
//! results of mapping cells onto the container.

use std::ops::{Add, Sub};

/// A pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A pixel rectangle, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// The degenerate rectangle returned for unusable metrics.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// True if the two rectangles share any interior area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            ..*self
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(5.0, 15.0);
        assert_eq!(a + b, Point::new(15.0, 35.0));
        assert_eq!(a - b, Point::new(5.0, 5.0));
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(109.9, 69.9)));
        assert!(!rect.contains(Point::new(110.0, 40.0)));
        assert!(!rect.contains(Point::new(50.0, 70.0)));
        assert!(!rect.contains(Point::new(5.0, 40.0)));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 80.0, 60.0);
        let b = Rect::new(80.0, 0.0, 80.0, 60.0);
        let c = Rect::new(40.0, 30.0, 80.0, 60.0);

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn translate_moves_origin_only() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        let moved = r.translate(Point::new(5.0, -10.0));
        assert_eq!(moved, Rect::new(15.0, 10.0, 100.0, 50.0));
        assert_eq!(moved.origin(), Point::new(15.0, 10.0));
    }

    #[test]
    fn zero_rect_is_degenerate() {
        assert!(Rect::ZERO.is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
