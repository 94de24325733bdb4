//! Grid and world-space rectangles.
//!
//! Grid rectangles use 1-based column/row indices. Overlap uses half-open
//! interval semantics, so rectangles that only share an edge never overlap.

use serde::{Deserialize, Serialize};

/// A cell position (column `x`, row `y`), 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Row count used for rectangles that cover whole columns (and vice versa).
pub const UNBOUNDED: i64 = i64::MAX / 4;

/// A rectangle of cells: origin (`x`, `y`) plus size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl CellRect {
    pub const fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// A single cell.
    pub const fn single(pos: Pos) -> Self {
        Self::new(pos.x, pos.y, 1, 1)
    }

    /// Build from two inclusive corners in any order.
    pub fn from_corners(a: Pos, b: Pos) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x + 1, a.y.max(b.y) - y + 1)
    }

    /// Whole columns `start..=end`.
    pub fn columns(start: i64, end: i64) -> Self {
        let x = start.min(end);
        Self::new(x, 1, start.max(end) - x + 1, UNBOUNDED)
    }

    /// Whole rows `start..=end`.
    pub fn rows(start: i64, end: i64) -> Self {
        let y = start.min(end);
        Self::new(1, y, UNBOUNDED, start.max(end) - y + 1)
    }

    /// Inclusive last column.
    pub fn max_x(&self) -> i64 {
        self.x + self.w - 1
    }

    /// Inclusive last row.
    pub fn max_y(&self) -> i64 {
        self.y + self.h - 1
    }

    pub fn origin(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn is_single_cell(&self) -> bool {
        self.w == 1 && self.h == 1
    }

    /// Half-open overlap test. Edge-adjacent rectangles do not overlap.
    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.x.saturating_add(other.w)
            && self.x.saturating_add(self.w) > other.x
            && self.y < other.y.saturating_add(other.h)
            && self.y.saturating_add(self.h) > other.y
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.max_x() && pos.y >= self.y && pos.y <= self.max_y()
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &CellRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    pub fn translate(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Intersection of two rectangles, or `None` if they do not overlap.
    pub fn intersection(&self, other: &CellRect) -> Option<CellRect> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        Some(Self::new(x, y, max_x - x + 1, max_y - y + 1))
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &CellRect) -> Self {
        Self::from_corners(
            Pos::new(self.x.min(other.x), self.y.min(other.y)),
            Pos::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y())),
        )
    }
}

/// A rectangle in world (unscaled pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_adjacent_rects_do_not_overlap() {
        let a = CellRect::new(1, 1, 2, 2);
        let right = CellRect::new(3, 1, 2, 2);
        let below = CellRect::new(1, 3, 2, 2);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&CellRect::new(2, 2, 1, 1)));
    }

    #[test]
    fn test_unbounded_columns_do_not_overflow() {
        let cols = CellRect::columns(3, 4);
        assert!(cols.overlaps(&CellRect::new(4, 1_000_000, 1, 1)));
        assert!(!cols.overlaps(&CellRect::new(5, 1, 1, 1)));
    }

    #[test]
    fn test_from_corners_normalizes() {
        let r = CellRect::from_corners(Pos::new(5, 2), Pos::new(3, 6));
        assert_eq!(r, CellRect::new(3, 2, 3, 5));
        assert_eq!(r.max_x(), 5);
        assert_eq!(r.max_y(), 6);
    }

    #[test]
    fn test_intersection_and_union() {
        let a = CellRect::new(1, 1, 4, 4);
        let b = CellRect::new(3, 3, 4, 4);
        assert_eq!(a.intersection(&b).unwrap(), CellRect::new(3, 3, 2, 2));
        assert_eq!(a.union(&b), CellRect::new(1, 1, 6, 6));
        assert!(a.intersection(&CellRect::new(5, 1, 1, 1)).is_none());
    }

    #[test]
    fn test_world_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.contains_point(10.0, 10.0));
    }
}
