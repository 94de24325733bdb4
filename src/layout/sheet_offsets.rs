//! Column/row sizes and the conversions between indices and world pixels.
//!
//! The grid is unbounded, so positions are not pre-computed like a finite
//! sheet would be. Each axis stores a default size plus sparse overrides and
//! derives positions by walking the overrides in order, which keeps lookups
//! O(overrides) regardless of how far the user has scrolled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::types::{CellRect, Pos, Rect};

/// One axis (columns or rows) of the coordinate space. Indices are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    default_size: f64,
    /// Index -> size, only for indices that differ from `default_size`.
    sizes: BTreeMap<i64, f64>,
}

impl Axis {
    pub fn new(default_size: f64) -> Self {
        Self {
            default_size,
            sizes: BTreeMap::new(),
        }
    }

    pub fn default_size(&self) -> f64 {
        self.default_size
    }

    pub fn size(&self, index: i64) -> f64 {
        self.sizes.get(&index).copied().unwrap_or(self.default_size)
    }

    /// Set the size of one index (0 hides it). Negative sizes clamp to 0.
    pub fn set_size(&mut self, index: i64, size: f64) {
        let size = size.max(0.0);
        if (size - self.default_size).abs() < f64::EPSILON {
            self.sizes.remove(&index);
        } else {
            self.sizes.insert(index, size);
        }
    }

    pub fn reset_size(&mut self, index: i64) {
        self.sizes.remove(&index);
    }

    /// World position of the start of `index`. Index 1 starts at 0; indices
    /// before 1 extend into negative space at the default size.
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: i64) -> f64 {
        let mut pos = (index - 1) as f64 * self.default_size;
        for (_, &size) in self.sizes.range(1..index.max(1)) {
            pos += size - self.default_size;
        }
        pos
    }

    /// Start position and size of `index`.
    pub fn position_size(&self, index: i64) -> (f64, f64) {
        (self.position(index), self.size(index))
    }

    /// Index containing world position `pos` and that index's start.
    ///
    /// Positions before 0 map to index 1 (the grid has nothing left/above it).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )]
    pub fn index_at(&self, pos: f64) -> (i64, f64) {
        if pos <= 0.0 || !pos.is_finite() {
            return (1, 0.0);
        }
        let mut start = 0.0;
        let mut index: i64 = 1;
        for (&i, &size) in self.sizes.range(1..) {
            // Default-sized run between `index` and the override at `i`.
            let run = (i - index) as f64 * self.default_size;
            if pos < start + run {
                let steps = ((pos - start) / self.default_size).floor() as i64;
                return (index + steps, start + steps as f64 * self.default_size);
            }
            start += run;
            if pos < start + size {
                return (i, start);
            }
            start += size;
            index = i + 1;
        }
        let steps = ((pos - start) / self.default_size).floor() as i64;
        (index + steps, start + steps as f64 * self.default_size)
    }

    /// Inclusive index range covering world span `[from, to)`.
    pub fn range_for(&self, from: f64, to: f64) -> (i64, i64) {
        let (first, _) = self.index_at(from);
        let (mut last, last_start) = self.index_at(to);
        if last > first && to <= last_start {
            last -= 1;
        }
        (first, last.max(first))
    }
}

/// Column widths and row heights of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetOffsets {
    pub columns: Axis,
    pub rows: Axis,
}

impl Default for SheetOffsets {
    fn default() -> Self {
        Self::new(100.0, 21.0)
    }
}

impl SheetOffsets {
    pub fn new(default_column_width: f64, default_row_height: f64) -> Self {
        Self {
            columns: Axis::new(default_column_width),
            rows: Axis::new(default_row_height),
        }
    }

    /// Offsets using the configured default column width and row height.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.default_column_width, config.default_row_height)
    }

    pub fn column_position_size(&self, col: i64) -> (f64, f64) {
        self.columns.position_size(col)
    }

    pub fn row_position_size(&self, row: i64) -> (f64, f64) {
        self.rows.position_size(row)
    }

    /// Column at world x, plus the column's left edge.
    pub fn column_from_x(&self, x: f64) -> (i64, f64) {
        self.columns.index_at(x)
    }

    /// Row at world y, plus the row's top edge.
    pub fn row_from_y(&self, y: f64) -> (i64, f64) {
        self.rows.index_at(y)
    }

    /// Cell under a world point.
    pub fn cell_at(&self, x: f64, y: f64) -> Pos {
        Pos::new(self.column_from_x(x).0, self.row_from_y(y).0)
    }

    /// World rectangle of a single cell.
    pub fn cell_rect(&self, pos: Pos) -> Rect {
        self.rect_for_cells(&CellRect::single(pos))
    }

    /// World rectangle covering a cell rectangle.
    pub fn rect_for_cells(&self, cells: &CellRect) -> Rect {
        let x = self.columns.position(cells.x);
        let y = self.rows.position(cells.y);
        let right = self.columns.position(cells.x.saturating_add(cells.w));
        let bottom = self.rows.position(cells.y.saturating_add(cells.h));
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Cells touched by a world rectangle.
    pub fn cells_in(&self, rect: &Rect) -> CellRect {
        let (x0, x1) = self.columns.range_for(rect.x, rect.right());
        let (y0, y1) = self.rows.range_for(rect.y, rect.bottom());
        CellRect::from_corners(Pos::new(x0, y0), Pos::new(x1, y1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn offsets() -> SheetOffsets {
        let mut o = SheetOffsets::new(100.0, 20.0);
        o.columns.set_size(3, 50.0);
        o.columns.set_size(5, 0.0);
        o.rows.set_size(2, 40.0);
        o
    }

    #[test]
    fn test_default_positions() {
        let o = SheetOffsets::new(100.0, 20.0);
        assert_eq!(o.column_position_size(1), (0.0, 100.0));
        assert_eq!(o.column_position_size(4), (300.0, 100.0));
        assert_eq!(o.row_position_size(11), (200.0, 20.0));
    }

    #[test]
    fn test_positions_with_overrides() {
        let o = offsets();
        assert_eq!(o.column_position_size(3), (200.0, 50.0));
        assert_eq!(o.column_position_size(4), (250.0, 100.0));
        assert_eq!(o.column_position_size(5), (350.0, 0.0));
        assert_eq!(o.column_position_size(6), (350.0, 100.0));
        assert_eq!(o.row_position_size(3), (60.0, 20.0));
    }

    #[test]
    fn test_index_at_round_trips_through_overrides() {
        let o = offsets();
        assert_eq!(o.column_from_x(0.0), (1, 0.0));
        assert_eq!(o.column_from_x(199.0), (2, 100.0));
        assert_eq!(o.column_from_x(200.0), (3, 200.0));
        assert_eq!(o.column_from_x(249.9), (3, 200.0));
        assert_eq!(o.column_from_x(250.0), (4, 250.0));
        // Hidden column 5 has no pixels; 350 belongs to column 6.
        assert_eq!(o.column_from_x(350.0), (6, 350.0));
        assert_eq!(o.column_from_x(1_350.0), (16, 1_350.0));
        assert_eq!(o.row_from_y(25.0), (2, 20.0));
        assert_eq!(o.row_from_y(60.0), (3, 60.0));
    }

    #[test]
    fn test_negative_world_maps_to_first_index() {
        let o = offsets();
        assert_eq!(o.column_from_x(-500.0), (1, 0.0));
        assert_eq!(o.columns.position(0), -100.0);
    }

    #[test]
    fn test_rect_for_cells() {
        let o = offsets();
        let r = o.rect_for_cells(&CellRect::new(2, 1, 2, 2));
        assert_eq!(r, Rect::new(100.0, 0.0, 150.0, 60.0));
    }

    #[test]
    fn test_cells_in_excludes_trailing_edge() {
        let o = SheetOffsets::new(100.0, 20.0);
        let cells = o.cells_in(&Rect::new(0.0, 0.0, 200.0, 40.0));
        assert_eq!(cells, CellRect::new(1, 1, 2, 2));
        let cells = o.cells_in(&Rect::new(50.0, 10.0, 200.0, 40.0));
        assert_eq!(cells, CellRect::new(1, 1, 3, 3));
    }

    #[test]
    fn test_setting_default_size_removes_override() {
        let mut axis = Axis::new(10.0);
        axis.set_size(4, 30.0);
        axis.set_size(4, 10.0);
        assert_eq!(axis.position(10), 90.0);
    }

    #[test]
    fn test_overrides_before_first_index_are_ignored() {
        let mut axis = Axis::new(100.0);
        axis.set_size(0, 40.0);
        axis.set_size(-3, 10.0);
        assert_eq!(axis.position(2), 100.0);
        assert_eq!(axis.index_at(150.0), (2, 100.0));
        assert_eq!(axis.index_at(99.0), (1, 0.0));
    }

    #[test]
    fn test_from_config_uses_configured_sizes() {
        let config = RenderConfig {
            default_column_width: 50.0,
            default_row_height: 30.0,
            ..RenderConfig::default()
        };
        let o = SheetOffsets::from_config(&config);
        assert_eq!(o.column_position_size(3), (100.0, 50.0));
        assert_eq!(o.row_position_size(2), (30.0, 30.0));
    }
}
