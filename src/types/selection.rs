use serde::{Deserialize, Serialize};

use super::{CellRect, Pos};

/// Type of selection, which also decides how a drag of the selection moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All cells selected (corner click)
    All,
}

/// Cursor position plus the selected ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub selection_type: SelectionType,
    /// The cursor cell (where typing goes)
    pub cursor: Pos,
    /// Selected ranges; the last one is the one being extended
    pub ranges: Vec<CellRect>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::cell(Pos::new(1, 1))
    }
}

impl Selection {
    /// Single-cell selection at `cursor`
    pub fn cell(cursor: Pos) -> Self {
        Self {
            selection_type: SelectionType::CellRange,
            cursor,
            ranges: vec![CellRect::single(cursor)],
        }
    }

    /// Create a new cell range selection with the cursor at `start`
    pub fn cell_range(start: Pos, end: Pos) -> Self {
        Self {
            selection_type: SelectionType::CellRange,
            cursor: start,
            ranges: vec![CellRect::from_corners(start, end)],
        }
    }

    /// Create a row range selection
    pub fn row_range(start_row: i64, end_row: i64) -> Self {
        Self {
            selection_type: SelectionType::RowRange,
            cursor: Pos::new(1, start_row),
            ranges: vec![CellRect::rows(start_row, end_row)],
        }
    }

    /// Create a column range selection
    pub fn column_range(start_col: i64, end_col: i64) -> Self {
        Self {
            selection_type: SelectionType::ColumnRange,
            cursor: Pos::new(start_col, 1),
            ranges: vec![CellRect::columns(start_col, end_col)],
        }
    }

    /// Create a select-all selection
    pub fn all() -> Self {
        Self {
            selection_type: SelectionType::All,
            cursor: Pos::new(1, 1),
            ranges: vec![CellRect::new(1, 1, super::UNBOUNDED, super::UNBOUNDED)],
        }
    }

    /// Bounding rectangle of every range
    pub fn bounds(&self) -> CellRect {
        self.ranges
            .iter()
            .fold(None, |acc: Option<CellRect>, r| {
                Some(acc.map_or(*r, |a| a.union(r)))
            })
            .unwrap_or_else(|| CellRect::single(self.cursor))
    }

    /// Whether the given column is (partly) selected
    pub fn touches_column(&self, col: i64) -> bool {
        self.ranges.iter().any(|r| col >= r.x && col <= r.max_x())
    }

    /// Whether the given row is (partly) selected
    pub fn touches_row(&self, row: i64) -> bool {
        self.ranges.iter().any(|r| row >= r.y && row <= r.max_y())
    }

    /// Whether the given column is selected top to bottom
    pub fn is_full_column(&self, col: i64) -> bool {
        matches!(
            self.selection_type,
            SelectionType::ColumnRange | SelectionType::All
        ) && self.touches_column(col)
    }

    /// Whether the given row is selected left to right
    pub fn is_full_row(&self, row: i64) -> bool {
        matches!(
            self.selection_type,
            SelectionType::RowRange | SelectionType::All
        ) && self.touches_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union_of_ranges() {
        let mut sel = Selection::cell_range(Pos::new(2, 2), Pos::new(3, 3));
        sel.ranges.push(CellRect::new(6, 1, 1, 1));
        assert_eq!(sel.bounds(), CellRect::new(2, 1, 5, 3));
    }

    #[test]
    fn test_full_column_only_for_column_selection() {
        let cols = Selection::column_range(3, 4);
        assert!(cols.is_full_column(4));
        assert!(!cols.is_full_column(5));
        assert!(cols.touches_row(10_000));

        let cells = Selection::cell_range(Pos::new(3, 1), Pos::new(4, 2));
        assert!(cells.touches_column(3));
        assert!(!cells.is_full_column(3));
    }
}
