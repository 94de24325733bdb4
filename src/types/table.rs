//! Table metadata as reported by the data model, and the ephemeral bounds
//! snapshot used for a single collision check.

use serde::{Deserialize, Serialize};

use super::{CellRect, Pos};

/// A table-like region on a sheet: a data table, a code output, or a single
/// code cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Anchor cell; unique per sheet.
    pub anchor: Pos,
    pub name: String,
    /// Full extent including the name row and column header row.
    pub rect: CellRect,
    #[serde(default)]
    pub show_name: bool,
    #[serde(default)]
    pub show_columns: bool,
    /// Output of a code cell (as opposed to imported data).
    #[serde(default)]
    pub is_code: bool,
    /// Visible column header labels, left to right.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl TableInfo {
    /// Row holding the table name, if shown.
    pub fn name_row(&self) -> Option<i64> {
        self.show_name.then_some(self.rect.y)
    }

    /// Row holding the column headers, if shown.
    pub fn column_header_row(&self) -> Option<i64> {
        if !self.show_columns {
            return None;
        }
        Some(self.rect.y + i64::from(self.show_name))
    }

    /// Rows below the name and header rows.
    pub fn body_rect(&self) -> CellRect {
        let skip = i64::from(self.show_name) + i64::from(self.show_columns);
        CellRect::new(self.rect.x, self.rect.y + skip, self.rect.w, self.rect.h - skip)
    }

    pub fn is_single_cell(&self) -> bool {
        self.rect.is_single_cell()
    }

    pub fn bounds(&self) -> TableBounds {
        TableBounds::from(self)
    }
}

/// Snapshot of a table region at one point in time, used for one collision
/// check and then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBounds {
    pub anchor: Pos,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub has_name_row: bool,
    pub is_code_table: bool,
    pub is_single_cell: bool,
}

impl TableBounds {
    pub fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.width, self.height)
    }

    /// The one-row band occupied by the table name.
    pub fn name_row_band(&self) -> Option<CellRect> {
        self.has_name_row
            .then(|| CellRect::new(self.x, self.y, self.width, 1))
    }

    /// Same table moved by `(dx, dy)`, clamped so it never leaves the grid.
    pub fn projected(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: (self.x + dx).max(1),
            y: (self.y + dy).max(1),
            ..*self
        }
    }
}

impl From<&TableInfo> for TableBounds {
    fn from(table: &TableInfo) -> Self {
        Self {
            anchor: table.anchor,
            x: table.rect.x,
            y: table.rect.y,
            width: table.rect.w,
            height: table.rect.h,
            has_name_row: table.show_name,
            is_code_table: table.is_code,
            is_single_cell: table.is_single_cell(),
        }
    }
}
