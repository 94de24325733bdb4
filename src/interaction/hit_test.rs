//! What is under a screen point.

use crate::grid::SheetData;
use crate::layout::Viewport;
use crate::render::layers::{docked_header, validation_at};
use crate::types::{Pos, ValidationCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Corner box where the headings meet.
    Corner,
    ColumnHeading(i64),
    RowHeading(i64),
    /// A table's name row.
    TableName { anchor: Pos },
    /// A docked column header cell.
    DockedHeader { anchor: Pos, column: i64 },
    Validation(ValidationCell),
    Cell(Pos),
}

/// Classify screen point `(sx, sy)`.
pub fn hit_test(viewport: &Viewport, sheet: &dyn SheetData, sx: f64, sy: f64) -> HitTarget {
    let (hw, hh) = viewport.heading_size();
    let offsets = sheet.offsets();
    let (wx, wy) = viewport.screen_to_world(sx, sy);
    let pos = offsets.cell_at(wx, wy);

    match (sx < hw, sy < hh) {
        (true, true) => return HitTarget::Corner,
        (false, true) => return HitTarget::ColumnHeading(pos.x),
        (true, false) => return HitTarget::RowHeading(pos.y),
        (false, false) => {}
    }

    // Docked headers sit on top of the content at the top edge.
    let visible_top = viewport.visible_bounds().y;
    for table in sheet.tables() {
        if table.rect.x > pos.x || pos.x > table.rect.max_x() {
            continue;
        }
        if let Some(docked) = docked_header(table, offsets, visible_top) {
            let height = offsets.rows.size(docked.header_row) * viewport.scale();
            if sy < hh + height {
                return HitTarget::DockedHeader {
                    anchor: docked.anchor,
                    column: pos.x,
                };
            }
        }
    }

    if let Some(table) = sheet.table_at(pos) {
        if table.name_row() == Some(pos.y) {
            return HitTarget::TableName {
                anchor: table.anchor,
            };
        }
    }
    if let Some(validation) = validation_at(sheet, wx, wy) {
        return HitTarget::Validation(validation);
    }
    HitTarget::Cell(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::grid::MemorySheet;
    use crate::types::{CellRect, TableInfo};

    fn setup() -> (Viewport, MemorySheet) {
        let mut viewport = Viewport::new(800.0, 600.0, &RenderConfig::default());
        viewport.set_heading_size(30.0, 21.0);
        viewport.reset_to_origin();
        let sheet = MemorySheet::default().with_table(TableInfo {
            anchor: Pos::new(2, 2),
            name: "T".to_string(),
            rect: CellRect::new(2, 2, 2, 30),
            show_name: true,
            show_columns: true,
            is_code: false,
            columns: vec!["a".into(), "b".into()],
        });
        (viewport, sheet)
    }

    #[test]
    fn test_heading_regions() {
        let (viewport, sheet) = setup();
        assert_eq!(hit_test(&viewport, &sheet, 5.0, 5.0), HitTarget::Corner);
        assert_eq!(hit_test(&viewport, &sheet, 150.0, 5.0), HitTarget::ColumnHeading(2));
        assert_eq!(hit_test(&viewport, &sheet, 5.0, 50.0), HitTarget::RowHeading(2));
    }

    #[test]
    fn test_table_name_and_cells() {
        let (viewport, sheet) = setup();
        // Column 2 spans screen x 130..230, row 2 spans y 42..63.
        assert_eq!(
            hit_test(&viewport, &sheet, 150.0, 50.0),
            HitTarget::TableName {
                anchor: Pos::new(2, 2)
            }
        );
        assert_eq!(hit_test(&viewport, &sheet, 150.0, 70.0), HitTarget::Cell(Pos::new(2, 3)));
    }

    #[test]
    fn test_docked_header_wins_at_top_edge() {
        let (mut viewport, sheet) = setup();
        // Scroll so row 10 is at the top of the content area.
        viewport.set_position(30.0, 21.0 - 9.0 * 21.0);
        assert_eq!(
            hit_test(&viewport, &sheet, 150.0, 25.0),
            HitTarget::DockedHeader {
                anchor: Pos::new(2, 2),
                column: 2
            }
        );
    }
}
