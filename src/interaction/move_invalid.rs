//! Drop validity of a cell/column/row/table move.
//!
//! The check is advisory: it picks the preview color while dragging. The
//! data model validates the move again when the command is applied.
//!
//! Tables that intersect the source travel with the drag and never collide
//! with themselves. Everything else on the sheet is static. A drop is
//! invalid when
//! 1. a moving table would land on a static table,
//! 2. the destination covers a static multi-cell table (single cells may be
//!    overwritten),
//! 3. one of several tables moved together would land on the destination,
//!    on a static table, with its name row on a static table, on a code
//!    table, or on another moved table (clamping to the grid origin can
//!    stack them).

use crate::grid::SheetData;
use crate::types::{CellRect, Pos, TableBounds};

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    /// Whole columns; only x moves.
    Columns,
    /// Whole rows; only y moves.
    Rows,
    #[default]
    Rect,
}

impl MoveMode {
    /// The full rectangle covered by `rect` in this mode.
    pub fn expand(self, rect: CellRect) -> CellRect {
        match self {
            Self::Columns => CellRect::columns(rect.x, rect.max_x()),
            Self::Rows => CellRect::rows(rect.y, rect.max_y()),
            Self::Rect => rect,
        }
    }

    /// Translation from `source` to a drop at `dest`.
    pub fn delta(self, source: CellRect, dest: Pos) -> (i64, i64) {
        match self {
            Self::Columns => (dest.x - source.x, 0),
            Self::Rows => (0, dest.y - source.y),
            Self::Rect => (dest.x - source.x, dest.y - source.y),
        }
    }
}

/// Why a drop was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// A moving table lands on the static table anchored at `static_anchor`.
    SourceTable { moving: Pos, static_anchor: Pos },
    /// The destination covers a multi-cell table.
    Destination { table: Pos },
    /// An additional table lands on the primary destination.
    AdditionalOnDestination { moving: Pos },
    AdditionalOnTable { moving: Pos, static_anchor: Pos },
    AdditionalNameRow { moving: Pos, static_anchor: Pos },
    AdditionalOnCode { moving: Pos, code: Pos },
    /// Two moved tables end up overlapping each other.
    MovedTablesOverlap { a: Pos, b: Pos },
}

/// One-shot snapshot of a sheet's tables for collision checks.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    tables: Vec<TableBounds>,
}

impl CollisionResolver {
    pub fn new(tables: Vec<TableBounds>) -> Self {
        Self { tables }
    }

    pub fn from_sheet(sheet: &dyn SheetData) -> Self {
        Self::new(sheet.tables().iter().map(TableBounds::from).collect())
    }

    pub fn tables(&self) -> &[TableBounds] {
        &self.tables
    }

    /// Tables intersecting `rect`.
    pub fn tables_in(&self, rect: &CellRect) -> Vec<TableBounds> {
        self.tables
            .iter()
            .filter(|t| t.rect().overlaps(rect))
            .copied()
            .collect()
    }

    /// Whether dropping `source` (interpreted per `mode`) so that its origin
    /// lands on `dest` would overwrite a protected region.
    #[allow(clippy::too_many_arguments)]
    pub fn is_destination_invalid(
        &self,
        dest: Pos,
        width: i64,
        height: i64,
        mode: MoveMode,
        source: CellRect,
        additional: &[TableBounds],
    ) -> bool {
        match self.collision(dest, width, height, mode, source, additional) {
            Some(collision) => {
                tracing::trace!(?collision, ?dest, "drop destination invalid");
                true
            }
            None => false,
        }
    }

    /// First collision found for the drop, if any.
    #[allow(clippy::too_many_arguments)]
    pub fn collision(
        &self,
        dest: Pos,
        width: i64,
        height: i64,
        mode: MoveMode,
        source: CellRect,
        additional: &[TableBounds],
    ) -> Option<Collision> {
        if width <= 0 || height <= 0 || source.is_empty() {
            return None;
        }
        let source_rect = mode.expand(source);
        let dest_rect = mode.expand(CellRect::new(dest.x, dest.y, width, height));
        let (dx, dy) = mode.delta(source_rect, dest);

        let source_tables = self.tables_in(&source_rect);
        let is_moving = |t: &TableBounds| {
            source_tables.iter().any(|s| s.anchor == t.anchor)
                || additional.iter().any(|a| a.anchor == t.anchor)
        };
        let statics: Vec<&TableBounds> = self.tables.iter().filter(|t| !is_moving(t)).collect();

        for moving in &source_tables {
            let projected = moving.projected(dx, dy).rect();
            if let Some(hit) = statics.iter().find(|s| s.rect().overlaps(&projected)) {
                return Some(Collision::SourceTable {
                    moving: moving.anchor,
                    static_anchor: hit.anchor,
                });
            }
        }

        if let Some(hit) = statics
            .iter()
            .find(|s| !s.is_single_cell && s.rect().overlaps(&dest_rect))
        {
            return Some(Collision::Destination { table: hit.anchor });
        }

        if additional.is_empty() {
            return None;
        }
        let mut projected: Vec<TableBounds> = Vec::with_capacity(additional.len());
        for table in additional {
            let moved = table.projected(dx, dy);
            let rect = moved.rect();
            let is_primary = source_tables.iter().any(|s| s.anchor == table.anchor);
            if !is_primary && rect.overlaps(&dest_rect) {
                return Some(Collision::AdditionalOnDestination {
                    moving: table.anchor,
                });
            }
            for s in &statics {
                let static_rect = s.rect();
                if !s.is_single_cell && static_rect.overlaps(&rect) {
                    return Some(Collision::AdditionalOnTable {
                        moving: table.anchor,
                        static_anchor: s.anchor,
                    });
                }
                if moved
                    .name_row_band()
                    .is_some_and(|band| band.overlaps(&static_rect))
                {
                    return Some(Collision::AdditionalNameRow {
                        moving: table.anchor,
                        static_anchor: s.anchor,
                    });
                }
                if s.is_code_table && static_rect.overlaps(&rect) {
                    return Some(Collision::AdditionalOnCode {
                        moving: table.anchor,
                        code: s.anchor,
                    });
                }
            }
            projected.push(moved);
        }

        // Source tables that are not listed as additional move too.
        for table in &source_tables {
            if !projected.iter().any(|p| p.anchor == table.anchor) {
                projected.push(table.projected(dx, dy));
            }
        }
        for (i, a) in projected.iter().enumerate() {
            for b in projected.iter().skip(i + 1) {
                if a.rect().overlaps(&b.rect()) {
                    return Some(Collision::MovedTablesOverlap {
                        a: a.anchor,
                        b: b.anchor,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(x: i64, y: i64, w: i64, h: i64) -> TableBounds {
        TableBounds {
            anchor: Pos::new(x, y),
            x,
            y,
            width: w,
            height: h,
            has_name_row: false,
            is_code_table: false,
            is_single_cell: w == 1 && h == 1,
        }
    }

    fn code_cell(x: i64, y: i64) -> TableBounds {
        TableBounds {
            is_code_table: true,
            ..table(x, y, 1, 1)
        }
    }

    #[test]
    fn test_cell_onto_table_is_invalid() {
        let resolver = CollisionResolver::new(vec![table(1, 1, 2, 2)]);
        let source = CellRect::single(Pos::new(10, 10));
        assert!(resolver.is_destination_invalid(Pos::new(1, 1), 1, 1, MoveMode::Rect, source, &[]));
        assert!(!resolver.is_destination_invalid(Pos::new(5, 5), 1, 1, MoveMode::Rect, source, &[]));
    }

    #[test]
    fn test_edge_adjacent_drop_is_valid() {
        let resolver = CollisionResolver::new(vec![table(1, 1, 2, 2)]);
        let source = CellRect::single(Pos::new(10, 10));
        assert!(!resolver.is_destination_invalid(Pos::new(3, 1), 1, 1, MoveMode::Rect, source, &[]));
        assert!(!resolver.is_destination_invalid(Pos::new(1, 3), 1, 1, MoveMode::Rect, source, &[]));
    }

    #[test]
    fn test_single_cell_code_may_be_overwritten_by_cells() {
        let resolver = CollisionResolver::new(vec![code_cell(4, 4)]);
        let source = CellRect::single(Pos::new(10, 10));
        assert!(!resolver.is_destination_invalid(Pos::new(4, 4), 1, 1, MoveMode::Rect, source, &[]));
    }

    #[test]
    fn test_moving_table_onto_code_cell_is_invalid() {
        let resolver = CollisionResolver::new(vec![table(1, 1, 2, 2), code_cell(6, 6)]);
        let source = CellRect::new(1, 1, 2, 2);
        let hit = resolver.collision(Pos::new(5, 5), 2, 2, MoveMode::Rect, source, &[]);
        assert_eq!(
            hit,
            Some(Collision::SourceTable {
                moving: Pos::new(1, 1),
                static_anchor: Pos::new(6, 6)
            })
        );
    }

    #[test]
    fn test_table_to_own_location_is_valid() {
        let resolver = CollisionResolver::new(vec![table(3, 3, 4, 5), table(7, 3, 2, 2)]);
        let source = CellRect::new(3, 3, 4, 5);
        assert!(!resolver.is_destination_invalid(Pos::new(3, 3), 4, 5, MoveMode::Rect, source, &[]));
    }

    #[test]
    fn test_column_move_checks_whole_columns() {
        // Table far down in column 5; moving column 2 onto column 5 hits it.
        let resolver = CollisionResolver::new(vec![table(5, 1000, 2, 2)]);
        let source = CellRect::columns(2, 2);
        assert!(resolver.is_destination_invalid(Pos::new(5, 1), 1, 1, MoveMode::Columns, source, &[]));
        assert!(!resolver.is_destination_invalid(Pos::new(8, 1), 1, 1, MoveMode::Columns, source, &[]));
    }

    #[test]
    fn test_additional_tables_clamped_onto_each_other() {
        let a = table(1, 5, 2, 2);
        let b = table(4, 1, 2, 2);
        let resolver = CollisionResolver::new(vec![a, b]);
        // Primary source is an empty cell; moving 10 left and 10 up clamps
        // both tables to column/row 1 where they collide.
        let source = CellRect::single(Pos::new(20, 20));
        let hit = resolver.collision(Pos::new(10, 10), 1, 1, MoveMode::Rect, source, &[a, b]);
        assert!(matches!(hit, Some(Collision::MovedTablesOverlap { .. })));
    }

    #[test]
    fn test_additional_table_name_row_hits_static() {
        let mut moving = table(10, 10, 3, 3);
        moving.has_name_row = true;
        let blocker = code_cell(12, 5);
        let resolver = CollisionResolver::new(vec![moving, blocker]);
        let source = CellRect::single(Pos::new(30, 30));
        let hit = resolver.collision(Pos::new(30, 25), 1, 1, MoveMode::Rect, source, &[moving]);
        assert_eq!(
            hit,
            Some(Collision::AdditionalNameRow {
                moving: Pos::new(10, 10),
                static_anchor: Pos::new(12, 5)
            })
        );
    }

    #[test]
    fn test_degenerate_input_is_valid() {
        let resolver = CollisionResolver::new(vec![table(1, 1, 2, 2)]);
        let source = CellRect::single(Pos::new(10, 10));
        assert!(!resolver.is_destination_invalid(Pos::new(1, 1), 0, 1, MoveMode::Rect, source, &[]));
        assert!(!CollisionResolver::default().is_destination_invalid(
            Pos::new(1, 1),
            1,
            1,
            MoveMode::Rect,
            source,
            &[]
        ));
    }
}
