//! A cell/column/row/table move in progress.

use crate::grid::GridCommand;
use crate::render::layers::MovePreview;
use crate::types::{CellRect, Pos, SheetId, TableBounds};

use super::move_invalid::{CollisionResolver, MoveMode};

#[derive(Debug, Clone)]
pub struct MoveDrag {
    source: CellRect,
    mode: MoveMode,
    /// Offset from the source origin to the grabbed cell.
    grab: (i64, i64),
    additional: Vec<TableBounds>,
    resolver: CollisionResolver,
    dest: Pos,
    invalid: bool,
}

impl MoveDrag {
    /// Start dragging `source`, grabbed at cell `grabbed`. When the source
    /// carries more than one table, all of them are checked as a group.
    pub fn begin(source: CellRect, mode: MoveMode, grabbed: Pos, resolver: CollisionResolver) -> Self {
        let carried = resolver.tables_in(&mode.expand(source));
        let additional = if carried.len() > 1 { carried } else { Vec::new() };
        Self {
            source,
            mode,
            grab: (grabbed.x - source.x, grabbed.y - source.y),
            additional,
            resolver,
            dest: source.origin(),
            invalid: false,
        }
    }

    pub fn source(&self) -> CellRect {
        self.source
    }

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    pub fn dest(&self) -> Pos {
        self.dest
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Pointer is over cell `hover`. Returns whether the preview changed.
    pub fn update(&mut self, hover: Pos) -> bool {
        let dest = match self.mode {
            MoveMode::Columns => Pos::new((hover.x - self.grab.0).max(1), self.source.y),
            MoveMode::Rows => Pos::new(self.source.x, (hover.y - self.grab.1).max(1)),
            MoveMode::Rect => Pos::new(
                (hover.x - self.grab.0).max(1),
                (hover.y - self.grab.1).max(1),
            ),
        };
        if dest == self.dest {
            return false;
        }
        self.dest = dest;
        self.invalid = self.resolver.is_destination_invalid(
            dest,
            self.source.w,
            self.source.h,
            self.mode,
            self.source,
            &self.additional,
        );
        true
    }

    pub fn preview(&self) -> MovePreview {
        let rect = CellRect::new(self.dest.x, self.dest.y, self.source.w, self.source.h);
        MovePreview {
            rect: self.mode.expand(rect),
            invalid: self.invalid,
        }
    }

    /// The command for dropping here, or `None` if the drop is invalid or a
    /// no-op.
    pub fn commit(&self, sheet: &SheetId) -> Option<GridCommand> {
        if self.invalid {
            tracing::debug!(dest = ?self.dest, "move rejected: destination invalid");
            return None;
        }
        if self.dest == self.source.origin() {
            return None;
        }
        tracing::debug!(source = ?self.source, dest = ?self.dest, "move committed");
        Some(GridCommand::MoveCells {
            sheet: sheet.clone(),
            source: self.source,
            dest: self.dest,
            columns: self.mode == MoveMode::Columns,
            rows: self.mode == MoveMode::Rows,
        })
    }
}
