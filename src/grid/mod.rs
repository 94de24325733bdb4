//! Interface to the external grid data model.
//!
//! The renderer only reads sheet geometry and metadata through
//! [`SheetData`], and writes back by queueing [`GridCommand`]s that the host
//! applies to the real model. Changes come back as
//! [`GridEvent`](crate::events::GridEvent)s.

mod memory;

pub use memory::{MemoryGrid, MemorySheet};

use serde::Serialize;

use crate::layout::SheetOffsets;
use crate::render::colors::Rgb;
use crate::types::{CellRect, Pos, SheetId, TableInfo, ValidationCell};

/// A solid cell background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, Serialize)]
pub struct CellFill {
    pub rect: CellRect,
    pub color: Rgb,
}

/// Read access to one sheet.
pub trait SheetData {
    fn offsets(&self) -> &SheetOffsets;

    /// Every table-like region, including single-cell code cells.
    fn tables(&self) -> &[TableInfo];

    /// Merged cell regions.
    fn merges(&self) -> &[CellRect];

    fn validations(&self) -> &[ValidationCell];

    fn fills(&self) -> &[CellFill];

    fn tables_in(&self, rect: &CellRect) -> Vec<&TableInfo> {
        self.tables().iter().filter(|t| t.rect.overlaps(rect)).collect()
    }

    fn table_at(&self, pos: Pos) -> Option<&TableInfo> {
        self.tables().iter().find(|t| t.rect.contains(pos))
    }

    fn merges_in(&self, rect: &CellRect) -> Vec<CellRect> {
        self.merges()
            .iter()
            .filter(|m| m.overlaps(rect))
            .copied()
            .collect()
    }

    /// Merged region containing `pos`, if any.
    fn merge_at(&self, pos: Pos) -> Option<CellRect> {
        self.merges().iter().find(|m| m.contains(pos)).copied()
    }

    fn validations_in(&self, rect: &CellRect) -> Vec<ValidationCell> {
        self.validations()
            .iter()
            .filter(|v| rect.contains(v.pos))
            .copied()
            .collect()
    }

    fn fills_in(&self, rect: &CellRect) -> Vec<CellFill> {
        self.fills()
            .iter()
            .filter(|f| f.rect.overlaps(rect))
            .copied()
            .collect()
    }
}

/// Lookup of sheets by id.
pub trait GridData {
    fn sheet(&self, id: &SheetId) -> Option<&dyn SheetData>;

    fn sheet_ids(&self) -> Vec<SheetId>;
}

/// Write requests for the external data model, drained by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridCommand {
    /// Move `source` so its top-left lands on `dest`. The data model
    /// re-validates the destination before applying it.
    MoveCells {
        sheet: SheetId,
        source: CellRect,
        dest: Pos,
        columns: bool,
        rows: bool,
    },
}
