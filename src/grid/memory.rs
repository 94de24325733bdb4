//! In-memory grid used by native hosts, tests, and the wasm `load_sheet`
//! entry point.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{CellFill, GridData, SheetData};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::layout::SheetOffsets;
use crate::types::{CellRect, SheetId, TableInfo, ValidationCell};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemorySheet {
    pub offsets: SheetOffsets,
    pub tables: Vec<TableInfo>,
    pub merges: Vec<CellRect>,
    pub validations: Vec<ValidationCell>,
    pub fills: Vec<CellFill>,
}

impl MemorySheet {
    pub fn new(offsets: SheetOffsets) -> Self {
        Self {
            offsets,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a sheet, taking default cell sizes from `config` when the
    /// payload carries no `offsets`.
    pub fn from_json_with_config(json: &str, config: &RenderConfig) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?, config)
    }

    pub fn from_value(value: serde_json::Value, config: &RenderConfig) -> Result<Self> {
        let has_offsets = value.get("offsets").is_some();
        let mut sheet: Self = serde_json::from_value(value)?;
        if !has_offsets {
            sheet.offsets = SheetOffsets::from_config(config);
        }
        Ok(sheet)
    }

    pub fn with_table(mut self, table: TableInfo) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_merge(mut self, merge: CellRect) -> Self {
        self.merges.push(merge);
        self
    }
}

impl SheetData for MemorySheet {
    fn offsets(&self) -> &SheetOffsets {
        &self.offsets
    }

    fn tables(&self) -> &[TableInfo] {
        &self.tables
    }

    fn merges(&self) -> &[CellRect] {
        &self.merges
    }

    fn validations(&self) -> &[ValidationCell] {
        &self.validations
    }

    fn fills(&self) -> &[CellFill] {
        &self.fills
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    sheets: BTreeMap<SheetId, MemorySheet>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SheetId, sheet: MemorySheet) {
        self.sheets.insert(id, sheet);
    }

    pub fn remove(&mut self, id: &SheetId) -> Option<MemorySheet> {
        self.sheets.remove(id)
    }

    pub fn sheet_mut(&mut self, id: &SheetId) -> Option<&mut MemorySheet> {
        self.sheets.get_mut(id)
    }
}

impl GridData for MemoryGrid {
    fn sheet(&self, id: &SheetId) -> Option<&dyn SheetData> {
        self.sheets.get(id).map(|s| s as &dyn SheetData)
    }

    fn sheet_ids(&self) -> Vec<SheetId> {
        self.sheets.keys().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Pos;

    #[test]
    fn test_sheet_from_json_uses_defaults() {
        let sheet = MemorySheet::from_json(
            r#"{ "merges": [{ "x": 2, "y": 2, "w": 2, "h": 3 }] }"#,
        )
        .unwrap();
        assert_eq!(sheet.offsets, SheetOffsets::default());
        assert_eq!(sheet.merge_at(Pos::new(3, 4)), Some(CellRect::new(2, 2, 2, 3)));
        assert_eq!(sheet.merge_at(Pos::new(4, 4)), None);
    }

    #[test]
    fn test_sheet_without_offsets_takes_configured_sizes() {
        let config = RenderConfig {
            default_column_width: 50.0,
            default_row_height: 30.0,
            ..RenderConfig::default()
        };
        let sheet = MemorySheet::from_json_with_config(r#"{ "merges": [] }"#, &config).unwrap();
        assert_eq!(sheet.offsets, SheetOffsets::new(50.0, 30.0));

        let explicit = r#"{ "offsets": {
            "columns": { "default_size": 80.0, "sizes": {} },
            "rows": { "default_size": 20.0, "sizes": {} }
        } }"#;
        let sheet = MemorySheet::from_json_with_config(explicit, &config).unwrap();
        assert_eq!(sheet.offsets, SheetOffsets::new(80.0, 20.0));
    }

    #[test]
    fn test_queries_filter_by_rect() {
        let sheet = MemorySheet::default()
            .with_merge(CellRect::new(1, 1, 2, 1))
            .with_merge(CellRect::new(10, 10, 2, 2));
        assert_eq!(sheet.merges_in(&CellRect::new(1, 1, 5, 5)).len(), 1);
    }

    #[test]
    fn test_grid_lookup() {
        let mut grid = MemoryGrid::new();
        grid.insert(SheetId::new("s1"), MemorySheet::default());
        assert!(grid.sheet(&SheetId::new("s1")).is_some());
        assert!(grid.sheet(&SheetId::new("nope")).is_none());
        assert_eq!(grid.sheet_ids(), vec![SheetId::new("s1")]);
    }
}
