//! Per-sheet viewport memory, so switching back to a sheet returns the user
//! to the same pan/zoom and cursor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Pos, SheetId};

/// Saved viewport of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedViewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub cursor: Pos,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportStore {
    sheets: BTreeMap<SheetId, SavedViewport>,
}

impl ViewportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, sheet: &SheetId, saved: SavedViewport) {
        self.sheets.insert(sheet.clone(), saved);
    }

    pub fn get(&self, sheet: &SheetId) -> Option<&SavedViewport> {
        self.sheets.get(sheet)
    }

    /// Forget a deleted sheet.
    pub fn remove(&mut self, sheet: &SheetId) -> Option<SavedViewport> {
        self.sheets.remove(sheet)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_restore_through_json() {
        let mut store = ViewportStore::new();
        let saved = SavedViewport {
            x: -120.0,
            y: 21.0,
            scale: 1.5,
            cursor: Pos::new(4, 9),
        };
        store.save(&SheetId::new("a"), saved);
        let json = store.to_json().unwrap();
        let back = ViewportStore::from_json(&json).unwrap();
        assert_eq!(back.get(&SheetId::new("a")), Some(&saved));
        assert_eq!(back.get(&SheetId::new("b")), None);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(ViewportStore::from_json("[1,2").is_err());
    }
}
