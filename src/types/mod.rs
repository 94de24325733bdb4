//! Plain data types shared by the layout, render, and interaction modules.

mod geometry;
mod selection;
mod table;
mod validation;

pub use geometry::*;
pub use selection::*;
pub use table::*;
pub use validation::*;

use serde::{Deserialize, Serialize};

/// Identifier of a sheet as known to the external data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(pub String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
