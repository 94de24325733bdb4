//! Structured error types for gridview.
//!
//! Rendering and input handling are defensive and mostly return `bool` or
//! no-op on degenerate input. The variants here cover construction-order bugs,
//! bad configuration, and serialization of persisted state.

use crate::types::SheetId;

/// All errors that can occur in gridview.
#[derive(Debug, thiserror::Error)]
pub enum GridViewError {
    /// The active sheet id has no matching cells sheet in the data interface.
    #[error("No cells sheet for active sheet {0}")]
    MissingCellsSheet(SheetId),

    /// Invalid render configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering error raised by a backend.
    #[error("Render error: {0}")]
    Render(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridViewError>;

impl From<String> for GridViewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridViewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridViewError> for wasm_bindgen::JsValue {
    fn from(e: GridViewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
