//! gridview - canvas viewport and overlay rendering for a spreadsheet grid
//!
//! Draws the visible part of a sheet onto a 2D canvas and keeps it in sync
//! with pan, zoom, and selection:
//! - World/screen transform with fixed headings and an eased snap back to
//!   the heading boundary
//! - Trackpad momentum detection so inertial wheel tails don't fight the snap
//! - Overlay layers that rebuild only when dirty, composed once per frame
//! - Merge-aware grid lines and docked table column headers
//! - Drop validation for cell, column, row, and table moves
//!
//! The data model lives outside this crate. It is read through
//! [`grid::SheetData`] and written to by draining [`grid::GridCommand`]s.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const view = new GridView(canvas, devicePixelRatio);
//! view.loadSheet('sheet-1', { tables: [], merges: [] });
//! view.switchSheet('sheet-1');
//! const tick = (t) => { view.frame(t); requestAnimationFrame(tick); };
//! requestAnimationFrame(tick);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod surface;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::RenderConfig;
pub use error::{GridViewError, Result};
pub use events::{EventBus, GridEvent, ViewportEvent};
pub use grid::{GridCommand, GridData, MemoryGrid, MemorySheet, SheetData};
pub use layout::Viewport;
pub use surface::{PointerButton, RenderContext};
#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
