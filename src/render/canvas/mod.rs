//! Canvas 2D rendering backend.
//!
//! Replays composed display lists onto an `HtmlCanvasElement` via web-sys.

mod renderer;

pub use renderer::CanvasRenderer;
