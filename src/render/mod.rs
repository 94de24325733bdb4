//! Rendering engine with pluggable backends.
//!
//! This module provides:
//! - Backend-agnostic display lists recorded by overlay layers
//! - The composition loop that rebuilds dirty layers and renders once
//! - A recording backend (native) and a Canvas 2D backend (wasm32)
//! - Color handling

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod composition;
pub mod display_list;
pub mod layers;
pub mod segments;

pub use backend::{Frame, RecordingBackend, RenderBackend};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use colors::{palette, CssColor, Rgb};
pub use composition::{dirty_layers, Composition};
pub use display_list::{Dash, DisplayList, DrawCommand, Space, TextAlign};
pub use layers::{
    FrameContext, LayerId, MovePreview, OverlayLayer, PaintPass, ALL_LAYERS, PAINT_ORDER,
};
