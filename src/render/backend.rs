//! Render backend trait for pluggable rendering implementations.
//!
//! A backend receives one [`Frame`] per render pass: the display lists of
//! every paint pass in z-order plus the viewport transform needed to place
//! world-space lists. The Canvas 2D backend replays them onto a canvas;
//! [`RecordingBackend`] keeps the resolved commands for native hosts and
//! tests.

use crate::error::Result;
use crate::layout::ViewportTransform;

use super::display_list::{DisplayList, DrawCommand};
use super::layers::PaintPass;

/// Everything a backend needs to draw one frame.
pub struct Frame<'a> {
    pub transform: ViewportTransform,
    /// Surface size in CSS pixels.
    pub width: f64,
    pub height: f64,
    /// Display lists, bottom to top.
    pub passes: Vec<(PaintPass, &'a DisplayList)>,
}

/// Trait for render backends
pub trait RenderBackend {
    /// Resize the render surface (CSS pixels) at a device pixel ratio.
    fn resize(&mut self, width: f64, height: f64, dpr: f64);

    /// Draw a frame. Called at most once per composition pass.
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}

/// Backend that records resolved screen-space commands.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    frames: usize,
    size: (f64, f64, f64),
    last: Vec<(PaintPass, Vec<DrawCommand>)>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Width, height, and dpr from the last `resize`.
    pub fn size(&self) -> (f64, f64, f64) {
        self.size
    }

    /// Screen-space commands of the last frame, per pass.
    pub fn last_frame(&self) -> &[(PaintPass, Vec<DrawCommand>)] {
        &self.last
    }

    /// Commands of one pass in the last frame.
    pub fn pass(&self, pass: PaintPass) -> &[DrawCommand] {
        self.last
            .iter()
            .find(|(p, _)| *p == pass)
            .map_or(&[], |(_, commands)| commands.as_slice())
    }
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.size = (width, height, dpr);
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames += 1;
        self.last = frame
            .passes
            .iter()
            .map(|(pass, list)| (*pass, list.resolved(&frame.transform)))
            .collect();
        Ok(())
    }
}
