//! Marching ants around the copied range.
//!
//! The dash offset advances every `marching_ants_interval_ms`, which makes
//! the layer dirty on its own while a copy range exists.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::display_list::{Dash, DrawCommand, Space};

const DASH: f64 = 4.0;

pub struct CopyRangeLayer {
    state: LayerState,
    /// Whether the last rebuild drew anything.
    active: bool,
    interval_ms: f64,
    step: u32,
    last_step_ms: Option<f64>,
}

impl CopyRangeLayer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            state: LayerState::new(Space::World),
            active: false,
            interval_ms,
            step: 0,
            last_step_ms: None,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }
}

impl OverlayLayer for CopyRangeLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn tick(&mut self, now_ms: f64) {
        if !self.active {
            self.last_step_ms = None;
            return;
        }
        let Some(last) = self.last_step_ms else {
            self.last_step_ms = Some(now_ms);
            return;
        };
        if now_ms - last >= self.interval_ms {
            self.step = self.step.wrapping_add(1);
            self.last_step_ms = Some(now_ms);
            self.set_dirty();
        }
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        let rect = ctx.copy_range.and_then(|r| ctx.clipped_world_rect(&r));
        self.active = ctx.copy_range.is_some();
        let Some(rect) = rect else {
            return;
        };
        let offset = -f64::from(self.step % 8) * (DASH * 2.0 / 8.0);
        list.push(DrawCommand::StrokeRect {
            rect,
            color: ctx.accent,
            alpha: 1.0,
            width: 1.0,
            dash: Some(Dash {
                on: DASH,
                off: DASH,
                offset,
            }),
        });
    }
}
