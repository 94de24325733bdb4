//! Drag preview of cells being moved, colored by drop validity.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::colors::palette;
use crate::render::display_list::Space;

pub struct MovingCellsLayer {
    state: LayerState,
}

impl Default for MovingCellsLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for MovingCellsLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        let Some(preview) = ctx.move_preview else {
            return;
        };
        let Some(rect) = ctx.clipped_world_rect(&preview.rect) else {
            return;
        };
        let color = if preview.invalid {
            palette::WARNING
        } else {
            ctx.accent
        };
        list.fill_rect(rect, color, 0.1);
        list.stroke_rect(rect, color, 2.0);
    }
}
