//! Cell background fills.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::display_list::Space;

pub struct FillsLayer {
    state: LayerState,
}

impl Default for FillsLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for FillsLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let visible = ctx.visible_cells();
        let fills = ctx.sheet.fills_in(&visible);
        let list = begin(&mut self.state);
        for fill in fills {
            if let Some(rect) = ctx.clipped_world_rect(&fill.rect) {
                list.fill_rect(rect, fill.color, 1.0);
            }
        }
    }
}
