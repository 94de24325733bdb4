//! Page background plus the shade left of column 1 and above row 1.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::colors::palette;
use crate::render::display_list::Space;
use crate::types::Rect;

pub struct BackgroundLayer {
    state: LayerState,
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for BackgroundLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let visible = ctx.visible_world();
        let list = begin(&mut self.state);
        list.fill_rect(visible, palette::WHITE, 1.0);

        // World x < 0 / y < 0 is outside the grid.
        if visible.x < 0.0 {
            let width = visible.width.min(-visible.x);
            list.fill_rect(
                Rect::new(visible.x, visible.y, width, visible.height),
                palette::OUT_OF_GRID,
                1.0,
            );
        }
        if visible.y < 0.0 {
            let height = visible.height.min(-visible.y);
            list.fill_rect(
                Rect::new(visible.x, visible.y, visible.width, height),
                palette::OUT_OF_GRID,
                1.0,
            );
        }
    }
}
