//! Formula reference highlights while editing.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::colors::palette;
use crate::render::display_list::Space;

pub struct HighlightsLayer {
    state: LayerState,
}

impl Default for HighlightsLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for HighlightsLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        // The first reference takes the theme accent, the rest cycle.
        let colors = std::iter::once(ctx.accent)
            .chain(palette::HIGHLIGHTS.iter().copied().skip(1).cycle());
        for (range, color) in ctx.highlights.iter().zip(colors) {
            if let Some(rect) = ctx.clipped_world_rect(range) {
                list.fill_rect(rect, color, 0.1);
                list.stroke_rect(rect, color, 1.0);
            }
        }
    }
}
