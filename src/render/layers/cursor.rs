//! Cursor cell, selected ranges, and the fill handle.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::render::display_list::Space;
use crate::types::{CellRect, Rect, SelectionType};

const CURSOR_WIDTH: f64 = 2.0;
const SELECTION_ALPHA: f64 = 0.1;
/// Fill handle edge length in screen pixels.
const FILL_HANDLE_PX: f64 = 6.0;

pub struct CursorLayer {
    state: LayerState,
}

impl Default for CursorLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for CursorLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        let selection = ctx.selection;

        for range in &selection.ranges {
            if range.is_single_cell() {
                continue;
            }
            if let Some(rect) = ctx.clipped_world_rect(range) {
                list.fill_rect(rect, ctx.accent, SELECTION_ALPHA);
                list.stroke_rect(rect, ctx.accent, 1.0);
            }
        }

        // The cursor expands to cover a merged cell.
        let cursor = ctx
            .sheet
            .merge_at(selection.cursor)
            .unwrap_or_else(|| CellRect::single(selection.cursor));
        if let Some(rect) = ctx.clipped_world_rect(&cursor) {
            list.stroke_rect(rect, ctx.accent, CURSOR_WIDTH);
        }

        // Fill handle on the bottom-right of a single cell-range selection.
        if selection.selection_type == SelectionType::CellRange && selection.ranges.len() <= 1 {
            let target = selection.ranges.first().copied().unwrap_or(cursor);
            let corner = ctx.sheet.offsets().rect_for_cells(&target);
            let size = ctx.px(FILL_HANDLE_PX);
            let handle = Rect::new(
                corner.right() - size / 2.0,
                corner.bottom() - size / 2.0,
                size,
                size,
            );
            if handle.intersects(&ctx.visible_world()) {
                list.fill_rect(handle, ctx.accent, 1.0);
            }
        }
    }
}
