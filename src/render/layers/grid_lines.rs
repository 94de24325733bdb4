//! Cell grid lines, culled to the viewport and broken around merged cells.
//!
//! Lines fade out with zoom and disappear below
//! `RenderConfig::grid_lines_hide_scale`.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::config::fade_alpha;
use crate::render::colors::palette;
use crate::render::display_list::Space;
use crate::render::segments::{horizontal_skips, subtract_spans, vertical_skips};

pub struct GridLinesLayer {
    state: LayerState,
}

impl Default for GridLinesLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for GridLinesLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        let alpha = fade_alpha(
            ctx.viewport.scale(),
            ctx.config.grid_lines_hide_scale,
            ctx.config.grid_lines_fade_band,
        );
        if alpha <= 0.0 {
            tracing::trace!(scale = ctx.viewport.scale(), "grid lines hidden");
            return;
        }

        let visible = ctx.visible_cells();
        if visible.is_empty() {
            return;
        }
        let offsets = ctx.sheet.offsets();
        let merges = ctx.sheet.merges_in(&visible);
        let (first_col, last_col) = (visible.x, visible.max_x() + 1);
        let (first_row, last_row) = (visible.y, visible.max_y() + 1);

        // Vertical line at the left edge of each column.
        for col in first_col..=last_col {
            let x = offsets.columns.position(col);
            let skips = vertical_skips(&merges, col);
            for (start, end) in subtract_spans((first_row, last_row), &skips) {
                list.line(
                    (x, offsets.rows.position(start)),
                    (x, offsets.rows.position(end)),
                    palette::GRID_LINE,
                    alpha,
                    1.0,
                );
            }
        }

        // Horizontal line at the top edge of each row.
        for row in first_row..=last_row {
            let y = offsets.rows.position(row);
            let skips = horizontal_skips(&merges, row);
            for (start, end) in subtract_spans((first_col, last_col), &skips) {
                list.line(
                    (offsets.columns.position(start), y),
                    (offsets.columns.position(end), y),
                    palette::GRID_LINE,
                    alpha,
                    1.0,
                );
            }
        }
    }
}
