//! Column letters, row numbers, and the corner box, fixed to the canvas.
//!
//! The heading size depends on how many digits the largest visible row
//! number has; [`heading_size`] is fed back into the viewport before each
//! frame so snapping uses the same boundary that is drawn here.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::config::RenderConfig;
use crate::layout::{SheetOffsets, Viewport};
use crate::render::colors::palette;
use crate::render::display_list::{DrawCommand, Space, TextAlign};
use crate::types::Rect;

const FONT_PX: f64 = 11.0;
/// Labels are skipped on headings narrower than this (screen px).
const MIN_LABEL_PX: f64 = 12.0;

/// Spreadsheet column name: 1 -> "A", 27 -> "AA". Non-positive columns have
/// no name.
pub fn column_name(col: i64) -> String {
    let mut n = col;
    let mut out = Vec::new();
    while n > 0 {
        let rem = u8::try_from((n - 1) % 26).unwrap_or(0);
        out.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Row heading width and column heading height, in screen pixels.
#[allow(clippy::cast_precision_loss)]
pub fn heading_size(viewport: &Viewport, offsets: &SheetOffsets, config: &RenderConfig) -> (f64, f64) {
    let (_, bottom) = viewport.screen_to_world(0.0, viewport.height());
    let (last_row, _) = offsets.row_from_y(bottom);
    let digits = last_row.max(1).to_string().len() as f64;
    (
        digits * config.heading_char_width + 2.0 * config.row_heading_padding,
        config.heading_height,
    )
}

pub struct HeadingsLayer {
    state: LayerState,
}

impl Default for HeadingsLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::Screen),
        }
    }
}

impl OverlayLayer for HeadingsLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let list = begin(&mut self.state);
        let viewport = ctx.viewport;
        let offsets = ctx.sheet.offsets();
        let selection = ctx.selection;
        let scale = viewport.scale();
        let (hw, hh) = viewport.heading_size();
        let (width, height) = (viewport.width(), viewport.height());
        let visible = ctx.visible_cells();

        list.fill_rect(Rect::new(0.0, 0.0, width, hh), palette::HEADING_BG, 1.0);
        list.fill_rect(Rect::new(0.0, 0.0, hw, height), palette::HEADING_BG, 1.0);

        for col in visible.x..=visible.max_x() {
            let (x, size) = offsets.column_position_size(col);
            let (left, _) = viewport.world_to_screen(x, 0.0);
            let right = left + size * scale;
            let clipped_left = left.max(hw);
            if right <= clipped_left {
                continue;
            }
            let cell = Rect::new(clipped_left, 0.0, right - clipped_left, hh);
            if selection.touches_column(col) {
                let alpha = if selection.is_full_column(col) { 0.5 } else { 0.2 };
                list.fill_rect(cell, ctx.accent, alpha);
            }
            if size * scale >= MIN_LABEL_PX {
                list.push(DrawCommand::Text {
                    x: (left + right) / 2.0,
                    y: hh / 2.0,
                    text: column_name(col),
                    color: palette::HEADING_TEXT,
                    font_px: FONT_PX,
                    bold: false,
                    align: TextAlign::Center,
                });
            }
            if left >= hw {
                list.line((left, 0.0), (left, hh), palette::HEADING_BORDER, 1.0, 1.0);
            }
        }

        for row in visible.y..=visible.max_y() {
            let (y, size) = offsets.row_position_size(row);
            let (_, top) = viewport.world_to_screen(0.0, y);
            let bottom = top + size * scale;
            let clipped_top = top.max(hh);
            if bottom <= clipped_top {
                continue;
            }
            let cell = Rect::new(0.0, clipped_top, hw, bottom - clipped_top);
            if selection.touches_row(row) {
                let alpha = if selection.is_full_row(row) { 0.5 } else { 0.2 };
                list.fill_rect(cell, ctx.accent, alpha);
            }
            if size * scale >= MIN_LABEL_PX {
                list.push(DrawCommand::Text {
                    x: hw - ctx.config.row_heading_padding,
                    y: (top + bottom) / 2.0,
                    text: row.to_string(),
                    color: palette::HEADING_TEXT,
                    font_px: FONT_PX,
                    bold: false,
                    align: TextAlign::Right,
                });
            }
            if top >= hh {
                list.line((0.0, top), (hw, top), palette::HEADING_BORDER, 1.0, 1.0);
            }
        }

        // Corner box covers where the two bars cross.
        list.fill_rect(Rect::new(0.0, 0.0, hw, hh), palette::HEADING_BG, 1.0);
        list.line((0.0, hh), (width, hh), palette::HEADING_BORDER, 1.0, 1.0);
        list.line((hw, 0.0), (hw, height), palette::HEADING_BORDER, 1.0, 1.0);
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, "A")]
    #[test_case(26, "Z")]
    #[test_case(27, "AA")]
    #[test_case(52, "AZ")]
    #[test_case(703, "AAA")]
    #[test_case(0, "")]
    fn test_column_name(col: i64, expected: &str) {
        assert_eq!(column_name(col), expected);
    }

    #[test]
    fn test_heading_width_grows_with_row_digits() {
        let config = RenderConfig::default();
        let offsets = SheetOffsets::default();
        let mut viewport = Viewport::new(800.0, 600.0, &config);
        let (narrow, hh) = heading_size(&viewport, &offsets, &config);
        assert_eq!(hh, config.heading_height);
        // Scroll far down: row numbers in the millions.
        viewport.set_position(0.0, -21.0 * 2_000_000.0);
        let (wide, _) = heading_size(&viewport, &offsets, &config);
        assert!(wide > narrow);
    }
}
