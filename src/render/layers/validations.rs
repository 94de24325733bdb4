//! Checkbox and dropdown glyphs for validated cells.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::config::fade_alpha;
use crate::grid::SheetData;
use crate::render::display_list::{DrawCommand, Space};
use crate::types::{Rect, SpecialSprite, ValidationCell};

/// Glyph edge length in world pixels.
const GLYPH_SIZE: f64 = 12.0;
const DROPDOWN_MARGIN: f64 = 4.0;

/// Where a sprite is drawn inside its cell.
pub fn sprite_rect(cell: Rect, sprite: SpecialSprite) -> Rect {
    let size = GLYPH_SIZE.min(cell.width).min(cell.height);
    let y = cell.y + (cell.height - size) / 2.0;
    match sprite {
        SpecialSprite::Checkbox { .. } => {
            Rect::new(cell.x + (cell.width - size) / 2.0, y, size, size)
        }
        SpecialSprite::Dropdown => Rect::new(
            (cell.right() - size - DROPDOWN_MARGIN).max(cell.x),
            y,
            size,
            size,
        ),
    }
}

/// The validation whose glyph is under world point `(x, y)`.
///
/// A checkbox only reacts on its glyph; a dropdown reacts anywhere right of
/// the glyph's left edge so the whole arrow column is clickable.
pub fn validation_at(sheet: &dyn SheetData, x: f64, y: f64) -> Option<ValidationCell> {
    let offsets = sheet.offsets();
    let pos = offsets.cell_at(x, y);
    let cell = sheet.validations().iter().find(|v| v.pos == pos).copied()?;
    let cell_rect = offsets.cell_rect(pos);
    let glyph = sprite_rect(cell_rect, cell.sprite);
    let hit = match cell.sprite {
        SpecialSprite::Checkbox { .. } => glyph.contains_point(x, y),
        SpecialSprite::Dropdown => x >= glyph.x && cell_rect.contains_point(x, y),
    };
    hit.then_some(cell)
}

pub struct ValidationsLayer {
    state: LayerState,
}

impl Default for ValidationsLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
        }
    }
}

impl OverlayLayer for ValidationsLayer {
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
            ctx.config.validations_hide_scale,
            ctx.config.validations_fade_band,
        );
        if alpha <= 0.0 {
            return;
        }
        let offsets = ctx.sheet.offsets();
        for cell in ctx.sheet.validations_in(&ctx.visible_cells()) {
            let rect = sprite_rect(offsets.cell_rect(cell.pos), cell.sprite);
            list.push(DrawCommand::Sprite {
                rect,
                sprite: cell.sprite,
                alpha,
            });
        }
    }
}
