//! Overlay layers composited each frame.
//!
//! Every layer owns a dirty flag and the display list(s) it last built.
//! [`OverlayLayer::update`] rebuilds only when the layer is dirty or the
//! viewport moved, and clears the flag. Layers read shared state through a
//! [`FrameContext`] and never touch each other.

mod background;
mod copy_range;
mod cursor;
mod fills;
mod grid_lines;
mod headings;
mod highlights;
mod moving_cells;
mod table_headers;
mod validations;

pub use background::BackgroundLayer;
pub use copy_range::CopyRangeLayer;
pub use cursor::CursorLayer;
pub use fills::FillsLayer;
pub use grid_lines::GridLinesLayer;
pub use headings::{column_name, heading_size, HeadingsLayer};
pub use highlights::HighlightsLayer;
pub use moving_cells::MovingCellsLayer;
pub use table_headers::{docked_header, DockedHeader, TableHeadersLayer};
pub use validations::{sprite_rect, validation_at, ValidationsLayer};

use crate::config::RenderConfig;
use crate::grid::SheetData;
use crate::layout::Viewport;
use crate::types::{CellRect, Pos, Rect, Selection, SheetId};

use super::colors::Rgb;
use super::display_list::{DisplayList, Space};

/// Layers, in the order they are updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Background,
    Fills,
    GridLines,
    Validations,
    TableHeaders,
    Cursor,
    CopyRange,
    Highlights,
    MovingCells,
    Headings,
}

pub const ALL_LAYERS: [LayerId; 10] = [
    LayerId::Background,
    LayerId::Fills,
    LayerId::GridLines,
    LayerId::Validations,
    LayerId::TableHeaders,
    LayerId::Cursor,
    LayerId::CopyRange,
    LayerId::Highlights,
    LayerId::MovingCells,
    LayerId::Headings,
];

/// Paint passes, bottom to top. The table headers layer paints twice: its
/// underlay scrolls with the grid, the docked headers sit above the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintPass {
    Background,
    Fills,
    GridLines,
    Validations,
    TableUnderlay,
    Cursor,
    CopyRange,
    Highlights,
    MovingCells,
    TableDock,
    Headings,
}

pub const PAINT_ORDER: [PaintPass; 11] = [
    PaintPass::Background,
    PaintPass::Fills,
    PaintPass::GridLines,
    PaintPass::Validations,
    PaintPass::TableUnderlay,
    PaintPass::Cursor,
    PaintPass::CopyRange,
    PaintPass::Highlights,
    PaintPass::MovingCells,
    PaintPass::TableDock,
    PaintPass::Headings,
];

/// Drag preview drawn by the moving-cells layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePreview {
    /// Destination rectangle.
    pub rect: CellRect,
    pub invalid: bool,
}

/// Read-only state shared with every layer for one frame.
pub struct FrameContext<'a> {
    pub sheet_id: &'a SheetId,
    pub sheet: &'a dyn SheetData,
    pub viewport: &'a Viewport,
    pub config: &'a RenderConfig,
    pub selection: &'a Selection,
    pub accent: Rgb,
    /// Anchor of the focused table.
    pub active_table: Option<Pos>,
    pub copy_range: Option<CellRect>,
    pub highlights: &'a [CellRect],
    pub move_preview: Option<MovePreview>,
}

impl FrameContext<'_> {
    /// World rectangle under the content area.
    pub fn visible_world(&self) -> Rect {
        self.viewport.visible_bounds()
    }

    /// Cells under the content area.
    pub fn visible_cells(&self) -> CellRect {
        self.sheet.offsets().cells_in(&self.visible_world())
    }

    /// World rectangle of a cell rectangle, clipped to the visible cells so
    /// whole-row/column ranges stay finite.
    pub fn clipped_world_rect(&self, cells: &CellRect) -> Option<Rect> {
        let visible = self.visible_cells();
        let clipped = cells.intersection(&visible)?;
        Some(self.sheet.offsets().rect_for_cells(&clipped))
    }

    /// Screen pixels to world units at the current zoom.
    pub fn px(&self, screen_px: f64) -> f64 {
        screen_px / self.viewport.scale()
    }
}

/// Dirty flag plus the list the layer draws into.
#[derive(Debug, Clone)]
pub struct LayerState {
    dirty: bool,
    list: DisplayList,
}

impl LayerState {
    /// New layers start dirty so they draw on the first frame.
    pub fn new(space: Space) -> Self {
        Self {
            dirty: true,
            list: DisplayList::new(space),
        }
    }

    pub fn list(&self) -> &DisplayList {
        &self.list
    }
}

pub trait OverlayLayer {
    fn state(&self) -> &LayerState;

    fn state_mut(&mut self) -> &mut LayerState;

    /// Recompute the display list from scratch.
    fn rebuild(&mut self, ctx: &FrameContext<'_>);

    /// Advance animation state; may mark the layer dirty.
    fn tick(&mut self, _now_ms: f64) {}

    fn is_dirty(&self) -> bool {
        self.state().dirty
    }

    fn set_dirty(&mut self) {
        self.state_mut().dirty = true;
    }

    /// Rebuild if dirty or the viewport moved. Returns whether it rebuilt.
    fn update(&mut self, ctx: &FrameContext<'_>, viewport_changed: bool) -> bool {
        if !self.is_dirty() && !viewport_changed {
            return false;
        }
        self.state_mut().dirty = false;
        self.rebuild(ctx);
        true
    }

    fn display_list(&self) -> &DisplayList {
        self.state().list()
    }
}

/// Clear the list and hand it back for rebuilding.
fn begin(state: &mut LayerState) -> &mut DisplayList {
    state.list.clear();
    &mut state.list
}
