//! Per-frame composition: tick animations, rebuild dirty layers, render once.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::events::GridEvent;
use crate::types::SheetId;

use super::backend::{Frame, RenderBackend};
use super::display_list::DisplayList;
use super::layers::{
    BackgroundLayer, CopyRangeLayer, CursorLayer, FillsLayer, FrameContext, GridLinesLayer,
    HeadingsLayer, HighlightsLayer, LayerId, MovingCellsLayer, OverlayLayer, PaintPass,
    TableHeadersLayer, ValidationsLayer, ALL_LAYERS, PAINT_ORDER,
};

/// Layers affected by a change notification.
pub fn dirty_layers(event: &GridEvent) -> &'static [LayerId] {
    use LayerId::*;
    match event {
        GridEvent::SheetOffsetsChanged { .. } => &[
            Fills,
            GridLines,
            Validations,
            TableHeaders,
            Cursor,
            CopyRange,
            Highlights,
            MovingCells,
            Headings,
        ],
        GridEvent::SheetValidationsChanged { .. } => &[Validations],
        GridEvent::SheetContentChanged { .. } => &[Fills, GridLines, TableHeaders, Cursor],
        GridEvent::ThemeAccentColorChanged(_) => &[
            Cursor,
            CopyRange,
            Highlights,
            Headings,
            TableHeaders,
            MovingCells,
        ],
        GridEvent::SelectionChanged => &[Cursor, Headings, TableHeaders],
        GridEvent::SheetSwitched { .. } => &ALL_LAYERS,
    }
}

/// Owns every overlay layer.
pub struct Composition {
    background: BackgroundLayer,
    fills: FillsLayer,
    grid_lines: GridLinesLayer,
    validations: ValidationsLayer,
    table_headers: TableHeadersLayer,
    cursor: CursorLayer,
    copy_range: CopyRangeLayer,
    highlights: HighlightsLayer,
    moving_cells: MovingCellsLayer,
    headings: HeadingsLayer,
}

impl Composition {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            background: BackgroundLayer::default(),
            fills: FillsLayer::default(),
            grid_lines: GridLinesLayer::default(),
            validations: ValidationsLayer::default(),
            table_headers: TableHeadersLayer::default(),
            cursor: CursorLayer::default(),
            copy_range: CopyRangeLayer::new(config.marching_ants_interval_ms),
            highlights: HighlightsLayer::default(),
            moving_cells: MovingCellsLayer::default(),
            headings: HeadingsLayer::default(),
        }
    }

    pub fn layer(&self, id: LayerId) -> &dyn OverlayLayer {
        match id {
            LayerId::Background => &self.background,
            LayerId::Fills => &self.fills,
            LayerId::GridLines => &self.grid_lines,
            LayerId::Validations => &self.validations,
            LayerId::TableHeaders => &self.table_headers,
            LayerId::Cursor => &self.cursor,
            LayerId::CopyRange => &self.copy_range,
            LayerId::Highlights => &self.highlights,
            LayerId::MovingCells => &self.moving_cells,
            LayerId::Headings => &self.headings,
        }
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut dyn OverlayLayer {
        match id {
            LayerId::Background => &mut self.background,
            LayerId::Fills => &mut self.fills,
            LayerId::GridLines => &mut self.grid_lines,
            LayerId::Validations => &mut self.validations,
            LayerId::TableHeaders => &mut self.table_headers,
            LayerId::Cursor => &mut self.cursor,
            LayerId::CopyRange => &mut self.copy_range,
            LayerId::Highlights => &mut self.highlights,
            LayerId::MovingCells => &mut self.moving_cells,
            LayerId::Headings => &mut self.headings,
        }
    }

    pub fn table_headers(&self) -> &TableHeadersLayer {
        &self.table_headers
    }

    /// Display list painted in `pass`.
    pub fn list(&self, pass: PaintPass) -> &DisplayList {
        match pass {
            PaintPass::Background => self.background.display_list(),
            PaintPass::Fills => self.fills.display_list(),
            PaintPass::GridLines => self.grid_lines.display_list(),
            PaintPass::Validations => self.validations.display_list(),
            PaintPass::TableUnderlay => self.table_headers.display_list(),
            PaintPass::Cursor => self.cursor.display_list(),
            PaintPass::CopyRange => self.copy_range.display_list(),
            PaintPass::Highlights => self.highlights.display_list(),
            PaintPass::MovingCells => self.moving_cells.display_list(),
            PaintPass::TableDock => self.table_headers.dock_list(),
            PaintPass::Headings => self.headings.display_list(),
        }
    }

    pub fn mark_dirty(&mut self, ids: &[LayerId]) {
        for &id in ids {
            self.layer_mut(id).set_dirty();
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.mark_dirty(&ALL_LAYERS);
    }

    /// Apply a change notification. Sheet-scoped events for sheets other
    /// than `active` are ignored.
    pub fn handle_event(&mut self, event: &GridEvent, active: Option<&SheetId>) {
        let scoped = match event {
            GridEvent::SheetOffsetsChanged { sheet }
            | GridEvent::SheetValidationsChanged { sheet }
            | GridEvent::SheetContentChanged { sheet } => Some(sheet),
            _ => None,
        };
        if scoped.is_some_and(|sheet| Some(sheet) != active) {
            return;
        }
        self.mark_dirty(dirty_layers(event));
    }

    /// Whether any layer needs a rebuild.
    pub fn is_dirty(&self) -> bool {
        ALL_LAYERS.iter().any(|&id| self.layer(id).is_dirty())
    }

    pub fn tick(&mut self, now_ms: f64) {
        for id in ALL_LAYERS {
            self.layer_mut(id).tick(now_ms);
        }
    }

    /// Update every layer in order. Returns how many rebuilt.
    pub fn update(&mut self, ctx: &FrameContext<'_>, viewport_changed: bool) -> usize {
        let mut rebuilt = 0;
        for id in ALL_LAYERS {
            if self.layer_mut(id).update(ctx, viewport_changed) {
                rebuilt += 1;
            }
        }
        rebuilt
    }

    pub fn frame(&self, ctx: &FrameContext<'_>) -> Frame<'_> {
        Frame {
            transform: ctx.viewport.transform(),
            width: ctx.viewport.width(),
            height: ctx.viewport.height(),
            passes: PAINT_ORDER.iter().map(|&p| (p, self.list(p))).collect(),
        }
    }

    /// One composition pass. Renders only if the viewport changed or a
    /// layer is dirty; returns whether a frame was rendered.
    pub fn render(
        &mut self,
        ctx: &FrameContext<'_>,
        viewport_changed: bool,
        now_ms: f64,
        backend: &mut dyn RenderBackend,
    ) -> Result<bool> {
        self.tick(now_ms);
        if !viewport_changed && !self.is_dirty() {
            return Ok(false);
        }
        let rebuilt = self.update(ctx, viewport_changed);
        tracing::trace!(rebuilt, viewport_changed, "composition pass");
        backend.render(&self.frame(ctx))?;
        Ok(true)
    }
}
