//! Table name and column header rows, in place and docked.
//!
//! The underlay draws each visible table's name row, column headers, and
//! outline at their natural grid position. When a table's header row has
//! scrolled above the top of the content area while its body is still on
//! screen, the header row is also drawn docked to the top edge in screen
//! space, with its own grid lines (broken around merged cells) and side
//! borders emphasized for the active table.

use super::{begin, FrameContext, LayerState, OverlayLayer};
use crate::layout::SheetOffsets;
use crate::render::colors::{palette, Rgb};
use crate::render::display_list::{DisplayList, DrawCommand, Space, TextAlign};
use crate::render::segments::{horizontal_skips, subtract_spans, vertical_skips};
use crate::types::{CellRect, Pos, Rect, TableInfo};

const FONT_PX: f64 = 12.0;
const TEXT_PAD: f64 = 4.0;

/// A table whose header row is docked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockedHeader {
    pub anchor: Pos,
    pub header_row: i64,
}

/// Whether `table`'s column header row docks, given the world y of the top
/// of the content area.
pub fn docked_header(
    table: &TableInfo,
    offsets: &SheetOffsets,
    visible_top: f64,
) -> Option<DockedHeader> {
    let header_row = table.column_header_row()?;
    let (header_top, header_height) = offsets.row_position_size(header_row);
    let table_bottom = offsets.rows.position(table.rect.y + table.rect.h);
    (header_top < visible_top && table_bottom > visible_top + header_height).then_some(
        DockedHeader {
            anchor: table.anchor,
            header_row,
        },
    )
}

pub struct TableHeadersLayer {
    /// Underlay, world space.
    state: LayerState,
    dock: DisplayList,
    docked: Vec<DockedHeader>,
}

impl Default for TableHeadersLayer {
    fn default() -> Self {
        Self {
            state: LayerState::new(Space::World),
            dock: DisplayList::new(Space::Screen),
            docked: Vec::new(),
        }
    }
}

impl TableHeadersLayer {
    /// Docked headers, screen space; painted above the cursor.
    pub fn dock_list(&self) -> &DisplayList {
        &self.dock
    }

    /// Tables whose headers were docked in the last rebuild.
    pub fn docked(&self) -> &[DockedHeader] {
        &self.docked
    }
}

impl OverlayLayer for TableHeadersLayer {
    fn state(&self) -> &LayerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LayerState {
        &mut self.state
    }

    fn rebuild(&mut self, ctx: &FrameContext<'_>) {
        let underlay = begin(&mut self.state);
        self.dock.clear();
        self.docked.clear();

        let visible = ctx.visible_cells();
        let visible_top = ctx.visible_world().y;
        let offsets = ctx.sheet.offsets();

        for table in ctx.sheet.tables_in(&visible) {
            if table.is_single_cell() {
                continue;
            }
            let active = ctx.active_table == Some(table.anchor);
            let color = if active { ctx.accent } else { palette::MUTED };

            if let Some(row) = table.name_row() {
                let rect = offsets.rect_for_cells(&CellRect::new(table.rect.x, row, table.rect.w, 1));
                underlay.fill_rect(rect, color, 1.0);
                underlay.push(DrawCommand::Text {
                    x: rect.x + TEXT_PAD,
                    y: rect.y + rect.height / 2.0,
                    text: table.name.clone(),
                    color: palette::WHITE,
                    font_px: FONT_PX,
                    bold: true,
                    align: TextAlign::Left,
                });
            }
            if let Some(row) = table.column_header_row() {
                let cells = header_cells(table, row, offsets, |r| r);
                header_row(underlay, &cells, FONT_PX);
            }
            if let Some(outline) = ctx.clipped_world_rect(&table.rect) {
                underlay.stroke_rect(outline, color, 1.0);
            }

            if let Some(docked) = docked_header(table, offsets, visible_top) {
                draw_docked(&mut self.dock, ctx, table, docked.header_row, color, active);
                self.docked.push(docked);
            }
        }
        if !self.docked.is_empty() {
            tracing::trace!(count = self.docked.len(), "docked table headers");
        }
    }
}

/// Rectangle and label of each column header cell, mapped by `map`.
fn header_cells<'t>(
    table: &'t TableInfo,
    row: i64,
    offsets: &SheetOffsets,
    map: impl Fn(Rect) -> Rect,
) -> Vec<(Rect, &'t str)> {
    (0..table.rect.w)
        .map(|i| {
            let col = table.rect.x + i;
            let rect = offsets.rect_for_cells(&CellRect::new(col, row, 1, 1));
            let label = usize::try_from(i)
                .ok()
                .and_then(|i| table.columns.get(i))
                .map_or("", String::as_str);
            (map(rect), label)
        })
        .collect()
}

fn header_row(list: &mut DisplayList, cells: &[(Rect, &str)], font_px: f64) {
    for (rect, label) in cells {
        list.fill_rect(*rect, palette::TABLE_HEADER_BG, 1.0);
        if !label.is_empty() {
            list.push(DrawCommand::Text {
                x: rect.x + TEXT_PAD,
                y: rect.y + rect.height / 2.0,
                text: (*label).to_string(),
                color: palette::TABLE_HEADER_TEXT,
                font_px,
                bold: true,
                align: TextAlign::Left,
            });
        }
    }
}

fn draw_docked(
    list: &mut DisplayList,
    ctx: &FrameContext<'_>,
    table: &TableInfo,
    row: i64,
    color: Rgb,
    active: bool,
) {
    let offsets = ctx.sheet.offsets();
    let viewport = ctx.viewport;
    let scale = viewport.scale();
    let (_, heading_height) = viewport.heading_size();
    let row_height = offsets.rows.size(row) * scale;
    let to_screen = |r: Rect| {
        let (x, _) = viewport.world_to_screen(r.x, r.y);
        Rect::new(x, heading_height, r.width * scale, row_height)
    };

    let cells = header_cells(table, row, offsets, to_screen);
    header_row(list, &cells, FONT_PX * scale);

    let merges = ctx.sheet.merges_in(&table.rect);
    let bottom = heading_height + row_height;
    let screen_x = |col: i64| viewport.world_to_screen(offsets.columns.position(col), 0.0).0;

    // Interior column separators, unless a merge spans the boundary here.
    for col in (table.rect.x + 1)..(table.rect.x + table.rect.w) {
        let inside_merge = vertical_skips(&merges, col)
            .iter()
            .any(|&(start, end)| start <= row && row < end);
        if !inside_merge {
            let x = screen_x(col);
            list.line((x, heading_height), (x, bottom), palette::GRID_LINE, 1.0, 1.0);
        }
    }

    // Bottom edge, broken where a merge continues below the header row.
    let skips = horizontal_skips(&merges, row + 1);
    let full = (table.rect.x, table.rect.x + table.rect.w);
    for (start, end) in subtract_spans(full, &skips) {
        list.line((screen_x(start), bottom), (screen_x(end), bottom), palette::GRID_LINE, 1.0, 1.0);
    }

    let (border, width) = if active { (color, 2.0) } else { (palette::MUTED, 1.0) };
    let left = screen_x(table.rect.x);
    let right = screen_x(table.rect.x + table.rect.w);
    list.line((left, heading_height), (left, bottom), border, 1.0, width);
    list.line((right, heading_height), (right, bottom), border, 1.0, width);
}
