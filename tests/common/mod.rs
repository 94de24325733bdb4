//! Shared builders for integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::config::RenderConfig;
use gridview::events::{EventBus, ViewportEvent};
use gridview::grid::MemorySheet;
use gridview::layout::Viewport;
use gridview::types::{CellRect, Pos, SheetId, TableBounds, TableInfo};

/// Heading size used throughout: 30px row heading, 21px column heading.
pub const HEADING: (f64, f64) = (30.0, 21.0);

/// A viewport on sheet "s1" resting at the heading boundary.
pub fn viewport() -> (Viewport, EventBus<ViewportEvent>) {
    viewport_with(&RenderConfig::default())
}

pub fn viewport_with(config: &RenderConfig) -> (Viewport, EventBus<ViewportEvent>) {
    let mut vp = Viewport::new(800.0, 600.0, config);
    vp.set_sheet(Some(SheetId::new("s1")));
    vp.set_heading_size(HEADING.0, HEADING.1);
    vp.reset_to_origin();
    let mut bus = EventBus::new();
    vp.update_viewport(0.0, &mut bus);
    bus.drain();
    (vp, bus)
}

/// Run frames every 16 ms from `from` up to and including `to`.
pub fn run_frames(vp: &mut Viewport, bus: &mut EventBus<ViewportEvent>, from: f64, to: f64) {
    let mut t = from;
    while t <= to {
        vp.update_viewport(t, bus);
        t += 16.0;
    }
}

/// Table bounds with no name row.
pub fn bounds(x: i64, y: i64, w: i64, h: i64) -> TableBounds {
    TableBounds {
        anchor: Pos::new(x, y),
        x,
        y,
        width: w,
        height: h,
        has_name_row: false,
        is_code_table: false,
        is_single_cell: w == 1 && h == 1,
    }
}

/// A data table with a name row and a column header row.
pub fn table(x: i64, y: i64, w: i64, h: i64) -> TableInfo {
    TableInfo {
        anchor: Pos::new(x, y),
        name: format!("Table{x}_{y}"),
        rect: CellRect::new(x, y, w, h),
        show_name: true,
        show_columns: true,
        is_code: false,
        columns: (0..w).map(|i| format!("col{i}")).collect(),
    }
}

/// A single-cell code output.
pub fn code_cell(x: i64, y: i64) -> TableInfo {
    TableInfo {
        anchor: Pos::new(x, y),
        name: format!("Code{x}_{y}"),
        rect: CellRect::single(Pos::new(x, y)),
        show_name: false,
        show_columns: false,
        is_code: true,
        columns: Vec::new(),
    }
}

pub fn sheet_with(tables: Vec<TableInfo>) -> MemorySheet {
    tables
        .into_iter()
        .fold(MemorySheet::default(), MemorySheet::with_table)
}
