//! Layer composition: dirty tracking, paint order, and per-layer output.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{sheet_with, table, HEADING};
use gridview::config::RenderConfig;
use gridview::events::GridEvent;
use gridview::grid::MemorySheet;
use gridview::layout::Viewport;
use gridview::render::{
    dirty_layers, palette, Composition, DrawCommand, FrameContext, LayerId, PaintPass,
    RecordingBackend, Rgb, PAINT_ORDER,
};
use gridview::types::{CellRect, Pos, Selection, SheetId};

struct Fixture {
    config: RenderConfig,
    sheet_id: SheetId,
    sheet: MemorySheet,
    viewport: Viewport,
    selection: Selection,
    active_table: Option<Pos>,
    highlights: Vec<CellRect>,
}

impl Fixture {
    fn new(sheet: MemorySheet) -> Self {
        let config = RenderConfig::default();
        let mut viewport = Viewport::new(800.0, 600.0, &config);
        viewport.set_sheet(Some(SheetId::new("s1")));
        viewport.set_heading_size(HEADING.0, HEADING.1);
        viewport.reset_to_origin();
        Self {
            config,
            sheet_id: SheetId::new("s1"),
            sheet,
            viewport,
            selection: Selection::default(),
            active_table: None,
            highlights: Vec::new(),
        }
    }

    fn ctx(&self) -> FrameContext<'_> {
        FrameContext {
            sheet_id: &self.sheet_id,
            sheet: &self.sheet,
            viewport: &self.viewport,
            config: &self.config,
            selection: &self.selection,
            accent: palette::ACCENT,
            active_table: self.active_table,
            copy_range: None,
            highlights: &self.highlights,
            move_preview: None,
        }
    }
}

fn texts(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Every `Line` command as `(from, to, color, width)`.
fn lines(commands: &[DrawCommand]) -> Vec<((f64, f64), (f64, f64), Rgb, f64)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                ..
            } => Some((*from, *to, *color, *width)),
            _ => None,
        })
        .collect()
}

/// Whether a segment along one axis covers any of the open span `(lo, hi)`.
fn crosses(a: f64, b: f64, lo: f64, hi: f64) -> bool {
    a.min(b) < hi && a.max(b) > lo
}

#[test]
fn test_first_frame_paints_every_pass_in_order() {
    let fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();

    assert!(composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap());
    let order: Vec<PaintPass> = backend.last_frame().iter().map(|(p, _)| *p).collect();
    assert_eq!(order, PAINT_ORDER.to_vec());
    assert!(!backend.pass(PaintPass::Background).is_empty());
    assert!(!backend.pass(PaintPass::GridLines).is_empty());
    assert!(!composition.is_dirty());
}

#[test]
fn test_clean_frame_is_skipped() {
    let fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();

    assert!(!composition.render(&fx.ctx(), false, 16.0, &mut backend).unwrap());
    assert_eq!(backend.frames(), 1);

    // A viewport change alone is enough to render.
    assert!(composition.render(&fx.ctx(), true, 32.0, &mut backend).unwrap());
    assert_eq!(backend.frames(), 2);
}

#[test]
fn test_marking_dirty_twice_rebuilds_once() {
    let fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    composition.update(&fx.ctx(), true);

    composition.mark_dirty(&[LayerId::Cursor]);
    composition.mark_dirty(&[LayerId::Cursor]);
    assert!(composition.layer(LayerId::Cursor).is_dirty());
    assert_eq!(composition.update(&fx.ctx(), false), 1);
    assert_eq!(composition.update(&fx.ctx(), false), 0);
}

#[test]
fn test_events_mark_only_affected_layers() {
    let fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    composition.update(&fx.ctx(), true);

    let event = GridEvent::SheetValidationsChanged {
        sheet: SheetId::new("s1"),
    };
    assert_eq!(dirty_layers(&event), &[LayerId::Validations]);
    composition.handle_event(&event, Some(&fx.sheet_id));
    assert_eq!(composition.update(&fx.ctx(), false), 1);

    composition.handle_event(
        &GridEvent::SheetContentChanged {
            sheet: SheetId::new("other"),
        },
        Some(&fx.sheet_id),
    );
    assert!(!composition.is_dirty());

    composition.handle_event(&GridEvent::SelectionChanged, Some(&fx.sheet_id));
    assert!(composition.layer(LayerId::Cursor).is_dirty());
    assert!(composition.layer(LayerId::Headings).is_dirty());
    assert!(!composition.layer(LayerId::Fills).is_dirty());
}

#[test]
fn test_headings_label_visible_columns_and_rows() {
    let fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();

    let labels = texts(backend.pass(PaintPass::Headings));
    assert!(labels.iter().any(|l| l == "A"));
    assert!(labels.iter().any(|l| l == "B"));
    assert!(labels.iter().any(|l| l == "1"));
}

#[test]
fn test_grid_lines_hidden_when_zoomed_far_out() {
    let mut fx = Fixture::new(MemorySheet::default());
    fx.viewport.set_scale(0.05);
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();
    assert!(backend.pass(PaintPass::GridLines).is_empty());
}

#[test]
fn test_table_header_docks_when_scrolled_past() {
    let mut fx = Fixture::new(sheet_with(vec![table(2, 2, 2, 40)]));
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();

    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();
    assert!(backend.pass(PaintPass::TableDock).is_empty());

    // Row 10 at the top of the content area; the header row (3) is gone.
    fx.viewport.set_position(HEADING.0, HEADING.1 - 9.0 * 21.0);
    composition.render(&fx.ctx(), true, 16.0, &mut backend).unwrap();
    let dock = backend.pass(PaintPass::TableDock);
    assert!(texts(dock).iter().any(|t| t == "col0"));
    assert_eq!(composition.table_headers().docked().len(), 1);

    // Past the end of the table nothing docks.
    fx.viewport.set_position(HEADING.0, HEADING.1 - 60.0 * 21.0);
    composition.render(&fx.ctx(), true, 32.0, &mut backend).unwrap();
    assert!(backend.pass(PaintPass::TableDock).is_empty());
}

#[test]
fn test_highlights_follow_ranges() {
    let mut fx = Fixture::new(MemorySheet::default());
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();
    assert!(backend.pass(PaintPass::Highlights).is_empty());

    fx.highlights = vec![CellRect::new(1, 1, 2, 2), CellRect::single(Pos::new(5, 5))];
    composition.mark_dirty(&[LayerId::Highlights]);
    composition.render(&fx.ctx(), false, 16.0, &mut backend).unwrap();
    assert!(!backend.pass(PaintPass::Highlights).is_empty());
}

#[test]
fn test_docked_header_emphasizes_active_table() {
    let mut fx = Fixture::new(sheet_with(vec![table(2, 2, 2, 40), table(6, 2, 2, 40)]));
    fx.active_table = Some(Pos::new(2, 2));
    fx.viewport.set_position(HEADING.0, HEADING.1 - 9.0 * 21.0);
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();
    assert_eq!(composition.table_headers().docked().len(), 2);

    let dock = lines(backend.pass(PaintPass::TableDock));
    let border_at = |x: f64| {
        dock.iter()
            .filter(|(from, to, _, _)| from.0 == x && to.0 == x)
            .map(|(_, _, color, width)| (*color, *width))
            .filter(|(color, _)| *color != palette::GRID_LINE)
            .collect::<Vec<_>>()
    };
    // Columns 2..4 of the active table span screen x 130..330.
    assert_eq!(border_at(130.0), vec![(palette::ACCENT, 2.0)]);
    assert_eq!(border_at(330.0), vec![(palette::ACCENT, 2.0)]);
    // The inactive table spans 530..730.
    assert_eq!(border_at(530.0), vec![(palette::MUTED, 1.0)]);
    assert_eq!(border_at(730.0), vec![(palette::MUTED, 1.0)]);
}

#[test]
fn test_grid_lines_skip_merge_interior() {
    let sheet = MemorySheet::default().with_merge(CellRect::new(2, 2, 2, 2));
    let fx = Fixture::new(sheet);
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();

    // The merge covers screen x 130..330 and y 42..84.
    let grid = lines(backend.pass(PaintPass::GridLines));
    assert!(!grid.is_empty());
    for (from, to, _, _) in &grid {
        if from.0 == to.0 && from.0 > 130.0 && from.0 < 330.0 {
            assert!(!crosses(from.1, to.1, 42.0, 84.0), "vertical at {}", from.0);
        }
        if from.1 == to.1 && from.1 > 42.0 && from.1 < 84.0 {
            assert!(!crosses(from.0, to.0, 130.0, 330.0), "horizontal at {}", from.1);
        }
    }
    // The same lines still run outside the merge.
    assert!(grid
        .iter()
        .any(|(from, to, _, _)| from.0 == 230.0 && to.0 == 230.0 && crosses(from.1, to.1, 21.0, 42.0)));
    assert!(grid
        .iter()
        .any(|(from, to, _, _)| from.1 == 63.0 && to.1 == 63.0 && crosses(from.0, to.0, 30.0, 130.0)));
}

#[test]
fn test_docked_header_lines_skip_merge_interior() {
    // Header row 3 of the table; the merge spans columns 2..4 and rows 3..5.
    let sheet = sheet_with(vec![table(2, 2, 3, 40)]).with_merge(CellRect::new(2, 3, 2, 2));
    let mut fx = Fixture::new(sheet);
    fx.viewport.set_position(HEADING.0, HEADING.1 - 9.0 * 21.0);
    let mut composition = Composition::new(&fx.config);
    let mut backend = RecordingBackend::new();
    composition.render(&fx.ctx(), true, 0.0, &mut backend).unwrap();
    assert_eq!(composition.table_headers().docked().len(), 1);

    let dock = lines(backend.pass(PaintPass::TableDock));
    let bottom = HEADING.1 + 21.0;
    // No separator between columns 2 and 3 (x = 230); the one at 330 stays.
    assert!(!dock.iter().any(|(from, to, _, _)| from.0 == 230.0 && to.0 == 230.0));
    assert!(dock.iter().any(|(from, to, _, _)| from.0 == 330.0 && to.0 == 330.0));
    // The bottom edge only runs where the merge does not continue below.
    let edges: Vec<_> = dock
        .iter()
        .filter(|(from, to, _, _)| from.1 == bottom && to.1 == bottom)
        .collect();
    assert!(!edges.is_empty());
    for (from, to, _, _) in edges {
        assert!(!crosses(from.0, to.0, 130.0, 330.0));
    }
}
