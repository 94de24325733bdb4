//! The render surface: one viewport, its overlay layers, and the input
//! state that drives them.
//!
//! A host owns a [`RenderContext`], forwards input and change notifications
//! to it, and calls [`RenderContext::frame`] once per animation frame. The
//! frame brings the viewport up to date first, so layers never rebuild
//! against a stale transform.

use crate::config::RenderConfig;
use crate::error::{GridViewError, Result};
use crate::events::{EventBus, GridEvent, ViewportEvent};
use crate::grid::{GridCommand, GridData, SheetData};
use crate::interaction::{hit_test, CollisionResolver, HitTarget, MoveDrag, MoveMode};
use crate::layout::{SavedViewport, Viewport, ViewportStore, WheelInput};
use crate::render::layers::heading_size;
use crate::render::{palette, Composition, FrameContext, LayerId, RenderBackend, Rgb};
use crate::types::{CellRect, Pos, Selection, SheetId};

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

impl PointerButton {
    /// From DOM `MouseEvent.button`.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum PointerState {
    #[default]
    Idle,
    Panning {
        last: (f64, f64),
    },
    Selecting {
        anchor: Pos,
    },
    Moving(MoveDrag),
}

/// What a pointer press resolved to, computed while the sheet is borrowed.
enum Press {
    Select(Selection),
    Move(MoveDrag, Option<Pos>),
    Cell(Pos),
}

pub struct RenderContext<G: GridData> {
    config: RenderConfig,
    grid: G,
    viewport: Viewport,
    composition: Composition,
    events: EventBus<ViewportEvent>,
    store: ViewportStore,
    active_sheet: Option<SheetId>,
    selection: Selection,
    accent: Rgb,
    active_table: Option<Pos>,
    copy_range: Option<CellRect>,
    highlights: Vec<CellRect>,
    pointer: PointerState,
    space_held: bool,
    commands: Vec<GridCommand>,
}

impl<G: GridData> RenderContext<G> {
    pub fn new(grid: G, width: f64, height: f64, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport: Viewport::new(width, height, &config),
            composition: Composition::new(&config),
            config,
            grid,
            events: EventBus::new(),
            store: ViewportStore::new(),
            active_sheet: None,
            selection: Selection::default(),
            accent: palette::ACCENT,
            active_table: None,
            copy_range: None,
            highlights: Vec::new(),
            pointer: PointerState::Idle,
            space_held: false,
            commands: Vec::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Mutable access to the data. Report what changed through
    /// [`Self::handle_event`].
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Viewport notifications, delivered at the end of each frame.
    pub fn events_mut(&mut self) -> &mut EventBus<ViewportEvent> {
        &mut self.events
    }

    pub fn viewport_store(&self) -> &ViewportStore {
        &self.store
    }

    pub fn set_viewport_store(&mut self, store: ViewportStore) {
        self.store = store;
    }

    pub fn active_sheet(&self) -> Option<&SheetId> {
        self.active_sheet.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_table(&self) -> Option<Pos> {
        self.active_table
    }

    pub fn accent(&self) -> Rgb {
        self.accent
    }

    /// Whether a move drag is in progress.
    pub fn is_moving(&self) -> bool {
        matches!(self.pointer, PointerState::Moving(_))
    }

    /// Drain commands queued for the data model.
    pub fn take_commands(&mut self) -> Vec<GridCommand> {
        std::mem::take(&mut self.commands)
    }

    fn active_data(&self) -> Result<Option<&dyn SheetData>> {
        let Some(id) = &self.active_sheet else {
            return Ok(None);
        };
        self.grid
            .sheet(id)
            .map(Some)
            .ok_or_else(|| GridViewError::MissingCellsSheet(id.clone()))
    }

    fn save_viewport(&mut self) {
        if let Some(id) = &self.active_sheet {
            self.store.save(
                id,
                SavedViewport {
                    x: self.viewport.x(),
                    y: self.viewport.y(),
                    scale: self.viewport.scale(),
                    cursor: self.selection.cursor,
                },
            );
        }
    }

    /// Make `sheet` the active sheet, restoring where the user last was on
    /// it.
    pub fn switch_sheet(&mut self, sheet: SheetId) {
        if self.active_sheet.as_ref() == Some(&sheet) {
            return;
        }
        self.save_viewport();
        self.cancel_drag();
        tracing::debug!(sheet = %sheet, "switching sheet");

        let saved = self.store.get(&sheet).copied();
        self.active_sheet = Some(sheet.clone());
        self.viewport.set_sheet(Some(sheet));
        if let Some(data) = self.active_sheet.as_ref().and_then(|id| self.grid.sheet(id)) {
            let (hw, hh) = heading_size(&self.viewport, data.offsets(), &self.config);
            self.viewport.set_heading_size(hw, hh);
        }
        match saved {
            Some(saved) => {
                self.viewport.set_scale(saved.scale);
                self.viewport.set_position(saved.x, saved.y);
                self.selection = Selection::cell(saved.cursor);
            }
            None => {
                self.viewport.reset_to_origin();
                self.selection = Selection::default();
            }
        }
        self.copy_range = None;
        self.highlights.clear();
        self.refresh_active_table();
        self.composition.mark_all_dirty();
    }

    /// Forget a sheet the data model has dropped. If it was active, frames
    /// draw nothing until another sheet is switched to.
    pub fn remove_sheet(&mut self, sheet: &SheetId) {
        self.store.remove(sheet);
        if self.active_sheet.as_ref() != Some(sheet) {
            return;
        }
        self.cancel_drag();
        tracing::debug!(sheet = %sheet, "active sheet removed");
        self.active_sheet = None;
        self.viewport.set_sheet(None);
        self.selection = Selection::default();
        self.active_table = None;
        self.copy_range = None;
        self.highlights.clear();
        self.composition.mark_all_dirty();
    }

    /// Apply a change notification from the data model or the host.
    pub fn handle_event(&mut self, event: GridEvent) {
        match &event {
            GridEvent::SheetSwitched { sheet } => {
                self.switch_sheet(sheet.clone());
                return;
            }
            GridEvent::ThemeAccentColorChanged(color) => self.accent = *color,
            GridEvent::SheetContentChanged { .. } => self.refresh_active_table(),
            _ => {}
        }
        self.composition
            .handle_event(&event, self.active_sheet.as_ref());
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.save_viewport();
        self.refresh_active_table();
        self.handle_event(GridEvent::SelectionChanged);
    }

    pub fn set_accent(&mut self, accent: Rgb) {
        self.handle_event(GridEvent::ThemeAccentColorChanged(accent));
    }

    pub fn set_copy_range(&mut self, range: Option<CellRect>) {
        if self.copy_range != range {
            self.copy_range = range;
            self.composition.mark_dirty(&[LayerId::CopyRange]);
        }
    }

    pub fn set_highlights(&mut self, highlights: Vec<CellRect>) {
        if self.highlights != highlights {
            self.highlights = highlights;
            self.composition.mark_dirty(&[LayerId::Highlights]);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    fn refresh_active_table(&mut self) {
        let cursor = self.selection.cursor;
        self.active_table = self
            .active_sheet
            .as_ref()
            .and_then(|id| self.grid.sheet(id))
            .and_then(|sheet| sheet.table_at(cursor))
            .map(|table| table.anchor);
    }

    // ---- input ----

    pub fn wheel(&mut self, wheel: &WheelInput, now_ms: f64) {
        self.viewport.apply_wheel(wheel, now_ms);
    }

    pub fn pinch_begin(&mut self) {
        self.viewport.begin_pinch();
    }

    pub fn pinch_update(&mut self, scale_delta: f64, center_x: f64, center_y: f64, now_ms: f64) {
        self.viewport
            .apply_pinch(scale_delta, center_x, center_y, now_ms);
    }

    pub fn pinch_end(&mut self, now_ms: f64) {
        self.viewport.end_pinch(now_ms);
    }

    /// Space held turns left-button drags into panning.
    pub fn set_space_held(&mut self, held: bool) {
        self.space_held = held;
    }

    pub fn pointer_down(
        &mut self,
        sx: f64,
        sy: f64,
        button: PointerButton,
        now_ms: f64,
    ) -> Result<()> {
        if button == PointerButton::Middle || (button == PointerButton::Left && self.space_held) {
            self.viewport.begin_drag(now_ms);
            self.pointer = PointerState::Panning { last: (sx, sy) };
            return Ok(());
        }
        if button != PointerButton::Left {
            return Ok(());
        }
        let Some(sheet) = self.active_data()? else {
            return Ok(());
        };
        let press = resolve_press(&self.viewport, sheet, &self.selection, sx, sy);

        match press {
            Press::Select(selection) => {
                self.pointer = PointerState::Idle;
                self.set_selection(selection);
            }
            Press::Move(drag, table) => {
                tracing::debug!(source = ?drag.source(), mode = ?drag.mode(), "move drag started");
                if table.is_some() {
                    self.active_table = table;
                    self.composition.mark_dirty(&[LayerId::TableHeaders]);
                }
                self.pointer = PointerState::Moving(drag);
                self.composition.mark_dirty(&[LayerId::MovingCells]);
            }
            Press::Cell(pos) => {
                self.pointer = PointerState::Selecting { anchor: pos };
                self.set_selection(Selection::cell(pos));
            }
        }
        Ok(())
    }

    pub fn pointer_move(&mut self, sx: f64, sy: f64, now_ms: f64) -> Result<()> {
        match &mut self.pointer {
            PointerState::Idle => {}
            PointerState::Panning { last } => {
                let (dx, dy) = (sx - last.0, sy - last.1);
                *last = (sx, sy);
                self.viewport.drag_by(dx, dy, now_ms);
            }
            PointerState::Selecting { anchor } => {
                let anchor = *anchor;
                let Some(pos) = self.cell_under(sx, sy)? else {
                    return Ok(());
                };
                let selection = Selection::cell_range(anchor, pos);
                if selection != self.selection {
                    self.set_selection(selection);
                }
            }
            PointerState::Moving(_) => {
                let Some(pos) = self.cell_under(sx, sy)? else {
                    return Ok(());
                };
                if let PointerState::Moving(drag) = &mut self.pointer {
                    if drag.update(pos) {
                        self.composition.mark_dirty(&[LayerId::MovingCells]);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn pointer_up(&mut self, sx: f64, sy: f64, now_ms: f64) -> Result<()> {
        match std::mem::take(&mut self.pointer) {
            PointerState::Idle | PointerState::Selecting { .. } => {}
            PointerState::Panning { last } => {
                self.viewport.drag_by(sx - last.0, sy - last.1, now_ms);
                self.viewport.end_drag(now_ms);
            }
            PointerState::Moving(mut drag) => {
                if let Some(pos) = self.cell_under(sx, sy)? {
                    drag.update(pos);
                }
                if let Some(command) = self
                    .active_sheet
                    .as_ref()
                    .and_then(|sheet| drag.commit(sheet))
                {
                    self.commands.push(command);
                }
                self.composition.mark_dirty(&[LayerId::MovingCells]);
            }
        }
        Ok(())
    }

    /// Abandon any drag in progress without committing it.
    pub fn cancel_drag(&mut self) {
        match std::mem::take(&mut self.pointer) {
            PointerState::Panning { .. } => self.viewport.cancel_drag(),
            PointerState::Moving(_) => {
                tracing::debug!("move drag cancelled");
                self.composition.mark_dirty(&[LayerId::MovingCells]);
            }
            PointerState::Idle | PointerState::Selecting { .. } => {}
        }
    }

    fn cell_under(&self, sx: f64, sy: f64) -> Result<Option<Pos>> {
        let Some(sheet) = self.active_data()? else {
            return Ok(None);
        };
        let (wx, wy) = self.viewport.screen_to_world(sx, sy);
        Ok(Some(sheet.offsets().cell_at(wx, wy)))
    }

    // ---- frame ----

    /// Advance the viewport, rebuild dirty layers, and render if anything
    /// changed. Returns whether a frame was drawn.
    pub fn frame(&mut self, now_ms: f64, backend: &mut dyn RenderBackend) -> Result<bool> {
        let Some(id) = self.active_sheet.clone() else {
            return Ok(false);
        };
        let sheet = self
            .grid
            .sheet(&id)
            .ok_or_else(|| GridViewError::MissingCellsSheet(id.clone()))?;

        let (hw, hh) = heading_size(&self.viewport, sheet.offsets(), &self.config);
        self.viewport.set_heading_size(hw, hh);
        let viewport_changed = self.viewport.update_viewport(now_ms, &mut self.events);
        if viewport_changed {
            self.store.save(
                &id,
                SavedViewport {
                    x: self.viewport.x(),
                    y: self.viewport.y(),
                    scale: self.viewport.scale(),
                    cursor: self.selection.cursor,
                },
            );
        }

        let move_preview = match &self.pointer {
            PointerState::Moving(drag) => Some(drag.preview()),
            _ => None,
        };
        let ctx = FrameContext {
            sheet_id: &id,
            sheet,
            viewport: &self.viewport,
            config: &self.config,
            selection: &self.selection,
            accent: self.accent,
            active_table: self.active_table,
            copy_range: self.copy_range,
            highlights: &self.highlights,
            move_preview,
        };
        let rendered = self
            .composition
            .render(&ctx, viewport_changed, now_ms, backend)?;
        self.events.dispatch();
        Ok(rendered)
    }
}

fn resolve_press(
    viewport: &Viewport,
    sheet: &dyn SheetData,
    selection: &Selection,
    sx: f64,
    sy: f64,
) -> Press {
    let resolver = || CollisionResolver::from_sheet(sheet);
    match hit_test(viewport, sheet, sx, sy) {
        HitTarget::Corner => Press::Select(Selection::all()),
        HitTarget::ColumnHeading(col) if selection.is_full_column(col) => {
            let bounds = selection.bounds();
            let source = CellRect::columns(bounds.x, bounds.max_x());
            let grabbed = Pos::new(col, 1);
            Press::Move(MoveDrag::begin(source, MoveMode::Columns, grabbed, resolver()), None)
        }
        HitTarget::ColumnHeading(col) => Press::Select(Selection::column_range(col, col)),
        HitTarget::RowHeading(row) if selection.is_full_row(row) => {
            let bounds = selection.bounds();
            let source = CellRect::rows(bounds.y, bounds.max_y());
            let grabbed = Pos::new(1, row);
            Press::Move(MoveDrag::begin(source, MoveMode::Rows, grabbed, resolver()), None)
        }
        HitTarget::RowHeading(row) => Press::Select(Selection::row_range(row, row)),
        HitTarget::TableName { anchor } => {
            let (wx, wy) = viewport.screen_to_world(sx, sy);
            let grabbed = sheet.offsets().cell_at(wx, wy);
            match sheet.tables().iter().find(|t| t.anchor == anchor) {
                Some(table) => Press::Move(
                    MoveDrag::begin(table.rect, MoveMode::Rect, grabbed, resolver()),
                    Some(anchor),
                ),
                None => Press::Cell(grabbed),
            }
        }
        HitTarget::DockedHeader { anchor, column } => {
            let row = sheet
                .tables()
                .iter()
                .find(|t| t.anchor == anchor)
                .and_then(|t| t.column_header_row())
                .unwrap_or(anchor.y);
            Press::Select(Selection::cell(Pos::new(column, row)))
        }
        HitTarget::Validation(cell) => Press::Select(Selection::cell(cell.pos)),
        HitTarget::Cell(pos) => {
            let bounds = selection.bounds();
            if !bounds.is_single_cell() && bounds.contains(pos) && selection.ranges.len() == 1 {
                let mode = MoveMode::Rect;
                Press::Move(MoveDrag::begin(bounds, mode, pos, resolver()), None)
            } else {
                let cell = sheet
                    .merge_at(pos)
                    .map_or(pos, |merge| merge.origin());
                Press::Cell(cell)
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::grid::{MemoryGrid, MemorySheet};
    use crate::render::{PaintPass, RecordingBackend};
    use crate::types::TableInfo;

    fn context() -> RenderContext<MemoryGrid> {
        let mut grid = MemoryGrid::new();
        grid.insert(
            SheetId::new("one"),
            MemorySheet::default().with_table(TableInfo {
                anchor: Pos::new(3, 3),
                name: "Sales".to_string(),
                rect: CellRect::new(3, 3, 2, 5),
                show_name: true,
                show_columns: true,
                is_code: false,
                columns: vec!["a".into(), "b".into()],
            }),
        );
        grid.insert(SheetId::new("two"), MemorySheet::default());
        let mut ctx = RenderContext::new(grid, 800.0, 600.0, RenderConfig::default()).unwrap();
        ctx.switch_sheet(SheetId::new("one"));
        ctx
    }

    fn screen_of(ctx: &RenderContext<MemoryGrid>, pos: Pos) -> (f64, f64) {
        let sheet = ctx.grid().sheet(&SheetId::new("one")).unwrap();
        let rect = sheet.offsets().cell_rect(pos);
        ctx.viewport()
            .world_to_screen(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_frame_without_sheet_is_noop() {
        let mut ctx =
            RenderContext::new(MemoryGrid::new(), 100.0, 100.0, RenderConfig::default()).unwrap();
        let mut backend = RecordingBackend::default();
        assert!(!ctx.frame(0.0, &mut backend).unwrap());
        assert!(backend.frames() == 0);
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let mut ctx =
            RenderContext::new(MemoryGrid::new(), 100.0, 100.0, RenderConfig::default()).unwrap();
        ctx.switch_sheet(SheetId::new("gone"));
        let mut backend = RecordingBackend::default();
        assert!(matches!(
            ctx.frame(0.0, &mut backend),
            Err(GridViewError::MissingCellsSheet(_))
        ));
    }

    #[test]
    fn test_idle_frames_do_not_render() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        assert!(ctx.frame(0.0, &mut backend).unwrap());
        assert!(!ctx.frame(16.0, &mut backend).unwrap());
        ctx.set_highlights(vec![CellRect::new(1, 1, 2, 2)]);
        assert!(ctx.frame(32.0, &mut backend).unwrap());
        assert!(!backend.pass(PaintPass::Highlights).is_empty());
    }

    #[test]
    fn test_switch_sheet_restores_viewport_and_cursor() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.frame(0.0, &mut backend).unwrap();
        ctx.viewport_mut().set_position(-500.0, -300.0);
        ctx.set_selection(Selection::cell(Pos::new(9, 9)));
        ctx.frame(16.0, &mut backend).unwrap();

        ctx.switch_sheet(SheetId::new("two"));
        assert_eq!(ctx.selection().cursor, Pos::new(1, 1));
        ctx.switch_sheet(SheetId::new("one"));
        assert_eq!(ctx.viewport().x(), -500.0);
        assert_eq!(ctx.viewport().y(), -300.0);
        assert_eq!(ctx.selection().cursor, Pos::new(9, 9));
    }

    #[test]
    fn test_cursor_move_is_persisted_without_pan() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.frame(0.0, &mut backend).unwrap();
        ctx.set_selection(Selection::cell(Pos::new(9, 9)));
        ctx.frame(16.0, &mut backend).unwrap();
        let saved = ctx.viewport_store().get(&SheetId::new("one")).unwrap();
        assert_eq!(saved.cursor, Pos::new(9, 9));
    }

    #[test]
    fn test_removing_active_sheet_blanks_the_surface() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.frame(0.0, &mut backend).unwrap();
        ctx.switch_sheet(SheetId::new("two"));
        ctx.switch_sheet(SheetId::new("one"));
        assert!(ctx.viewport_store().get(&SheetId::new("one")).is_some());

        let id = SheetId::new("one");
        ctx.grid_mut().remove(&id);
        ctx.remove_sheet(&id);
        assert_eq!(ctx.active_sheet(), None);
        assert_eq!(ctx.viewport().sheet(), None);
        assert!(ctx.viewport_store().get(&id).is_none());
        assert!(!ctx.frame(16.0, &mut backend).unwrap());
        assert!(!ctx.frame(32.0, &mut backend).unwrap());

        ctx.switch_sheet(SheetId::new("two"));
        assert!(ctx.frame(48.0, &mut backend).unwrap());
    }

    #[test]
    fn test_removing_inactive_sheet_keeps_active_one() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.switch_sheet(SheetId::new("two"));
        ctx.switch_sheet(SheetId::new("one"));
        let two = SheetId::new("two");
        ctx.grid_mut().remove(&two);
        ctx.remove_sheet(&two);
        assert_eq!(ctx.active_sheet(), Some(&SheetId::new("one")));
        assert!(ctx.viewport_store().get(&two).is_none());
        assert!(ctx.frame(0.0, &mut backend).unwrap());
    }

    #[test]
    fn test_cancelled_pan_does_not_coast() {
        let mut ctx = context();
        ctx.pointer_down(400.0, 300.0, PointerButton::Middle, 0.0)
            .unwrap();
        ctx.pointer_move(380.0, 300.0, 10.0).unwrap();
        ctx.pointer_move(360.0, 300.0, 20.0).unwrap();
        ctx.cancel_drag();
        assert!(!ctx.viewport().is_drag_active());
        assert!(!ctx.viewport().is_decelerating());
    }

    #[test]
    fn test_drag_table_by_name_emits_move_command() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.frame(0.0, &mut backend).unwrap();

        let (sx, sy) = screen_of(&ctx, Pos::new(3, 3));
        ctx.pointer_down(sx, sy, PointerButton::Left, 0.0).unwrap();
        assert!(ctx.is_moving());
        assert_eq!(ctx.active_table(), Some(Pos::new(3, 3)));

        let (tx, ty) = screen_of(&ctx, Pos::new(6, 10));
        ctx.pointer_move(tx, ty, 10.0).unwrap();
        assert!(ctx.frame(16.0, &mut backend).unwrap());
        assert!(!backend.pass(PaintPass::MovingCells).is_empty());

        ctx.pointer_up(tx, ty, 20.0).unwrap();
        let commands = ctx.take_commands();
        assert_eq!(
            commands,
            vec![GridCommand::MoveCells {
                sheet: SheetId::new("one"),
                source: CellRect::new(3, 3, 2, 5),
                dest: Pos::new(6, 10),
                columns: false,
                rows: false,
            }]
        );
        assert!(ctx.take_commands().is_empty());
    }

    #[test]
    fn test_cancelled_drag_commits_nothing() {
        let mut ctx = context();
        let (sx, sy) = screen_of(&ctx, Pos::new(3, 3));
        ctx.pointer_down(sx, sy, PointerButton::Left, 0.0).unwrap();
        let (tx, ty) = screen_of(&ctx, Pos::new(8, 8));
        ctx.pointer_move(tx, ty, 10.0).unwrap();
        ctx.cancel_drag();
        ctx.pointer_up(tx, ty, 20.0).unwrap();
        assert!(ctx.take_commands().is_empty());
    }

    #[test]
    fn test_click_and_drag_selects_range() {
        let mut ctx = context();
        let (sx, sy) = screen_of(&ctx, Pos::new(1, 1));
        ctx.pointer_down(sx, sy, PointerButton::Left, 0.0).unwrap();
        let (tx, ty) = screen_of(&ctx, Pos::new(2, 4));
        ctx.pointer_move(tx, ty, 5.0).unwrap();
        ctx.pointer_up(tx, ty, 10.0).unwrap();
        assert_eq!(ctx.selection().cursor, Pos::new(1, 1));
        assert_eq!(ctx.selection().bounds(), CellRect::new(1, 1, 2, 4));
    }

    #[test]
    fn test_middle_button_pans() {
        let mut ctx = context();
        let x0 = ctx.viewport().x();
        ctx.pointer_down(400.0, 300.0, PointerButton::Middle, 0.0)
            .unwrap();
        ctx.pointer_move(350.0, 300.0, 16.0).unwrap();
        assert_eq!(ctx.viewport().x(), x0 - 50.0);
        ctx.pointer_up(350.0, 300.0, 32.0).unwrap();
        assert!(!ctx.viewport().is_drag_active());
    }

    #[test]
    fn test_events_for_other_sheets_are_ignored() {
        let mut ctx = context();
        let mut backend = RecordingBackend::default();
        ctx.frame(0.0, &mut backend).unwrap();
        ctx.handle_event(GridEvent::SheetValidationsChanged {
            sheet: SheetId::new("two"),
        });
        assert!(!ctx.composition().is_dirty());
        ctx.handle_event(GridEvent::SheetValidationsChanged {
            sheet: SheetId::new("one"),
        });
        assert!(ctx.composition().is_dirty());
    }
}
