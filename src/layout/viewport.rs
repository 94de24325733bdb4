//! Viewport state: pan position, zoom, and the snap-back state machine.
//!
//! The transform maps world (unscaled grid pixel) coordinates to screen:
//! `screen = world * scale + (x, y)`. The fixed headings cover the top
//! `heading_height` and left `heading_width` screen pixels, so at rest
//! `x == heading_width` puts column 1 right next to the row heading. When
//! the origin is pushed past the heading (`x > heading_width`), the area
//! before column 1 shows and a snap back to the boundary is scheduled.

use crate::config::{RenderConfig, WheelZoomKey};
use crate::events::{EventBus, ViewportEvent};
use crate::types::{Rect, SheetId};

use super::decelerate::Decelerate;
use super::momentum::{DeltaMode, MomentumScrollDetector, WheelSample};
use super::snap::{SnapAnimation, SnapState};

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A wheel event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    pub modifiers: Modifiers,
    /// Pointer position, used as the zoom center.
    pub screen_x: f64,
    pub screen_y: f64,
}

/// The affine world-to-screen transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl ViewportTransform {
    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        (wx * self.scale + self.x, wy * self.scale + self.y)
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.x) / self.scale, (sy - self.y) / self.scale)
    }
}

/// Values compared frame to frame to detect a viewport change.
#[derive(Debug, Clone, PartialEq)]
struct ViewportSnapshot {
    x: f64,
    y: f64,
    scale: f64,
    width: f64,
    height: f64,
    sheet: Option<SheetId>,
}

/// Viewport state - pan/zoom transform of one rendering surface.
pub struct Viewport {
    x: f64,
    y: f64,
    scale: f64,
    /// Screen size in CSS pixels
    width: f64,
    height: f64,
    sheet: Option<SheetId>,
    heading_width: f64,
    heading_height: f64,
    config: RenderConfig,
    momentum: MomentumScrollDetector,
    decelerate: Decelerate,
    snap: SnapState,
    last: Option<ViewportSnapshot>,
    drag_active: bool,
    pinch_active: bool,
    last_zoom_ms: f64,
    last_frame_ms: Option<f64>,
    last_broadcast_ms: f64,
    broadcast_pending: bool,
}

impl Viewport {
    pub fn new(width: f64, height: f64, config: &RenderConfig) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            width,
            height,
            sheet: None,
            heading_width: 0.0,
            heading_height: 0.0,
            momentum: MomentumScrollDetector::new(config.momentum_gap_ms, config.momentum_slack),
            decelerate: Decelerate::new(config.decelerate_friction, config.decelerate_min_speed),
            config: config.clone(),
            snap: SnapState::Idle,
            last: None,
            drag_active: false,
            pinch_active: false,
            last_zoom_ms: f64::NEG_INFINITY,
            last_frame_ms: None,
            last_broadcast_ms: f64::NEG_INFINITY,
            broadcast_pending: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sheet(&self) -> Option<&SheetId> {
        self.sheet.as_ref()
    }

    pub fn snap_state(&self) -> SnapState {
        self.snap
    }

    pub fn heading_size(&self) -> (f64, f64) {
        (self.heading_width, self.heading_height)
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn is_decelerating(&self) -> bool {
        self.decelerate.is_active()
    }

    pub fn transform(&self) -> ViewportTransform {
        ViewportTransform {
            x: self.x,
            y: self.y,
            scale: self.scale,
        }
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        self.transform().world_to_screen(wx, wy)
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        self.transform().screen_to_world(sx, sy)
    }

    /// World rectangle visible in the content area (right of / below the headings).
    pub fn visible_bounds(&self) -> Rect {
        let (left, top) = self.screen_to_world(self.heading_width, self.heading_height);
        let (right, bottom) = self.screen_to_world(self.width, self.height);
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    // ------------------------------------------------------------------
    // Host-driven state
    // ------------------------------------------------------------------

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn set_sheet(&mut self, sheet: Option<SheetId>) {
        self.sheet = sheet;
    }

    /// Size of the fixed headings; defines the snap boundary.
    pub fn set_heading_size(&mut self, width: f64, height: f64) {
        self.heading_width = width.max(0.0);
        self.heading_height = height.max(0.0);
    }

    /// Move without animation. Cancels any running snap or coast.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.stop_animations();
        self.x = x;
        self.y = y;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.config.clamp_scale(scale);
    }

    /// Put column 1 / row 1 at the heading boundary at 100% zoom.
    pub fn reset_to_origin(&mut self) {
        self.stop_animations();
        self.scale = 1.0;
        self.x = self.heading_width;
        self.y = self.heading_height;
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pan by a screen-space delta.
    pub fn apply_drag(&mut self, dx: f64, dy: f64) {
        self.stop_animations();
        self.x += dx;
        self.y += dy;
    }

    /// A drag-to-pan gesture starts; running animations stop.
    pub fn begin_drag(&mut self, now_ms: f64) {
        self.stop_animations();
        self.drag_active = true;
        self.decelerate.on_move(self.x, self.y, now_ms);
    }

    /// Pan during a drag gesture, recording samples for coasting.
    pub fn drag_by(&mut self, dx: f64, dy: f64, now_ms: f64) {
        self.apply_drag(dx, dy);
        self.decelerate.on_move(self.x, self.y, now_ms);
    }

    /// Drag released; may start coasting.
    pub fn end_drag(&mut self, now_ms: f64) {
        self.drag_active = false;
        self.decelerate.on_up(self.x, self.y, now_ms);
    }

    /// Drag abandoned; ends the gesture without coasting.
    pub fn cancel_drag(&mut self) {
        self.drag_active = false;
        self.decelerate.reset();
    }

    /// Wheel input: zoom with the configured modifier, pan otherwise.
    pub fn apply_wheel(&mut self, wheel: &WheelInput, now_ms: f64) {
        self.decelerate.reset();
        let multiplier = match wheel.delta_mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => self.config.wheel_line_height,
            DeltaMode::Page => self.height.max(1.0),
        };
        let dominant = if wheel.delta_y.abs() >= wheel.delta_x.abs() {
            wheel.delta_y
        } else {
            wheel.delta_x
        };
        self.momentum.add_event(WheelSample {
            time: now_ms,
            delta: dominant * multiplier,
            delta_mode: wheel.delta_mode,
        });

        if self.is_zoom_modifier(wheel.modifiers) {
            let factor = (-wheel.delta_y * multiplier * self.config.wheel_zoom_sensitivity).exp();
            self.zoom_at(factor, wheel.screen_x, wheel.screen_y, now_ms);
            return;
        }

        // The inertial tail of a gesture must not fight a running snap.
        if self.snap.is_snapping() && self.momentum.has_momentum_scroll() {
            return;
        }
        self.snap = SnapState::Idle;

        let (mut dx, mut dy) = (wheel.delta_x * multiplier, wheel.delta_y * multiplier);
        if wheel.modifiers.shift && dx.abs() < f64::EPSILON {
            dx = dy;
            dy = 0.0;
        }
        self.x -= dx;
        self.y -= dy;
    }

    pub fn begin_pinch(&mut self) {
        self.stop_animations();
        self.pinch_active = true;
    }

    /// Zoom by a multiplicative `scale_delta` around a screen point.
    pub fn apply_pinch(&mut self, scale_delta: f64, center_x: f64, center_y: f64, now_ms: f64) {
        if !scale_delta.is_finite() || scale_delta <= 0.0 {
            return;
        }
        self.zoom_at(scale_delta, center_x, center_y, now_ms);
    }

    pub fn end_pinch(&mut self, now_ms: f64) {
        self.pinch_active = false;
        self.last_zoom_ms = now_ms;
    }

    /// Zoom to an absolute scale keeping the screen point fixed.
    pub fn zoom_to(&mut self, scale: f64, center_x: f64, center_y: f64, now_ms: f64) {
        if self.scale > 0.0 {
            self.zoom_at(scale / self.scale, center_x, center_y, now_ms);
        }
    }

    fn zoom_at(&mut self, factor: f64, center_x: f64, center_y: f64, now_ms: f64) {
        let new_scale = self.config.clamp_scale(self.scale * factor);
        if (new_scale - self.scale).abs() <= f64::EPSILON {
            return;
        }
        self.snap = SnapState::Idle;
        let (wx, wy) = self.screen_to_world(center_x, center_y);
        self.scale = new_scale;
        self.x = center_x - wx * new_scale;
        self.y = center_y - wy * new_scale;
        self.last_zoom_ms = now_ms;
    }

    fn is_zoom_modifier(&self, m: Modifiers) -> bool {
        match self.config.wheel_zoom_key {
            WheelZoomKey::Ctrl => m.ctrl,
            WheelZoomKey::Meta => m.meta,
            WheelZoomKey::Alt => m.alt,
            WheelZoomKey::CtrlOrMeta => m.ctrl || m.meta,
        }
    }

    fn stop_animations(&mut self) {
        self.decelerate.reset();
        if !self.snap.is_idle() {
            tracing::trace!("snap cancelled by input");
        }
        self.snap = SnapState::Idle;
    }

    // ------------------------------------------------------------------
    // Per-frame update
    // ------------------------------------------------------------------

    /// Advance animations and report whether the viewport changed since the
    /// previous call. Emits change events into `bus` when it did.
    pub fn update_viewport(&mut self, now_ms: f64, bus: &mut EventBus<ViewportEvent>) -> bool {
        if self.sheet.is_none() {
            return false;
        }

        let elapsed = self.last_frame_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);

        if let Some((dx, dy)) = self.decelerate.update(elapsed) {
            self.x += dx;
            self.y += dy;
        }

        if let SnapState::Snapping(anim) = self.snap {
            let ((x, y), done) = anim.position_at(now_ms);
            self.x = x;
            self.y = y;
            if done {
                tracing::debug!(x, y, "snap finished");
                self.snap = SnapState::Idle;
            }
        }

        let snapshot = ViewportSnapshot {
            x: self.x,
            y: self.y,
            scale: self.scale,
            width: self.width,
            height: self.height,
            sheet: self.sheet.clone(),
        };
        let previous_scale = self.last.as_ref().map(|s| s.scale);
        let changed = self.last.as_ref() != Some(&snapshot);

        if changed {
            self.last = Some(snapshot);
            self.emit_changed(now_ms, previous_scale, bus);
            if self.momentum.has_momentum_scroll()
                && self.heading_obscured()
                && !self.snap.is_snapping()
                && !self.gesture_active()
            {
                self.start_snap(now_ms);
            } else if self.snap.is_waiting() {
                self.snap = SnapState::Idle;
            }
        } else {
            self.flush_broadcast(now_ms, bus);
            if !self.is_mid_zoom(now_ms) {
                self.evaluate_snap(now_ms);
            }
        }
        changed
    }

    fn emit_changed(
        &mut self,
        now_ms: f64,
        previous_scale: Option<f64>,
        bus: &mut EventBus<ViewportEvent>,
    ) {
        bus.emit(ViewportEvent::ViewportChanged);
        if previous_scale.map_or(true, |s| (s - self.scale).abs() > f64::EPSILON) {
            bus.emit(ViewportEvent::ZoomChanged { scale: self.scale });
        }
        bus.emit(ViewportEvent::RenderViewportUpdate {
            bounds: self.visible_bounds(),
            scale: self.scale,
        });
        bus.emit(ViewportEvent::ViewportChangedReady);
        self.broadcast_pending = true;
        self.flush_broadcast(now_ms, bus);
    }

    fn flush_broadcast(&mut self, now_ms: f64, bus: &mut EventBus<ViewportEvent>) {
        if !self.broadcast_pending
            || now_ms - self.last_broadcast_ms < self.config.broadcast_throttle_ms
        {
            return;
        }
        let Some(sheet) = self.sheet.as_ref() else {
            return;
        };
        bus.emit(ViewportEvent::MultiplayerViewport {
            sheet: sheet.to_string(),
            bounds: self.visible_bounds(),
            scale: self.scale,
        });
        self.last_broadcast_ms = now_ms;
        self.broadcast_pending = false;
    }

    /// Whether the grid origin sits right of / below the heading boundary.
    pub fn heading_obscured(&self) -> bool {
        self.x > self.heading_width + f64::EPSILON || self.y > self.heading_height + f64::EPSILON
    }

    fn gesture_active(&self) -> bool {
        self.drag_active || self.pinch_active
    }

    fn is_mid_zoom(&self, now_ms: f64) -> bool {
        self.pinch_active || now_ms - self.last_zoom_ms < self.config.zoom_settle_ms
    }

    fn evaluate_snap(&mut self, now_ms: f64) {
        let obscured = self.heading_obscured();
        match self.snap {
            SnapState::Idle => {
                if !obscured || self.gesture_active() {
                    return;
                }
                if self.momentum.has_momentum_scroll() {
                    self.start_snap(now_ms);
                } else {
                    tracing::trace!(x = self.x, y = self.y, "heading obscured, waiting to snap");
                    self.snap = SnapState::Waiting { since_ms: now_ms };
                }
            }
            SnapState::Waiting { since_ms } => {
                if !obscured {
                    self.snap = SnapState::Idle;
                } else if self.momentum.has_momentum_scroll()
                    || (now_ms - since_ms > self.config.snap_wait_ms && !self.gesture_active())
                {
                    self.start_snap(now_ms);
                }
            }
            SnapState::Snapping(_) => {}
        }
    }

    fn start_snap(&mut self, now_ms: f64) {
        let to = (
            self.x.min(self.heading_width),
            self.y.min(self.heading_height),
        );
        tracing::debug!(from_x = self.x, from_y = self.y, to_x = to.0, to_y = to.1, "snap start");
        self.decelerate.reset();
        self.snap = SnapState::Snapping(SnapAnimation {
            from: (self.x, self.y),
            to,
            start_ms: now_ms,
            duration_ms: self.config.snap_duration_ms,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn viewport() -> (Viewport, EventBus<ViewportEvent>) {
        let mut vp = Viewport::new(800.0, 600.0, &RenderConfig::default());
        vp.set_sheet(Some(SheetId::new("s1")));
        vp.set_heading_size(30.0, 21.0);
        vp.reset_to_origin();
        (vp, EventBus::new())
    }

    #[test]
    fn test_transform_round_trip() {
        let (mut vp, _) = viewport();
        vp.set_scale(2.0);
        let (sx, sy) = vp.world_to_screen(100.0, 50.0);
        assert_eq!((sx, sy), (230.0, 121.0));
        assert_eq!(vp.screen_to_world(sx, sy), (100.0, 50.0));
    }

    #[test]
    fn test_visible_bounds_exclude_headings() {
        let (vp, _) = viewport();
        let b = vp.visible_bounds();
        assert_eq!(b, Rect::new(0.0, 0.0, 770.0, 579.0));
    }

    #[test]
    fn test_update_reports_change_once() {
        let (mut vp, mut bus) = viewport();
        assert!(vp.update_viewport(0.0, &mut bus));
        assert!(!vp.update_viewport(16.0, &mut bus));
        vp.apply_drag(-50.0, 0.0);
        assert!(vp.update_viewport(32.0, &mut bus));
        let events = bus.drain();
        assert!(events.contains(&ViewportEvent::ViewportChanged));
        assert!(events.contains(&ViewportEvent::ViewportChangedReady));
    }

    #[test]
    fn test_no_sheet_is_noop() {
        let mut vp = Viewport::new(800.0, 600.0, &RenderConfig::default());
        let mut bus = EventBus::new();
        vp.apply_drag(10.0, 10.0);
        assert!(!vp.update_viewport(0.0, &mut bus));
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let (mut vp, _) = viewport();
        let before = vp.screen_to_world(400.0, 300.0);
        vp.apply_pinch(2.0, 400.0, 300.0, 0.0);
        assert_eq!(vp.scale(), 2.0);
        let after = vp.screen_to_world(400.0, 300.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_with_ctrl_zooms_without_modifier_pans() {
        let (mut vp, _) = viewport();
        let wheel = WheelInput {
            delta_y: 100.0,
            ..WheelInput::default()
        };
        vp.apply_wheel(&wheel, 0.0);
        assert_eq!(vp.y(), 21.0 - 100.0);
        assert_eq!(vp.scale(), 1.0);

        let zoom = WheelInput {
            delta_y: -50.0,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
            ..WheelInput::default()
        };
        vp.apply_wheel(&zoom, 10.0);
        assert!(vp.scale() > 1.0);
    }

    #[test]
    fn test_shift_wheel_scrolls_horizontally() {
        let (mut vp, _) = viewport();
        let wheel = WheelInput {
            delta_y: 40.0,
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
            ..WheelInput::default()
        };
        vp.apply_wheel(&wheel, 0.0);
        assert_eq!(vp.x(), 30.0 - 40.0);
        assert_eq!(vp.y(), 21.0);
    }

    #[test]
    fn test_zoom_change_event_only_when_scale_changes() {
        let (mut vp, mut bus) = viewport();
        vp.update_viewport(0.0, &mut bus);
        bus.drain();
        vp.apply_drag(-10.0, -10.0);
        vp.update_viewport(16.0, &mut bus);
        assert!(!bus
            .drain()
            .iter()
            .any(|e| matches!(e, ViewportEvent::ZoomChanged { .. })));
        vp.set_scale(0.5);
        vp.update_viewport(32.0, &mut bus);
        assert!(bus
            .drain()
            .contains(&ViewportEvent::ZoomChanged { scale: 0.5 }));
    }

    #[test]
    fn test_multiplayer_broadcast_is_throttled_with_trailing_send() {
        let (mut vp, mut bus) = viewport();
        let count = |events: &[ViewportEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, ViewportEvent::MultiplayerViewport { .. }))
                .count()
        };
        vp.update_viewport(0.0, &mut bus);
        vp.apply_drag(-5.0, 0.0);
        vp.update_viewport(16.0, &mut bus);
        vp.apply_drag(-5.0, 0.0);
        vp.update_viewport(32.0, &mut bus);
        assert_eq!(count(&bus.drain()), 1);
        // Quiet frame after the throttle window sends the trailing update.
        vp.update_viewport(120.0, &mut bus);
        assert_eq!(count(&bus.drain()), 1);
    }

    #[test]
    fn test_drag_release_coasts() {
        let (mut vp, mut bus) = viewport();
        vp.begin_drag(0.0);
        vp.drag_by(-20.0, 0.0, 10.0);
        vp.drag_by(-20.0, 0.0, 20.0);
        vp.end_drag(20.0);
        assert!(vp.is_decelerating());
        vp.update_viewport(20.0, &mut bus);
        let x = vp.x();
        vp.update_viewport(36.0, &mut bus);
        assert!(vp.x() < x);
    }

    #[test]
    fn test_cancelled_drag_does_not_coast() {
        let (mut vp, mut bus) = viewport();
        vp.begin_drag(0.0);
        vp.drag_by(-20.0, 0.0, 10.0);
        vp.drag_by(-20.0, 0.0, 20.0);
        vp.cancel_drag();
        assert!(!vp.is_drag_active());
        assert!(!vp.is_decelerating());
        vp.update_viewport(20.0, &mut bus);
        let x = vp.x();
        vp.update_viewport(36.0, &mut bus);
        assert_eq!(vp.x(), x);
    }
}
