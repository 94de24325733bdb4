//! Coasting after a drag-to-pan is released.
//!
//! Pointer positions are recorded while dragging; on release the velocity
//! over the last [`VELOCITY_WINDOW_MS`] is used as the initial velocity and
//! decays by `friction` per 16 ms frame until it drops below `min_speed`.

use std::collections::VecDeque;

/// Frame length the friction factor is expressed in.
const FRAME_MS: f64 = 16.0;

/// Only drag samples this recent contribute to the release velocity.
pub const VELOCITY_WINDOW_MS: f64 = 100.0;

const MAX_SNAPSHOTS: usize = 60;

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    x: f64,
    y: f64,
    time: f64,
}

#[derive(Debug, Clone)]
pub struct Decelerate {
    friction: f64,
    min_speed: f64,
    /// Screen px per ms, `None` while not coasting.
    velocity: Option<(f64, f64)>,
    snapshots: VecDeque<Snapshot>,
}

impl Decelerate {
    pub fn new(friction: f64, min_speed: f64) -> Self {
        Self {
            friction,
            min_speed,
            velocity: None,
            snapshots: VecDeque::with_capacity(MAX_SNAPSHOTS),
        }
    }

    pub fn is_active(&self) -> bool {
        self.velocity.is_some()
    }

    /// Stop coasting and forget recorded samples.
    pub fn reset(&mut self) {
        self.velocity = None;
        self.snapshots.clear();
    }

    /// Record the viewport position during a drag.
    pub fn on_move(&mut self, x: f64, y: f64, time: f64) {
        if self.snapshots.len() == MAX_SNAPSHOTS {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(Snapshot { x, y, time });
    }

    /// Start coasting from the velocity of the recent drag samples.
    pub fn on_up(&mut self, x: f64, y: f64, time: f64) {
        let start = self
            .snapshots
            .iter()
            .find(|s| time - s.time <= VELOCITY_WINDOW_MS)
            .copied();
        self.snapshots.clear();
        let Some(start) = start else {
            return;
        };
        let dt = time - start.time;
        if dt <= 0.0 {
            return;
        }
        let v = ((x - start.x) / dt, (y - start.y) / dt);
        if speed_per_frame(v) >= self.min_speed {
            self.velocity = Some(v);
        }
    }

    /// Advance by `elapsed_ms`; returns the position delta to apply.
    pub fn update(&mut self, elapsed_ms: f64) -> Option<(f64, f64)> {
        let (vx, vy) = self.velocity?;
        if elapsed_ms <= 0.0 {
            return None;
        }
        let delta = (vx * elapsed_ms, vy * elapsed_ms);
        let decay = self.friction.powf(elapsed_ms / FRAME_MS);
        let next = (vx * decay, vy * decay);
        self.velocity = (speed_per_frame(next) >= self.min_speed).then_some(next);
        Some(delta)
    }
}

fn speed_per_frame((vx, vy): (f64, f64)) -> f64 {
    vx.hypot(vy) * FRAME_MS
}
