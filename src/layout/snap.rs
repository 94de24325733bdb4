//! Snap-back state for a viewport that drifted into the heading area.

/// Where the snap-back logic currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapState {
    #[default]
    Idle,
    /// Heading is obscured; waiting since `since_ms` before snapping.
    Waiting { since_ms: f64 },
    /// Eased animation back to the heading boundary is running.
    Snapping(SnapAnimation),
}

impl SnapState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Waiting { .. })
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self, Self::Snapping(_))
    }
}

/// Position animation from `from` to `to` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl SnapAnimation {
    /// Eased position at `now_ms`, and whether the animation has finished.
    pub fn position_at(&self, now_ms: f64) -> ((f64, f64), bool) {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
        };
        if t >= 1.0 {
            return (self.to, true);
        }
        let e = ease_out_cubic(t);
        (
            (
                self.from.0 + (self.to.0 - self.from.0) * e,
                self.from.1 + (self.to.1 - self.from.1) * e,
            ),
            false,
        )
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_is_monotonic_and_lands_on_target() {
        let anim = SnapAnimation {
            from: (100.0, 40.0),
            to: (30.0, 21.0),
            start_ms: 1_000.0,
            duration_ms: 150.0,
        };
        let mut last = 100.0;
        for step in 0..15 {
            let ((x, _), done) = anim.position_at(1_000.0 + f64::from(step) * 10.0);
            assert!(!done);
            assert!(x <= last);
            last = x;
        }
        let (pos, done) = anim.position_at(1_150.0);
        assert!(done);
        assert_eq!(pos, (30.0, 21.0));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let anim = SnapAnimation {
            from: (10.0, 10.0),
            to: (0.0, 0.0),
            start_ms: 0.0,
            duration_ms: 0.0,
        };
        assert_eq!(anim.position_at(0.0), ((0.0, 0.0), true));
    }
}
