//! Classifies wheel input as OS inertial ("momentum") scrolling or discrete
//! wheel clicks.
//!
//! Momentum scrolling arrives as a dense stream of events whose deltas decay
//! smoothly. Discrete wheel clicks arrive at irregular intervals with deltas
//! that do not decay. The detector keeps the last few samples and checks both
//! properties across the whole buffer.

use std::collections::VecDeque;

/// Number of samples the classification looks at.
pub const MOMENTUM_SAMPLES: usize = 5;

/// `WheelEvent.deltaMode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// One wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSample {
    /// Event time in milliseconds.
    pub time: f64,
    /// Dominant-axis delta.
    pub delta: f64,
    pub delta_mode: DeltaMode,
}

/// Fixed-size ring buffer of recent wheel samples.
#[derive(Debug, Clone)]
pub struct MomentumScrollDetector {
    samples: VecDeque<WheelSample>,
    gap_tolerance_ms: f64,
    slack: f64,
}

impl Default for MomentumScrollDetector {
    fn default() -> Self {
        Self::new(50.0, 1.05)
    }
}

impl MomentumScrollDetector {
    /// `gap_tolerance_ms`: largest allowed gap between samples.
    /// `slack`: each |delta| may be at most `slack` times the previous one.
    pub fn new(gap_tolerance_ms: f64, slack: f64) -> Self {
        Self {
            samples: VecDeque::with_capacity(MOMENTUM_SAMPLES),
            gap_tolerance_ms,
            slack,
        }
    }

    pub fn add_event(&mut self, sample: WheelSample) {
        if self.samples.len() == MOMENTUM_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True iff the buffer is full, every delta decays (within slack), and
    /// every gap is under the tolerance. Line/page samples come from
    /// notched wheels and never count as momentum.
    pub fn has_momentum_scroll(&self) -> bool {
        if self.samples.len() < MOMENTUM_SAMPLES {
            return false;
        }
        if self
            .samples
            .iter()
            .any(|s| s.delta_mode != DeltaMode::Pixel)
        {
            return false;
        }
        self.samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .all(|(prev, next)| {
                let decays = next.delta.abs() <= prev.delta.abs() * self.slack;
                let gap = next.time - prev.time;
                decays && gap >= 0.0 && gap < self.gap_tolerance_ms
            })
    }
}
