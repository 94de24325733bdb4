//! Tunable constants for the viewport, overlays, and input handling.
//!
//! Every field has a default, so hosts only need to supply the values they
//! want to change:
//!
//! ```
//! use gridview::config::RenderConfig;
//! let config = RenderConfig::from_json(r#"{ "snap_duration_ms": 50 }"#).unwrap();
//! assert_eq!(config.snap_duration_ms, 50.0);
//! ```

use serde::Deserialize;

use crate::error::{GridViewError, Result};

/// Smallest zoom scale.
pub const MIN_SCALE: f64 = 0.01;
/// Largest zoom scale.
pub const MAX_SCALE: f64 = 10.0;

/// Modifier that turns wheel scrolling into zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelZoomKey {
    Ctrl,
    Meta,
    Alt,
    /// Ctrl on Windows/Linux, Cmd on macOS. Trackpad pinch arrives as ctrl.
    #[default]
    CtrlOrMeta,
}

/// Render and interaction configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom factor per wheel pixel: `factor = exp(-delta * sensitivity)`.
    pub wheel_zoom_sensitivity: f64,
    pub wheel_zoom_key: WheelZoomKey,
    /// Pixels per wheel "line" (`deltaMode == 1`).
    pub wheel_line_height: f64,

    /// Delay before snapping back from the heading area.
    pub snap_wait_ms: f64,
    /// Duration of the eased snap-back animation.
    pub snap_duration_ms: f64,
    /// Time after a zoom step during which snap logic is suspended.
    pub zoom_settle_ms: f64,

    /// Largest gap between wheel samples that still counts as momentum.
    pub momentum_gap_ms: f64,
    /// Multiplicative slack allowed when checking that deltas decay.
    pub momentum_slack: f64,

    /// Minimum time between multiplayer viewport broadcasts.
    pub broadcast_throttle_ms: f64,

    /// Height of the column heading bar (screen pixels).
    pub heading_height: f64,
    /// Horizontal padding around row heading labels (screen pixels).
    pub row_heading_padding: f64,
    /// Approximate width of one heading digit (screen pixels).
    pub heading_char_width: f64,

    pub default_column_width: f64,
    pub default_row_height: f64,

    /// Grid lines are hidden below this scale.
    pub grid_lines_hide_scale: f64,
    /// Scale band above `grid_lines_hide_scale` over which they fade in.
    pub grid_lines_fade_band: f64,
    pub validations_hide_scale: f64,
    pub validations_fade_band: f64,

    /// Fraction of velocity kept per 16 ms frame after a drag release.
    pub decelerate_friction: f64,
    /// Velocity (px per 16 ms) below which coasting stops.
    pub decelerate_min_speed: f64,

    /// Milliseconds between marching-ants steps on the copy range.
    pub marching_ants_interval_ms: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_sensitivity: 0.01,
            wheel_zoom_key: WheelZoomKey::default(),
            wheel_line_height: 16.0,
            snap_wait_ms: 200.0,
            snap_duration_ms: 150.0,
            zoom_settle_ms: 300.0,
            momentum_gap_ms: 50.0,
            momentum_slack: 1.05,
            broadcast_throttle_ms: 100.0,
            heading_height: 21.0,
            row_heading_padding: 8.0,
            heading_char_width: 7.0,
            default_column_width: 100.0,
            default_row_height: 21.0,
            grid_lines_hide_scale: 0.1,
            grid_lines_fade_band: 0.2,
            validations_hide_scale: 0.3,
            validations_fade_band: 0.2,
            decelerate_friction: 0.95,
            decelerate_min_speed: 0.1,
            marching_ants_interval_ms: 80.0,
        }
    }
}

impl RenderConfig {
    /// Parse a (partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(?config, "loaded render config");
        Ok(config)
    }

    /// Reject configurations that would break clamping or timing.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(GridViewError::Config(format!(
                "scale bounds must satisfy 0 < min <= max (got {}..={})",
                self.min_scale, self.max_scale
            )));
        }
        if self.snap_wait_ms < 0.0 || self.snap_duration_ms <= 0.0 {
            return Err(GridViewError::Config(
                "snap timings must be positive".to_string(),
            ));
        }
        if self.momentum_slack < 1.0 {
            return Err(GridViewError::Config(format!(
                "momentum_slack must be >= 1.0 (got {})",
                self.momentum_slack
            )));
        }
        if self.default_column_width <= 0.0 || self.default_row_height <= 0.0 {
            return Err(GridViewError::Config(
                "default cell sizes must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.decelerate_friction) {
            return Err(GridViewError::Config(format!(
                "decelerate_friction must be in [0, 1) (got {})",
                self.decelerate_friction
            )));
        }
        Ok(())
    }

    /// Clamp a scale into the configured bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Linear alpha ramp used to fade layers out when zoomed far out.
///
/// Returns 0 below `hide_below`, 1 above `hide_below + band`, and a linear
/// ramp in between.
pub fn fade_alpha(scale: f64, hide_below: f64, band: f64) -> f64 {
    if scale < hide_below {
        return 0.0;
    }
    if band <= 0.0 {
        return 1.0;
    }
    ((scale - hide_below) / band).clamp(0.0, 1.0)
}
