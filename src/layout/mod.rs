//! Layout engine: cell positions, viewport transform, and scroll physics.
//!
//! This module handles:
//! - Column/row offsets and pixel <-> cell conversion
//! - Viewport state (pan position, zoom, snap-back)
//! - Momentum classification of wheel input and drag coasting
//! - Per-sheet persistence of the viewport

mod decelerate;
mod momentum;
mod persist;
mod sheet_offsets;
mod snap;
mod viewport;

pub use decelerate::Decelerate;
pub use momentum::{DeltaMode, MomentumScrollDetector, WheelSample, MOMENTUM_SAMPLES};
pub use persist::{SavedViewport, ViewportStore};
pub use sheet_offsets::{Axis, SheetOffsets};
pub use snap::{SnapAnimation, SnapState};
pub use viewport::{Modifiers, Viewport, ViewportTransform, WheelInput};
