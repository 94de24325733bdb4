//! Pointer gestures that act on grid coordinates: hit testing, move drags,
//! and the drop collision check.

mod drag;
mod hit_test;
mod move_invalid;

pub use drag::MoveDrag;
pub use hit_test::{hit_test, HitTarget};
pub use move_invalid::{Collision, CollisionResolver, MoveMode};
