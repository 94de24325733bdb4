use serde::{Deserialize, Serialize};

use super::Pos;

/// Interactive glyph drawn over a validated cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecialSprite {
    /// Boolean validation rendered as a checkbox.
    Checkbox { checked: bool },
    /// List validation rendered as a dropdown arrow.
    Dropdown,
}

/// A validated cell that shows a special sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCell {
    pub pos: Pos,
    pub sprite: SpecialSprite,
}
