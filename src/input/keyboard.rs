use serde::{Deserialize, Serialize};

use crate::stage::Direction;

/// Story actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// advance = ["ArrowDown", "PageDown", "Space"]
/// retreat = ["ArrowUp", "PageUp"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAction {
    /// Step forward through the stages.
    Advance,
    /// Step backward through the stages.
    Retreat,
}

impl ScrollAction {
    /// The stage step this action requests.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Advance => Direction::Forward,
            Self::Retreat => Direction::Backward,
        }
    }
}
