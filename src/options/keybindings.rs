use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::ScrollAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key strings (e.g. `Advance` → `["ArrowDown", ...]`).
    pub bindings: HashMap<ScrollAction, Vec<String>>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, ScrollAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (
                ScrollAction::Advance,
                vec!["ArrowDown".into(), "PageDown".into(), "Space".into()],
            ),
            (
                ScrollAction::Retreat,
                vec!["ArrowUp".into(), "PageUp".into()],
            ),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, keys) in &self.bindings {
            for key in keys {
                let _ = self.key_to_action.insert(key.clone(), *action);
            }
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ScrollAction> {
        self.key_to_action.get(key).copied()
    }
}
