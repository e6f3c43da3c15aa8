use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Overlay text revealed at each stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayOptions {
    /// Text per stage; stages without an entry show nothing.
    pub texts: BTreeMap<Stage, String>,
    /// Fade in/out duration in seconds.
    pub fade_secs: f32,
}

impl OverlayOptions {
    /// Text configured for `stage`.
    #[must_use]
    pub fn text_for(&self, stage: Stage) -> Option<&str> {
        self.texts.get(&stage).map(String::as_str)
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        let texts = BTreeMap::from([
            (Stage::State1, "Precision in every angle".to_owned()),
            (Stage::State2, "Built for clinical imaging".to_owned()),
        ]);
        Self {
            texts,
            fade_secs: 0.5,
        }
    }
}
