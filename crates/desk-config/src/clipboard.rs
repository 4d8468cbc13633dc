//! Clipboard copy strategy configuration.

use serde::{Deserialize, Serialize};

fn default_strategies() -> Vec<String> {
    vec!["system".to_string(), "osc52".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipboardConfig {
    /// Copy strategies to try, in order. Known names: `system`, `osc52`.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }
}
