//! General application configuration.

use desk_core::enums::ReplyTone;
use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Tone used for reply drafts when none is given.
    #[serde(default)]
    pub default_tone: ReplyTone,

    /// Default row limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_tone: ReplyTone::default(),
            default_limit: default_limit(),
        }
    }
}
