use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::de::null_to_default;
use crate::enums::{ReplyTone, TicketPriority};

/// Result of an AI triage run. Ephemeral: never persisted client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiTriageSuggestion {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "Vec<String>")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "String")]
    pub rationale: String,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "ExtractedEntities")]
    pub entities: ExtractedEntities,
    /// Server-side AI run record this suggestion came from.
    #[serde(default)]
    pub ai_run_id: Option<i64>,
}

/// Entities the model pulled out of the ticket text. Any field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntities {
    #[serde(default)]
    pub requester_email: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Result of an AI summary run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    #[serde(default)]
    pub ticket_id: Option<i64>,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "String")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "Vec<String>")]
    pub key_points: Vec<String>,
    /// Set once the summary exists as a note, whether the server auto-saved
    /// it or the client saved the displayed result.
    #[serde(default)]
    pub saved_note_id: Option<i64>,
}

impl AiSummary {
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.saved_note_id.is_some()
    }
}

/// Result of an AI reply-draft run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiReplyDraft {
    #[serde(default)]
    pub ticket_id: Option<i64>,
    pub tone: ReplyTone,
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "String")]
    pub draft: String,
    #[serde(default)]
    pub ai_run_id: Option<i64>,
}
