use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NoteKind;

/// A note on a ticket's activity timeline. Notes are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketNote {
    pub id: i64,
    pub ticket_id: i64,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub kind: NoteKind,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
