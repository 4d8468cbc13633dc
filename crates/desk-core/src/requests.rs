//! Request bodies and list filters sent to the backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{NoteKind, ReplyTone, TicketPriority, TicketStatus};

/// Body of `POST /tickets`. Status and priority fall back to the backend
/// defaults (OPEN, MEDIUM) when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub requester_email: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of `POST /tickets/{id}/notes`. The backend defaults the type to `note`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewNote {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub kind: Option<NoteKind>,
    pub body: String,
}

impl NewNote {
    #[must_use]
    pub fn new(kind: NoteKind, body: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            body: body.into(),
        }
    }
}

/// Filters for `GET /tickets`. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    /// Free-text search over subject, body and requester.
    pub query: Option<String>,
}

impl TicketFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.query.is_none()
    }
}

/// Body of `POST /ai/triage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    pub ticket_id: i64,
}

/// Body of `POST /ai/summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub ticket_id: i64,
    /// Ask the backend to persist the summary as an `ai_summary` note.
    pub save_as_note: bool,
}

/// Body of `POST /ai/reply-draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDraftRequest {
    pub ticket_id: i64,
    pub tone: ReplyTone,
}
