use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::de::null_to_default;
use crate::enums::{TicketPriority, TicketStatus};

/// A support ticket as last confirmed by the backend.
///
/// Never edited in place: every change is a replace-with-server-response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub subject: String,
    pub requester_email: String,
    pub body: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(default)]
    pub category: Option<String>,
    /// Insertion-ordered; duplicates are allowed.
    #[serde(default, deserialize_with = "null_to_default")]
    #[schemars(with = "Vec<String>")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
