//! Typed partial updates for tickets.
//!
//! Each builder produces an update struct with `Option` fields; only `Some`
//! fields are serialized. `category` is doubly optional so that clearing a
//! category (`Some(None)`, sent as an explicit `null`) stays distinct from
//! leaving it untouched (`None`, key omitted).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{TicketPriority, TicketStatus};

// ---------------------------------------------------------------------------
// TicketPatch
// ---------------------------------------------------------------------------

/// Body of `PATCH /tickets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    #[schemars(with = "Option<String>")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl TicketPatch {
    /// True when the patch would not change anything server-side.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.body.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

pub struct TicketPatchBuilder(TicketPatch);

impl Default for TicketPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TicketPatch::default())
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.0.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.0.body = Some(body.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TicketStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: TicketPriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    /// Set the category; `None` clears it.
    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn build(self) -> TicketPatch {
        self.0
    }
}

// ---------------------------------------------------------------------------
// TriagePatch
// ---------------------------------------------------------------------------

/// A partial set of triage fields merged into a ticket edit buffer.
///
/// Only the four triage fields can be named, so nothing else (subject, body)
/// can leak into a suggestion-driven update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriagePatch {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl TriagePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

impl From<TriagePatch> for TicketPatch {
    fn from(patch: TriagePatch) -> Self {
        Self {
            status: patch.status,
            priority: patch.priority,
            category: patch.category,
            tags: patch.tags,
            ..Self::default()
        }
    }
}

pub struct TriagePatchBuilder(TriagePatch);

impl Default for TriagePatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TriagePatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TriagePatch::default())
    }

    #[must_use]
    pub const fn status(mut self, status: TicketStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: TicketPriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn build(self) -> TriagePatch {
        self.0
    }
}

/// Serde adapter keeping `Some(None)` as `null` and `None` as absent.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
