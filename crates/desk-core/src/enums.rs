//! Status, priority, tone and note-kind enums for Triage Desk.
//!
//! Ticket and AI enums serialize as `SCREAMING_SNAKE_CASE` to match the
//! backend wire format. Parsing from user input is case-insensitive and
//! accepts `-` in place of `_` (see [`FromStr`] impls).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Normalize free-form user input into the wire spelling of an enum value.
fn normalize_variant(raw: &str) -> String {
    raw.trim().replace('-', "_").to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Status of a support ticket.
///
/// The backend accepts any transition, so no state machine is enforced here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    WaitingOnCustomer,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::WaitingOnCustomer,
        Self::Resolved,
        Self::Closed,
    ];

    /// Return the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::WaitingOnCustomer => "WAITING_ON_CUSTOMER",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_variant(raw);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidEnum {
                field: "status",
                value: raw.to_string(),
                allowed: Self::ALL.iter().map(|s| s.as_str()).collect(),
            })
    }
}

// ---------------------------------------------------------------------------
// TicketPriority
// ---------------------------------------------------------------------------

/// Priority of a support ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_variant(raw);
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidEnum {
                field: "priority",
                value: raw.to_string(),
                allowed: Self::ALL.iter().map(|p| p.as_str()).collect(),
            })
    }
}

// ---------------------------------------------------------------------------
// ReplyTone
// ---------------------------------------------------------------------------

/// Tone requested for an AI reply draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplyTone {
    #[default]
    Empathetic,
    Professional,
    Concise,
}

impl ReplyTone {
    pub const ALL: [Self; 3] = [Self::Empathetic, Self::Professional, Self::Concise];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empathetic => "EMPATHETIC",
            Self::Professional => "PROFESSIONAL",
            Self::Concise => "CONCISE",
        }
    }
}

impl fmt::Display for ReplyTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplyTone {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_variant(raw);
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidEnum {
                field: "tone",
                value: raw.to_string(),
                allowed: Self::ALL.iter().map(|t| t.as_str()).collect(),
            })
    }
}

// ---------------------------------------------------------------------------
// SuggestionPart
// ---------------------------------------------------------------------------

/// Which part of an AI triage suggestion to apply to the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPart {
    All,
    Category,
    Priority,
    Tags,
}

impl SuggestionPart {
    pub const ALL: [Self; 4] = [Self::All, Self::Category, Self::Priority, Self::Tags];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category => "category",
            Self::Priority => "priority",
            Self::Tags => "tags",
        }
    }

    #[must_use]
    pub const fn includes_category(self) -> bool {
        matches!(self, Self::All | Self::Category)
    }

    #[must_use]
    pub const fn includes_priority(self) -> bool {
        matches!(self, Self::All | Self::Priority)
    }

    #[must_use]
    pub const fn includes_tags(self) -> bool {
        matches!(self, Self::All | Self::Tags)
    }
}

impl fmt::Display for SuggestionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionPart {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|part| part.as_str() == normalized)
            .ok_or_else(|| CoreError::InvalidEnum {
                field: "part",
                value: raw.to_string(),
                allowed: Self::ALL.iter().map(|p| p.as_str()).collect(),
            })
    }
}

// ---------------------------------------------------------------------------
// NoteKind
// ---------------------------------------------------------------------------

/// Type tag of a ticket note.
///
/// The backend stores the tag as lowercase free text (max 32 chars). The known
/// tags get their own variants; anything else round-trips through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoteKind {
    #[default]
    Note,
    System,
    Ai,
    AiSummary,
    Other(String),
}

impl NoteKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Note => "note",
            Self::System => "system",
            Self::Ai => "ai",
            Self::AiSummary => "ai_summary",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for NoteKind {
    fn from(raw: String) -> Self {
        let tag = raw.trim().to_ascii_lowercase();
        match tag.as_str() {
            "note" => Self::Note,
            "system" => Self::System,
            "ai" => Self::Ai,
            "ai_summary" => Self::AiSummary,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for NoteKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<NoteKind> for String {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("OPEN", TicketStatus::Open)]
    #[case("in_progress", TicketStatus::InProgress)]
    #[case(" waiting-on-customer ", TicketStatus::WaitingOnCustomer)]
    #[case("Resolved", TicketStatus::Resolved)]
    fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TicketStatus) {
        assert_eq!(raw.parse::<TicketStatus>().unwrap(), expected);
    }

    #[test]
    fn status_rejects_unknown_value() {
        let err = "done".parse::<TicketStatus>().unwrap_err();
        assert!(err.to_string().contains("invalid status 'done'"));
        assert!(err.to_string().contains("WAITING_ON_CUSTOMER"));
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&TicketStatus::WaitingOnCustomer).unwrap();
        assert_eq!(json, "\"WAITING_ON_CUSTOMER\"");
        let back: TicketStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TicketStatus::WaitingOnCustomer);
    }

    #[test]
    fn priority_and_tone_defaults_match_backend() {
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
        assert_eq!(TicketStatus::default(), TicketStatus::Open);
        assert_eq!(ReplyTone::default(), ReplyTone::Empathetic);
    }

    #[test]
    fn tone_parses_lowercase() {
        assert_eq!("concise".parse::<ReplyTone>().unwrap(), ReplyTone::Concise);
        assert!("angry".parse::<ReplyTone>().is_err());
    }

    #[test]
    fn suggestion_part_inclusion() {
        assert!(SuggestionPart::All.includes_category());
        assert!(SuggestionPart::All.includes_priority());
        assert!(SuggestionPart::All.includes_tags());
        assert!(SuggestionPart::Category.includes_category());
        assert!(!SuggestionPart::Category.includes_priority());
        assert!(!SuggestionPart::Category.includes_tags());
        assert!(!SuggestionPart::Tags.includes_category());
        assert_eq!("Priority".parse::<SuggestionPart>().unwrap(), SuggestionPart::Priority);
        assert!("everything".parse::<SuggestionPart>().is_err());
    }

    #[rstest]
    #[case("note", NoteKind::Note)]
    #[case("system", NoteKind::System)]
    #[case("ai", NoteKind::Ai)]
    #[case("AI_SUMMARY", NoteKind::AiSummary)]
    #[case("escalation", NoteKind::Other("escalation".to_string()))]
    fn note_kind_from_wire(#[case] raw: &str, #[case] expected: NoteKind) {
        let kind: NoteKind = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
        assert_eq!(kind, expected);
    }

    #[test]
    fn note_kind_serializes_as_plain_tag() {
        assert_eq!(
            serde_json::to_string(&NoteKind::AiSummary).unwrap(),
            "\"ai_summary\""
        );
        assert_eq!(
            serde_json::to_string(&NoteKind::Other("handoff".into())).unwrap(),
            "\"handoff\""
        );
    }
}
