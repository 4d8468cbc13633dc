//! Entity structs for all Triage Desk domain objects.
//!
//! Field names follow the backend's camelCase JSON. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod ai;
mod note;
mod ticket;

pub use ai::{AiReplyDraft, AiSummary, AiTriageSuggestion, ExtractedEntities};
pub use note::TicketNote;
pub use ticket::Ticket;
