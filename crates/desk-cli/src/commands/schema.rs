use anyhow::bail;
use schemars::{Schema, schema_for};

use desk_core::entities::{AiReplyDraft, AiSummary, AiTriageSuggestion, Ticket, TicketNote};
use desk_core::patch::TicketPatch;
use desk_core::requests::{NewNote, NewTicket};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `desk schema`.
pub const SCHEMA_TYPES: [&str; 8] = [
    "ticket",
    "ticket-note",
    "ticket-patch",
    "new-ticket",
    "new-note",
    "ai-triage-suggestion",
    "ai-summary",
    "ai-reply-draft",
];

/// Handle `desk schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_named(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_named(type_name: &str) -> anyhow::Result<Schema> {
    let normalized = type_name.trim().to_ascii_lowercase().replace('_', "-");
    let schema = match normalized.as_str() {
        "ticket" => schema_for!(Ticket),
        "ticket-note" | "note" => schema_for!(TicketNote),
        "ticket-patch" | "patch" => schema_for!(TicketPatch),
        "new-ticket" => schema_for!(NewTicket),
        "new-note" => schema_for!(NewNote),
        "ai-triage-suggestion" | "triage" => schema_for!(AiTriageSuggestion),
        "ai-summary" | "summary" => schema_for!(AiSummary),
        "ai-reply-draft" | "reply" => schema_for!(AiReplyDraft),
        _ => bail!(
            "unknown schema type '{type_name}'. Known types: {}",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(schema)
}
