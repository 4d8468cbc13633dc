use clap::{Args, Subcommand};

use crate::cli::subcommands::{AiCommands, NoteCommands, TicketCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Tickets: list, show, create, update.
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Ticket notes.
    Note {
        #[command(subcommand)]
        action: NoteCommands,
    },
    /// AI triage, summary and reply drafts.
    Ai {
        #[command(subcommand)]
        action: AiCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `desk schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name (for example `ticket`, `ticket-patch`, `ai-summary`).
    pub type_name: String,
}
