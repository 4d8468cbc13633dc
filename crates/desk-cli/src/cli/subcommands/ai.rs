use clap::Subcommand;

/// AI assist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AiCommands {
    /// Suggest category, priority and tags.
    Triage {
        id: i64,
        /// Apply the suggestion: all, category, priority or tags.
        #[arg(long)]
        apply: Option<String>,
    },
    /// Summarize the ticket.
    Summary {
        id: i64,
        /// Ask the backend to store the summary as a note.
        #[arg(long, conflicts_with = "save_local")]
        save: bool,
        /// Store the returned summary as a note from the client.
        #[arg(long)]
        save_local: bool,
    },
    /// Draft a reply to the requester.
    Reply {
        id: i64,
        /// empathetic, professional or concise (defaults to general.default_tone).
        #[arg(long)]
        tone: Option<String>,
        /// Copy the draft to the clipboard.
        #[arg(long)]
        copy: bool,
    },
}
