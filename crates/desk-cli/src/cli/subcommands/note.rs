use clap::Subcommand;

/// Note commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NoteCommands {
    /// List a ticket's notes, newest first.
    List { id: i64 },
    /// Add a note to a ticket.
    Add {
        id: i64,
        #[arg(long)]
        body: String,
    },
}
