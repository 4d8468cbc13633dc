use clap::Subcommand;

/// Ticket commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// List tickets, newest first.
    List {
        /// Only tickets with this status.
        #[arg(long)]
        status: Option<String>,
        /// Free-text search over subject, body and requester.
        #[arg(long)]
        query: Option<String>,
    },
    /// Open a ticket with its notes.
    Show { id: i64 },
    /// Create a ticket.
    Create {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        requester_email: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit triage fields and save them. An empty `--category` clears it.
    Update {
        id: i64,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags; replaces the current tags.
        #[arg(long)]
        tags: Option<String>,
    },
}
