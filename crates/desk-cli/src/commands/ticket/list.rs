use anyhow::bail;
use serde::Serialize;

use desk_core::entities::Ticket;
use desk_core::fields::join_tags;
use desk_core::requests::TicketFilter;
use desk_engine::Inbox;
use desk_engine::inbox::parse_status_filter;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// One line of the ticket table.
#[derive(Debug, Serialize)]
struct TicketRow<'a> {
    id: i64,
    status: String,
    priority: String,
    category: &'a str,
    subject: &'a str,
    requester: &'a str,
    tags: String,
    updated: String,
}

impl<'a> From<&'a Ticket> for TicketRow<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            id: ticket.id,
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
            category: ticket.category.as_deref().unwrap_or("-"),
            subject: &ticket.subject,
            requester: &ticket.requester_email,
            tags: join_tags(&ticket.tags),
            updated: ticket.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub async fn run(
    status: Option<&str>,
    query: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(status, query)?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let mut inbox = Inbox::default();
    let progress = Progress::spinner("Loading tickets");
    let loaded = inbox.refresh(&ctx.gateway, filter).await;
    progress.finish_clear();
    if !loaded {
        bail!("{}", inbox.error().unwrap_or("Failed to load tickets"));
    }

    let tickets = &inbox.tickets()[..inbox.tickets().len().min(limit)];
    if flags.format == OutputFormat::Table {
        let rows = tickets.iter().map(TicketRow::from).collect::<Vec<_>>();
        output(&rows, flags.format)
    } else {
        output(&tickets, flags.format)
    }
}

fn build_filter(status: Option<&str>, query: Option<&str>) -> anyhow::Result<TicketFilter> {
    Ok(TicketFilter {
        status: parse_status_filter(status)?,
        query: query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(String::from),
    })
}
