use desk_core::enums::{TicketPriority, TicketStatus};
use desk_engine::{Inbox, TicketDraft};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_optional;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub struct Params {
    pub subject: String,
    pub requester_email: String,
    pub body: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = build_draft(params)?;

    let mut inbox = Inbox::default();
    let progress = Progress::spinner("Creating ticket");
    let created = inbox.create(&ctx.gateway, &draft).await;
    progress.finish_clear();

    output(&created?, flags.format)
}

fn build_draft(params: Params) -> anyhow::Result<TicketDraft> {
    Ok(TicketDraft {
        subject: params.subject,
        requester_email: params.requester_email,
        body: params.body,
        priority: parse_optional::<TicketPriority>(params.priority.as_deref())?
            .unwrap_or_default(),
        status: parse_optional::<TicketStatus>(params.status.as_deref())?,
        category: params.category.unwrap_or_default(),
        tags: params.tags.unwrap_or_default(),
    })
}
