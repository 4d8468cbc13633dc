use desk_core::enums::{TicketPriority, TicketStatus};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_optional;
use crate::commands::shared::workspace::{ensure_applied, open};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub struct Params {
    pub id: i64,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let status = parse_optional::<TicketStatus>(params.status.as_deref())?;
    let priority = parse_optional::<TicketPriority>(params.priority.as_deref())?;

    let workspace = open(ctx, params.id).await?;
    if let Some(status) = status {
        workspace.set_status(status);
    }
    if let Some(priority) = priority {
        workspace.set_priority(priority);
    }
    if let Some(category) = params.category.as_deref() {
        workspace.set_category_text(category);
    }
    if let Some(tags) = params.tags.as_deref() {
        workspace.set_tags_text(tags);
    }

    let progress = Progress::spinner("Saving ticket");
    let outcome = workspace.save().await;
    progress.finish_clear();

    let view = workspace.view();
    ensure_applied(outcome, view.error.as_deref())?;
    output(&view.ticket, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.status.is_none()
        && params.priority.is_none()
        && params.category.is_none()
        && params.tags.is_none()
    {
        anyhow::bail!("At least one of --status, --priority, --category, or --tags must be provided");
    }
    Ok(())
}
