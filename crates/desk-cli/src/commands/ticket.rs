#[path = "ticket/create.rs"]
mod create;
#[path = "ticket/list.rs"]
mod list;
#[path = "ticket/show.rs"]
mod show;
#[path = "ticket/update.rs"]
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TicketCommands;
use crate::context::AppContext;

/// Handle `desk ticket`.
pub async fn handle(
    action: &TicketCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TicketCommands::List { status, query } => {
            list::run(status.as_deref(), query.as_deref(), ctx, flags).await
        }
        TicketCommands::Show { id } => show::run(*id, ctx, flags).await,
        TicketCommands::Create {
            subject,
            requester_email,
            body,
            priority,
            status,
            category,
            tags,
        } => {
            let params = create::Params {
                subject: subject.clone(),
                requester_email: requester_email.clone(),
                body: body.clone(),
                priority: priority.clone(),
                status: status.clone(),
                category: category.clone(),
                tags: tags.clone(),
            };
            create::run(params, ctx, flags).await
        }
        TicketCommands::Update {
            id,
            status,
            priority,
            category,
            tags,
        } => {
            let params = update::Params {
                id: *id,
                status: status.clone(),
                priority: priority.clone(),
                category: category.clone(),
                tags: tags.clone(),
            };
            update::run(params, ctx, flags).await
        }
    }
}
