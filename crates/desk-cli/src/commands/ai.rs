use serde::Serialize;

use desk_core::entities::{AiSummary, AiTriageSuggestion, Ticket};
use desk_core::enums::{ReplyTone, SuggestionPart};
use desk_engine::WorkspaceView;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AiCommands;
use crate::commands::shared::parse::parse_optional;
use crate::commands::shared::workspace::{ensure_applied, open};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriageOutput<'a> {
    suggestion: Option<&'a AiTriageSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<SuggestionPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticket: Option<&'a Ticket>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyOutput<'a> {
    tone: ReplyTone,
    draft: &'a str,
    copied: bool,
}

/// Handle `desk ai`.
pub async fn handle(action: &AiCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AiCommands::Triage { id, apply } => triage(*id, apply.as_deref(), ctx, flags).await,
        AiCommands::Summary {
            id,
            save,
            save_local,
        } => summary(*id, *save, *save_local, ctx, flags).await,
        AiCommands::Reply { id, tone, copy } => {
            reply(*id, tone.as_deref(), *copy, ctx, flags).await
        }
    }
}

async fn triage(
    id: i64,
    apply: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let part = parse_optional::<SuggestionPart>(apply)?;
    let workspace = open(ctx, id).await?;

    let progress = Progress::spinner("Running AI triage");
    let outcome = workspace.run_triage().await;
    if let Err(error) = ensure_applied(outcome, workspace.view().ai.triage().error()) {
        progress.finish_err("AI triage failed");
        return Err(error);
    }

    if let Some(part) = part {
        progress.set_message(&format!("Applying suggested {part}"));
        let outcome = workspace.apply_suggestion(part).await;
        ensure_applied(outcome, workspace.view().error.as_deref())?;
    }
    progress.finish_clear();

    let view = workspace.view();
    output(
        &TriageOutput {
            suggestion: view.ai.triage().result(),
            applied: part,
            ticket: part.and(view.ticket.as_ref()),
        },
        flags.format,
    )
}

async fn summary(
    id: i64,
    save: bool,
    save_local: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let workspace = open(ctx, id).await?;

    let progress = Progress::spinner("Summarizing ticket");
    let outcome = workspace.run_summary(save).await;
    if let Err(error) = ensure_applied(outcome, workspace.view().ai.summary().error()) {
        progress.finish_err("AI summary failed");
        return Err(error);
    }

    if save_local {
        progress.set_message("Saving summary as note");
        let outcome = workspace.save_summary_as_note().await;
        ensure_applied(outcome, workspace.view().error.as_deref())?;
    }
    progress.finish_clear();

    let view: WorkspaceView = workspace.view();
    let summary: Option<&AiSummary> = view.ai.summary().result();
    output(&summary, flags.format)
}

async fn reply(
    id: i64,
    tone: Option<&str>,
    copy: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let tone = parse_optional::<ReplyTone>(tone)?.unwrap_or(ctx.config.general.default_tone);
    let workspace = open(ctx, id).await?;

    let progress = Progress::spinner(&format!("Drafting {tone} reply"));
    let outcome = workspace.run_reply_draft(tone).await;
    progress.finish_clear();
    ensure_applied(outcome, workspace.view().ai.reply().error())?;

    if copy {
        let outcome = workspace.copy_reply_draft();
        ensure_applied(outcome, workspace.view().ai.copy_error())?;
    }

    let view = workspace.view();
    output(
        &ReplyOutput {
            tone,
            draft: view.ai.reply_text(),
            copied: view.ai.copied(),
        },
        flags.format,
    )
}
