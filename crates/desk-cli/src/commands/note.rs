use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NoteCommands;
use crate::commands::shared::workspace::{ensure_applied, open};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `desk note`.
pub async fn handle(
    action: &NoteCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        NoteCommands::List { id } => {
            let workspace = open(ctx, *id).await?;
            output(&workspace.view().notes, flags.format)
        }
        NoteCommands::Add { id, body } => {
            let workspace = open(ctx, *id).await?;
            workspace.set_note_draft(body);

            let progress = Progress::spinner("Adding note");
            let outcome = workspace.add_note().await;
            progress.finish_clear();

            let view = workspace.view();
            ensure_applied(outcome, view.error.as_deref())?;
            let note = view.notes.first().context("created note missing from timeline")?;
            output(note, flags.format)
        }
    }
}
