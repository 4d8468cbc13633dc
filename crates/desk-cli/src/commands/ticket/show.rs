use crate::cli::GlobalFlags;
use crate::commands::shared::workspace::open;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let workspace = open(ctx, id).await?;
    output(&workspace.view(), flags.format)
}
