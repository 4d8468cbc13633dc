use anyhow::bail;
use desk_engine::{Outcome, Workspace};
use desk_gateway::HttpGateway;

use crate::context::AppContext;
use crate::progress::Progress;

/// Turn a workspace outcome into a command result. `message` is the error
/// the engine recorded for the operation, if any.
pub fn ensure_applied(outcome: Outcome, message: Option<&str>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Rejected(reason) => bail!("{reason}"),
        Outcome::Failed => bail!("{}", message.unwrap_or("request failed")),
        Outcome::Stale => bail!("the ticket changed while the request was in flight"),
    }
}

/// Open a ticket in a fresh workspace, failing if the ticket or its notes
/// could not be loaded.
pub async fn open(ctx: &AppContext, id: i64) -> anyhow::Result<Workspace<HttpGateway>> {
    let workspace = ctx.workspace()?;
    let progress = Progress::spinner(&format!("Loading ticket #{id}"));
    let outcome = workspace.load(id).await;
    progress.finish_clear();
    ensure_applied(outcome, workspace.view().error.as_deref())?;
    Ok(workspace)
}

#[cfg(test)]
mod tests {
    use desk_engine::{Outcome, Rejection};

    use super::ensure_applied;

    #[test]
    fn failed_outcome_carries_engine_message() {
        let err = ensure_applied(Outcome::Failed, Some("Failed to save: 500: boom"))
            .expect_err("should fail");
        assert_eq!(err.to_string(), "Failed to save: 500: boom");
    }

    #[test]
    fn rejection_reads_as_reason() {
        let err = ensure_applied(Outcome::Rejected(Rejection::EmptyNote), None)
            .expect_err("should fail");
        assert_eq!(err.to_string(), "note is empty");
        assert!(ensure_applied(Outcome::Applied, None).is_ok());
    }
}
