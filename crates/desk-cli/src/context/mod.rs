//! Application context shared by command handlers.

mod config_warnings;

use desk_config::DeskConfig;
use desk_engine::{ClipboardChain, Workspace};
use desk_gateway::HttpGateway;

pub use config_warnings::warn_unconfigured;

pub struct AppContext {
    pub config: DeskConfig,
    pub gateway: HttpGateway,
}

impl AppContext {
    pub fn init(config: DeskConfig) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(&config.api)?;
        tracing::debug!(base_url = gateway.base_url(), "ticket gateway ready");
        Ok(Self { config, gateway })
    }

    /// Clipboard strategies in the configured order.
    pub fn clipboard(&self) -> anyhow::Result<ClipboardChain> {
        Ok(ClipboardChain::from_names(
            &self.config.clipboard.strategies,
        )?)
    }

    /// A fresh, unloaded workspace over the shared gateway.
    pub fn workspace(&self) -> anyhow::Result<Workspace<HttpGateway>> {
        Ok(Workspace::new(self.gateway.clone(), self.clipboard()?))
    }
}
