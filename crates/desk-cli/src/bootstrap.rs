use anyhow::Context;
use desk_config::DeskConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (including `.env`) and apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DeskConfig> {
    let mut config = DeskConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, flags)?;
    Ok(config)
}

fn apply_overrides(config: &mut DeskConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(url) = &flags.api_url {
        url.trim().clone_into(&mut config.api.base_url);
        config
            .api
            .validate()
            .with_context(|| format!("invalid --api-url '{url}'"))?;
        tracing::debug!(base_url = %config.api.base_url, "api url overridden from command line");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use desk_config::DeskConfig;

    use super::apply_overrides;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};

    fn flags(api_url: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
            api_url: api_url.map(String::from),
            color: ColorMode::Auto,
            progress: ProgressMode::Auto,
        }
    }

    #[test]
    fn api_url_flag_replaces_configured_url() {
        let mut config = DeskConfig::default();
        apply_overrides(&mut config, &flags(Some(" https://desk.example.com/api/ ")))
            .expect("override should apply");
        assert_eq!(
            config.api.normalized_base_url(),
            "https://desk.example.com/api"
        );
    }

    #[test]
    fn invalid_api_url_flag_is_rejected() {
        let mut config = DeskConfig::default();
        let err = apply_overrides(&mut config, &flags(Some("desk.example.com")))
            .expect_err("override should fail");
        assert!(err.to_string().contains("invalid --api-url"));
    }

    #[test]
    fn no_flag_keeps_config() {
        let mut config = DeskConfig::default();
        apply_overrides(&mut config, &flags(None)).expect("no-op override");
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
    }
}
