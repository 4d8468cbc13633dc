use desk_config::{ApiConfig, DeskConfig, ENV_PREFIX};

/// Sections whose env keys need a `__` separator, with an example key.
const SECTIONS: [(&str, &str); 3] = [
    ("API", "DESK_API__BASE_URL"),
    ("CLIPBOARD", "DESK_CLIPBOARD__STRATEGIES"),
    ("GENERAL", "DESK_GENERAL__DEFAULT_TONE"),
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &DeskConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DeskConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for (section, example) in SECTIONS {
        let single = format!("{ENV_PREFIX}{section}_");
        let double = format!("{ENV_PREFIX}{section}__");
        let mistyped = env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double));
        if mistyped && section_is_default(config, section) {
            warnings.push(format!(
                "{section} config appears default while {single}* env vars exist. Use double underscores (example: {example})."
            ));
        }
    }

    warnings
}

fn section_is_default(config: &DeskConfig, section: &str) -> bool {
    let defaults = DeskConfig::default();
    match section {
        "API" => {
            let api = ApiConfig::default();
            config.api.base_url == api.base_url && config.api.timeout_secs == api.timeout_secs
        }
        "CLIPBOARD" => config.clipboard.strategies == defaults.clipboard.strategies,
        _ => {
            config.general.default_tone == defaults.general.default_tone
                && config.general.default_limit == defaults.general.default_limit
        }
    }
}

#[cfg(test)]
mod tests {
    use desk_config::DeskConfig;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &DeskConfig::default(),
            env(&["DESK_API_BASE_URL", "DESK_GENERAL_DEFAULT_TONE", "HOME"]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("DESK_API__BASE_URL"));
    }

    #[test]
    fn does_not_warn_for_double_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &DeskConfig::default(),
            env(&["DESK_API__BASE_URL", "DESK_CLIPBOARD__STRATEGIES", "DESK_LOG"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn does_not_warn_when_section_is_configured() {
        let mut config = DeskConfig::default();
        config.api.base_url = "https://desk.example.com/api".to_string();
        let warnings = collect_unconfigured_warnings(&config, env(&["DESK_API_BASE_URL"]));
        assert!(warnings.is_empty());
    }
}
