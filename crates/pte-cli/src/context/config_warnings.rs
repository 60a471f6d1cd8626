use pte_config::PteConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PteConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PteConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.discord.is_configured()
        && env_keys
            .iter()
            .any(|key| key.starts_with("PTE_DISCORD") && !key.starts_with("PTE_DISCORD__"))
    {
        warnings.push(
            "Discord config appears default while PTE_DISCORD* env vars exist. Use double underscores (example: PTE_DISCORD__BOT_TOKEN)."
                .to_string(),
        );
    }

    if env_keys
        .iter()
        .any(|key| key.starts_with("PTE_BOT") && !key.starts_with("PTE_BOT__"))
    {
        warnings.push(
            "PTE_BOT* env vars without a double underscore are ignored (example: PTE_BOT__POLL_INTERVAL_SECS)."
                .to_string(),
        );
    }

    warnings
}
