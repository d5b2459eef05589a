//! Load `EngineConfig` from the settings file and environment.
//!
//! Precedence, lowest to highest: built-in defaults, the JSON settings file,
//! environment variables. Command-line flags are applied by the binary on top.

use crate::env::{config_file, env_cache_ttl_ms, env_locale, env_max_results, env_pain_trend};
use anyhow::{Context, Result};
use cyclecare_intelligence::EngineConfig;
use std::fs;
use std::path::Path;

/// Load the configuration from the resolved settings file and environment.
pub fn load_engine_config() -> Result<EngineConfig> {
    let path = config_file();
    load_engine_config_from(path.as_deref())
}

/// Load the configuration from `path` (if given and present) and environment.
///
/// A missing file yields defaults. A file that exists but does not parse is an
/// error, so a typo never silently reverts every setting.
pub fn load_engine_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let from_file = match path {
        Some(path) if path.exists() => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: EngineConfig = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            tracing::debug!(target: "cyclecare::config", path = %path.display(), "loaded config file");
            config
        }
        _ => EngineConfig::default(),
    };
    Ok(apply_env_overrides(from_file).validated())
}

/// Apply `CYCLECARE_*` environment overrides to `config`.
pub fn apply_env_overrides(mut config: EngineConfig) -> EngineConfig {
    if let Some(max_results) = env_max_results() {
        config.max_results = max_results;
    }
    if let Some(ttl_ms) = env_cache_ttl_ms() {
        config.cache.ttl_ms = ttl_ms;
    }
    if let Some(locale) = env_locale() {
        config.locale = locale;
    }
    if let Some(ordering) = env_pain_trend() {
        config.pain_trend_ordering = ordering;
    }
    config
}
