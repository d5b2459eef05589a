use anyhow::Result;
use cyclecare_intelligence::{Locale, PainTrendOrdering};
use std::path::PathBuf;

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the path to the configuration file.
///
/// `CYCLECARE_CONFIG` wins; otherwise `~/.config/cyclecare/config.json`.
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("CYCLECARE_CONFIG") {
        if !custom.trim().is_empty() {
            return Some(PathBuf::from(custom));
        }
    }
    home_dir()
        .ok()
        .map(|h| h.join(".config/cyclecare/config.json"))
}

/// Returns the result limit from `CYCLECARE_MAX_RESULTS`, if set to a positive integer.
pub fn env_max_results() -> Option<usize> {
    std::env::var("CYCLECARE_MAX_RESULTS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|n| *n > 0)
}

/// Returns the result-cache TTL from `CYCLECARE_CACHE_TTL_MS`.
pub fn env_cache_ttl_ms() -> Option<u64> {
    std::env::var("CYCLECARE_CACHE_TTL_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Returns the rationale locale from `CYCLECARE_LOCALE` (`en`, `zh`, `zh-CN`, ...).
pub fn env_locale() -> Option<Locale> {
    std::env::var("CYCLECARE_LOCALE")
        .ok()
        .and_then(|s| Locale::from_label(&s))
}

/// Returns the pain-trend ordering from `CYCLECARE_PAIN_TREND`.
pub fn env_pain_trend() -> Option<PainTrendOrdering> {
    std::env::var("CYCLECARE_PAIN_TREND")
        .ok()
        .and_then(|s| PainTrendOrdering::from_label(&s))
}

/// Checks if `CYCLECARE_DIAGNOSE` environment variable is set to true.
pub fn env_diag() -> bool {
    std::env::var("CYCLECARE_DIAGNOSE")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
