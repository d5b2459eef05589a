//! JSON input files and engine assembly shared by the command handlers.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use cyclecare_intelligence::{
    parse_records, CatalogRepository, EngineConfig, FeedbackHistory, Locale, RawRecord,
    RecommendationEngine, StaticCatalog, TimeSeriesRecord,
};
use cyclecare_state::load_engine_config;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Input files named on the command line. Absent files mean empty input.
#[derive(Debug, Default)]
pub(crate) struct RequestFiles {
    pub records: Option<PathBuf>,
    pub feedback: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub efficiency_history: Option<PathBuf>,
}

/// Everything a request needs, loaded from [`RequestFiles`].
pub(crate) struct LoadedInputs {
    pub records: Vec<TimeSeriesRecord>,
    pub feedback: FeedbackHistory,
    pub catalog: Arc<dyn CatalogRepository>,
    pub efficiency_history: Vec<f64>,
}

impl RequestFiles {
    pub(crate) fn load(&self) -> Result<LoadedInputs> {
        Ok(LoadedInputs {
            records: read_records(self.records.as_deref())?,
            feedback: read_feedback(self.feedback.as_deref())?,
            catalog: read_catalog(self.catalog.as_deref())?,
            efficiency_history: read_efficiency_history(self.efficiency_history.as_deref())?,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} file {}", what, path.display()))
}

/// Calendar records. Malformed entries are skipped with a warning.
pub(crate) fn read_records(path: Option<&Path>) -> Result<Vec<TimeSeriesRecord>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw: Vec<RawRecord> = read_json(path, "records")?;
    Ok(parse_records(raw))
}

pub(crate) fn read_feedback(path: Option<&Path>) -> Result<FeedbackHistory> {
    match path {
        Some(path) => read_json(path, "feedback"),
        None => Ok(FeedbackHistory::new()),
    }
}

/// A catalog document, or the built-in catalog when no file is given.
pub(crate) fn read_catalog(path: Option<&Path>) -> Result<Arc<dyn CatalogRepository>> {
    let Some(path) = path else {
        return Ok(Arc::new(StaticCatalog::builtin()));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let catalog = StaticCatalog::from_json(&text)
        .with_context(|| format!("invalid catalog file {}", path.display()))?;
    tracing::debug!(
        target: "cyclecare::catalog",
        version = catalog.version(),
        entries = catalog.len(),
        "loaded custom catalog"
    );
    Ok(Arc::new(catalog))
}

pub(crate) fn read_efficiency_history(path: Option<&Path>) -> Result<Vec<f64>> {
    match path {
        Some(path) => read_json(path, "efficiency history"),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn parse_now(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|text| {
            DateTime::parse_from_rfc3339(text)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("invalid --now timestamp '{}'", text))
        })
        .transpose()
}

pub(crate) fn parse_locale(value: &str) -> Result<Locale> {
    match Locale::from_label(value) {
        Some(locale) => Ok(locale),
        None => bail!("unsupported locale '{}': expected en or zh", value),
    }
}

/// Settings file and environment, then command-line overrides.
pub(crate) fn resolve_config(
    max_results: Option<usize>,
    locale: Option<&str>,
) -> Result<EngineConfig> {
    let mut config = load_engine_config()?;
    if let Some(max_results) = max_results {
        config.max_results = max_results;
    }
    if let Some(locale) = locale {
        config.locale = parse_locale(locale)?;
    }
    Ok(config.validated())
}

pub(crate) fn build_engine(
    catalog: Arc<dyn CatalogRepository>,
    config: EngineConfig,
    now: Option<DateTime<Utc>>,
) -> RecommendationEngine {
    let engine = RecommendationEngine::new(catalog).with_config(config);
    match now {
        Some(now) => engine.with_fixed_time(now),
        None => engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyclecare_test_utils::ConfigFixture;

    #[test]
    fn absent_files_mean_empty_input() {
        let inputs = RequestFiles::default().load().unwrap();
        assert!(inputs.records.is_empty());
        assert!(inputs.feedback.is_empty());
        assert!(inputs.efficiency_history.is_empty());
        assert_eq!(inputs.catalog.entries().len(), StaticCatalog::builtin().len());
    }

    #[test]
    fn records_file_skips_bad_entries() {
        let fixture = ConfigFixture::new().unwrap();
        let path = fixture
            .write_json(
                "records.json",
                r#"[
                    {"date": "2024-05-01", "type": "actual-period", "painLevel": 5},
                    {"date": "2024-05-02", "type": "unknown"}
                ]"#,
            )
            .unwrap();
        let records = read_records(Some(&path)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pain_level, Some(5));
    }

    #[test]
    fn unreadable_json_names_the_file() {
        let fixture = ConfigFixture::new().unwrap();
        let path = fixture.write_json("history.json", "[1, 2,").unwrap();
        let err = read_efficiency_history(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("efficiency history"));
    }

    #[test]
    fn duplicate_catalog_ids_are_rejected() {
        let fixture = ConfigFixture::new().unwrap();
        let entry = r#"{"id": "dup", "type": "tip", "category": "sleep",
            "title_key": "t", "description_key": "d", "priority": 50}"#;
        let path = fixture
            .write_json(
                "catalog.json",
                &format!(r#"{{"version": "test", "entries": [{entry}, {entry}]}}"#),
            )
            .unwrap();
        assert!(read_catalog(Some(&path)).is_err());
    }

    #[test]
    fn now_and_locale_parsing() {
        let now = parse_now(Some("2024-06-15T12:00:00Z")).unwrap().unwrap();
        assert_eq!(now.to_rfc3339(), "2024-06-15T12:00:00+00:00");
        assert!(parse_now(None).unwrap().is_none());
        assert!(parse_now(Some("yesterday")).is_err());

        assert_eq!(parse_locale("zh-CN").unwrap(), Locale::Zh);
        assert!(parse_locale("fr").is_err());
    }
}
