//! Advisory sanity rules over a produced result.

use crate::catalog::RecommendationCategory;
use crate::config::EngineConfig;
use crate::recommend::RecommendationResult;
use crate::snapshot::UserDataSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of the reasonableness rules. Issues never abort anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonablenessReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl ReasonablenessReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Check `result` against the default thresholds.
pub fn validate_reasonableness(
    result: &RecommendationResult,
    snapshot: &UserDataSnapshot,
) -> ReasonablenessReport {
    validate_reasonableness_with(result, snapshot, &EngineConfig::default())
}

/// Check `result` against the thresholds in `config`.
pub fn validate_reasonableness_with(
    result: &RecommendationResult,
    snapshot: &UserDataSnapshot,
    config: &EngineConfig,
) -> ReasonablenessReport {
    let items = &result.recommendations;
    let mut issues = Vec::new();

    if snapshot.current_pain() >= config.high_pain_threshold
        && !items.iter().any(|i| i.category().is_pain_focused())
    {
        issues.push(format!(
            "Current pain is {}/10 but no pain-relief or medical recommendation was included",
            snapshot.current_pain()
        ));
    }
    if snapshot.current_efficiency() < config.low_efficiency_threshold
        && !result.contains_category(RecommendationCategory::WorkAdjustment)
    {
        issues.push(format!(
            "Efficiency is {}% but no work-adjustment recommendation was included",
            snapshot.current_efficiency()
        ));
    }
    if items.len() > config.max_results {
        issues.push(format!(
            "{} recommendations exceed the limit of {}",
            items.len(),
            config.max_results
        ));
    }

    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            issues.push(format!("Recommendation '{}' appears more than once", item.id()));
        }
        if !(0.0..=100.0).contains(&item.score) {
            issues.push(format!("Recommendation '{}' has score {} outside 0-100", item.id(), item.score));
        }
        if !(0.0..=100.0).contains(&item.priority()) {
            issues.push(format!(
                "Recommendation '{}' has priority {} outside 0-100",
                item.id(),
                item.priority()
            ));
        }
        if item.reason.trim().is_empty() {
            issues.push(format!("Recommendation '{}' has no reason", item.id()));
        }
        let phases = &item.template.conditions.phases;
        if !phases.is_empty()
            && !snapshot
                .current_phase()
                .is_some_and(|phase| phases.contains(&phase))
        {
            issues.push(format!(
                "Recommendation '{}' targets a phase the user is not in",
                item.id()
            ));
        }
    }

    if result.summary.total_recommendations != items.len() {
        issues.push(format!(
            "Summary reports {} recommendations but {} were returned",
            result.summary.total_recommendations,
            items.len()
        ));
    }

    if !issues.is_empty() {
        tracing::debug!(
            target: "cyclecare::evaluate",
            issues = issues.len(),
            "reasonableness check found issues"
        );
    }
    ReasonablenessReport::from_issues(issues)
}
