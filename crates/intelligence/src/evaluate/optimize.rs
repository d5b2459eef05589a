//! Improvement suggestions from quality and feedback signals.
//!
//! Closes the loop between what the engine produced and what the user did
//! with it:
//! - Data gaps that limit personalization
//! - Weak relevance, spread or coverage in the result
//! - Engagement problems visible in feedback

use super::QualityAnalysis;
use crate::feedback::FeedbackAnalysis;
use crate::snapshot::{DataQualityTier, UserDataSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Priority level for optimization suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// High priority - significant impact.
    High,
    /// Medium priority - moderate impact.
    Medium,
    /// Low priority - minor improvement.
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// What a suggestion would improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationArea {
    DataQuality,
    Relevance,
    Diversity,
    Coverage,
    Engagement,
}

/// A single optimization suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: Priority,
    pub area: OptimizationArea,
    /// Human-readable description.
    pub message: String,
    /// Specific action to take.
    pub action: Option<String>,
}

impl Suggestion {
    pub fn high(area: OptimizationArea, message: impl Into<String>) -> Self {
        Self::new(Priority::High, area, message)
    }

    pub fn medium(area: OptimizationArea, message: impl Into<String>) -> Self {
        Self::new(Priority::Medium, area, message)
    }

    pub fn low(area: OptimizationArea, message: impl Into<String>) -> Self {
        Self::new(Priority::Low, area, message)
    }

    fn new(priority: Priority, area: OptimizationArea, message: impl Into<String>) -> Self {
        Self {
            priority,
            area,
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Suggestions ordered from most to least urgent, plus the quality score they
/// were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub overall_quality: f64,
    pub suggestions: Vec<Suggestion>,
}

impl OptimizationReport {
    pub fn high_priority(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions
            .iter()
            .filter(|s| s.priority == Priority::High)
    }
}

/// Turn quality, feedback and snapshot signals into suggestions.
pub fn generate_optimization_report(
    quality: &QualityAnalysis,
    feedback: &FeedbackAnalysis,
    snapshot: &UserDataSnapshot,
) -> OptimizationReport {
    let mut suggestions = Vec::new();
    let data = &snapshot.data_quality;

    // Data quality
    match data.tier {
        DataQualityTier::Poor => suggestions.push(
            Suggestion::high(
                OptimizationArea::DataQuality,
                format!(
                    "Tracking data is sparse ({}% complete); recommendations are mostly generic",
                    data.overall_completeness
                ),
            )
            .with_action("Log each period day with pain level and flow"),
        ),
        DataQualityTier::Fair => suggestions.push(
            Suggestion::medium(
                OptimizationArea::DataQuality,
                format!("Tracking data is fair ({}% complete)", data.overall_completeness),
            )
            .with_action("Fill in pain level, flow and notes where they are missing"),
        ),
        DataQualityTier::Good | DataQualityTier::Excellent => {}
    }
    if snapshot.period.cycle_lengths.len() < 2 {
        suggestions.push(
            Suggestion::low(
                OptimizationArea::DataQuality,
                "Fewer than two complete cycles recorded; cycle phase and regularity are estimates",
            )
            .with_action("Keep recording period start dates for a few more cycles"),
        );
    }

    // Result quality
    if quality.novelty < 100.0 {
        suggestions.push(
            Suggestion::high(
                OptimizationArea::Diversity,
                format!("Duplicate recommendations detected (novelty {}%)", quality.novelty),
            )
            .with_action("Check the catalog for repeated ids"),
        );
    }
    if quality.relevance < 50.0 {
        suggestions.push(
            Suggestion::medium(
                OptimizationArea::Relevance,
                format!("Average recommendation score is low ({})", quality.relevance),
            )
            .with_action("Add catalog entries whose conditions match common user states"),
        );
    }
    if quality.diversity < 50.0 {
        suggestions.push(Suggestion::medium(
            OptimizationArea::Diversity,
            format!("Recommendations are concentrated ({}% diversity)", quality.diversity),
        ));
    }
    if quality.coverage < 60.0 {
        suggestions.push(Suggestion::low(
            OptimizationArea::Coverage,
            format!("Only {}% of the reference categories are covered", quality.coverage),
        ));
    }

    // Engagement
    if feedback.total_feedback == 0 {
        suggestions.push(
            Suggestion::low(OptimizationArea::Engagement, "No feedback collected yet")
                .with_action("Prompt for a quick rating after a recommendation is opened"),
        );
    } else {
        if feedback.dismiss_rate > 50.0 {
            suggestions.push(
                Suggestion::high(
                    OptimizationArea::Engagement,
                    format!("{}% of recommendations are dismissed", feedback.dismiss_rate),
                )
                .with_action("Review the most dismissed items and tighten their conditions"),
            );
        }
        if feedback.click_rate < 20.0 {
            suggestions.push(Suggestion::medium(
                OptimizationArea::Engagement,
                format!("Click rate is low ({}%)", feedback.click_rate),
            ));
        }
        if feedback.average_rating.is_some_and(|avg| avg < 3.0) {
            suggestions.push(Suggestion::medium(
                OptimizationArea::Engagement,
                "Average rating is below 3; users find recommendations unhelpful",
            ));
        }
    }

    suggestions.sort_by_key(|s| s.priority);

    tracing::debug!(
        target: "cyclecare::evaluate",
        suggestions = suggestions.len(),
        overall = quality.overall,
        "built optimization report"
    );

    OptimizationReport {
        overall_quality: quality.overall,
        suggestions,
    }
}

/// Plain-text rendering of a report.
pub fn render_report(report: &OptimizationReport) -> String {
    let mut out = format!("Overall quality: {:.1}/100\n", report.overall_quality);
    if report.suggestions.is_empty() {
        out.push_str("No suggestions.\n");
        return out;
    }
    for suggestion in &report.suggestions {
        let _ = writeln!(out, "[{}] {}", suggestion.priority.label(), suggestion.message);
        if let Some(action) = &suggestion.action {
            let _ = writeln!(out, "    -> {}", action);
        }
    }
    out
}
