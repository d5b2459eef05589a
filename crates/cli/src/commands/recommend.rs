//! CLI handlers for the `recommend` and `cold-start` commands.

use super::inputs::{build_engine, parse_now, resolve_config, RequestFiles};
use crate::cli::OutputFormat;
use anyhow::Result;
use cyclecare_intelligence::recommend::summarize_recommendations;
use cyclecare_intelligence::{
    needs_cold_start, RecommendationItem, RecommendationRequest, RecommendationResult,
    WorkImpactSample,
};
use cyclecare_state::env_diag;
use std::collections::HashSet;

/// Handle the `recommend` command.
#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_recommend_command(
    files: RequestFiles,
    pain: f64,
    efficiency: f64,
    max_results: Option<usize>,
    locale: Option<String>,
    now: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let inputs = files.load()?;
    let config = resolve_config(max_results, locale.as_deref())?;
    let engine = build_engine(inputs.catalog, config, parse_now(now.as_deref())?);
    let work = WorkImpactSample::new(pain, efficiency);
    let request = RecommendationRequest::new(&inputs.records, &work, &inputs.feedback)
        .with_efficiency_history(&inputs.efficiency_history);
    let result = engine.generate(&request);

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result_human(&result, !needs_cold_start(&inputs.records));
    }
    Ok(())
}

/// Handle the `cold-start` command.
pub(crate) fn handle_cold_start_command(
    files: RequestFiles,
    locale: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let inputs = files.load()?;
    let config = resolve_config(None, locale.as_deref())?;
    let engine = build_engine(inputs.catalog, config, None);
    let items = engine.cold_start(&inputs.feedback);

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("Starter Recommendations");
    println!("=======================\n");
    if items.is_empty() {
        println!("No starter recommendations available.");
        return Ok(());
    }
    let categories: HashSet<_> = items.iter().map(|i| i.category()).collect();
    println!(
        "{}\n",
        summarize_recommendations(items.len(), categories.len(), false)
    );
    print_items(&items);
    Ok(())
}

fn print_result_human(result: &RecommendationResult, personalized: bool) {
    println!("Recommendations");
    println!("===============\n");
    println!(
        "{}",
        summarize_recommendations(result.len(), result.summary.categories.len(), personalized)
    );
    if !personalized {
        println!("Tip: log a few more days or run `cyclecare cold-start` for starter picks.");
    }
    println!();

    if result.is_empty() {
        println!("No recommendations matched your current data.");
    } else {
        print_items(&result.recommendations);
    }

    println!("\nInsights:");
    println!("  Pain: {}", result.insights.pain_pattern);
    println!("  Efficiency: {}", result.insights.efficiency_pattern);
    println!("  Cycle: {}", result.insights.cycle_health);
    for anomaly in &result.insights.anomalies {
        println!("  ! {}", anomaly);
    }
}

fn print_items(items: &[RecommendationItem]) {
    let diag = env_diag();
    for (rank, item) in items.iter().enumerate() {
        println!(
            "{:>2}. {} [{} / {}] score {:.1}",
            rank + 1,
            item.id(),
            item.category(),
            item.template.rec_type.label(),
            item.score
        );
        println!("    {}", item.reason);
        if diag {
            let b = &item.breakdown;
            println!(
                "    condition {:.2} | priority {:.0} | preference {:.0} | recency {:.2} | relevance {:.1}",
                b.condition_match, b.priority, b.preference, b.recency, item.relevance
            );
        }
    }
}
