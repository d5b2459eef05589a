//! CLI handler for the `evaluate` command.

use super::inputs::{build_engine, parse_now, resolve_config, RequestFiles};
use crate::cli::OutputFormat;
use anyhow::Result;
use cyclecare_intelligence::{
    analyze_feedback_with, analyze_quality, generate_optimization_report, render_report,
    validate_reasonableness_with, WorkImpactSample,
};
use serde_json::json;

/// Handle the `evaluate` command.
pub(crate) fn handle_evaluate_command(
    files: RequestFiles,
    pain: f64,
    efficiency: f64,
    now: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let inputs = files.load()?;
    let config = resolve_config(None, None)?;
    let engine = build_engine(inputs.catalog, config, parse_now(now.as_deref())?);
    let work = WorkImpactSample::new(pain, efficiency);

    let snapshot = engine.build_snapshot(&inputs.records, &work, None, &inputs.efficiency_history);
    let result = engine.recommend_for_snapshot(&snapshot, &inputs.feedback);
    let quality = analyze_quality(&result, &snapshot);
    let reasonableness = validate_reasonableness_with(&result, &snapshot, engine.config());
    let engagement = analyze_feedback_with(&inputs.feedback, engine.config().feedback_top_n);
    let report = generate_optimization_report(&quality, &engagement, &snapshot);

    tracing::debug!(
        target: "cyclecare::evaluate",
        items = result.len(),
        overall = quality.overall,
        valid = reasonableness.valid,
        "evaluated recommendations"
    );

    if format.is_json() {
        let value = json!({
            "quality": quality,
            "reasonableness": reasonableness,
            "optimization": report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Recommendation Evaluation");
    println!("=========================\n");
    println!("Items: {} (data quality {})", result.len(), quality.data_tier.label());
    println!(
        "Relevance {:.1} | Diversity {:.1} | Coverage {:.1} | Novelty {:.1}",
        quality.relevance, quality.diversity, quality.coverage, quality.novelty
    );
    if reasonableness.valid {
        println!("Reasonableness: ok");
    } else {
        println!("Reasonableness: {} issue(s)", reasonableness.issues.len());
        for issue in &reasonableness.issues {
            println!("  - {}", issue);
        }
    }
    println!();
    print!("{}", render_report(&report));
    Ok(())
}
