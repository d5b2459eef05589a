//! CLI handler for the `snapshot` command.

use super::inputs::{build_engine, parse_now, resolve_config, RequestFiles};
use crate::cli::OutputFormat;
use anyhow::Result;
use cyclecare_intelligence::recommend::build_insights;
use cyclecare_intelligence::{UserDataSnapshot, WorkImpactSample};

/// Handle the `snapshot` command.
pub(crate) fn handle_snapshot_command(
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

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot_human(&snapshot);
    }
    Ok(())
}

fn print_snapshot_human(snapshot: &UserDataSnapshot) {
    let insights = build_insights(snapshot);
    let quality = &snapshot.data_quality;

    println!("Cycle Snapshot");
    println!("==============\n");
    println!(
        "Records: {} ({} period days, {} with pain)",
        quality.total_records, quality.period_records, quality.pain_records
    );
    println!(
        "Data quality: {} ({:.0}% complete)",
        quality.tier.label(),
        quality.overall_completeness
    );
    match snapshot.current_phase() {
        Some(phase) => println!("Current phase: {}", phase),
        None => println!("Current phase: unknown"),
    }
    println!();
    println!("Pain: {}", insights.pain_pattern);
    println!("Efficiency: {}", insights.efficiency_pattern);
    println!("Cycle: {}", insights.cycle_health);
    for anomaly in &insights.anomalies {
        println!("  ! {}", anomaly);
    }
}
