//! CLI handler for the `feedback` command.

use super::inputs::{read_feedback, resolve_config};
use crate::cli::OutputFormat;
use anyhow::Result;
use cyclecare_intelligence::{analyze_feedback_with, FeedbackAnalysis};
use std::path::PathBuf;

/// Handle the `feedback` command.
pub(crate) fn handle_feedback_command(
    feedback: PathBuf,
    top: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let history = read_feedback(Some(&feedback))?;
    let top_n = match top {
        Some(n) => n,
        None => resolve_config(None, None)?.feedback_top_n,
    };
    let analysis = analyze_feedback_with(&history, top_n);

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis_human(&analysis);
    }
    Ok(())
}

fn print_analysis_human(analysis: &FeedbackAnalysis) {
    println!("Feedback Analytics");
    println!("==================\n");
    println!("Interactions: {}", analysis.total_feedback);
    println!(
        "Clicked {:.1}% | Saved {:.1}% | Dismissed {:.1}%",
        analysis.click_rate, analysis.save_rate, analysis.dismiss_rate
    );
    match analysis.average_rating {
        Some(avg) => println!("Average rating: {:.1} ({} ratings)", avg, analysis.rating_count),
        None => println!("Average rating: none"),
    }

    if !analysis.popular.is_empty() {
        println!("\nPopular:");
        for entry in &analysis.popular {
            println!("  {} ({})", entry.id, entry.count);
        }
    }
    if !analysis.unpopular.is_empty() {
        println!("\nDismissed most:");
        for entry in &analysis.unpopular {
            println!("  {} ({})", entry.id, entry.count);
        }
    }
    if !analysis.insights.is_empty() {
        println!("\nInsights:");
        for insight in &analysis.insights {
            println!("  - {}", insight);
        }
    }
}
