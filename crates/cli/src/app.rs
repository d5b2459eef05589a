use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_cold_start_command, handle_evaluate_command, handle_feedback_command,
    handle_recommend_command, handle_snapshot_command, RequestFiles,
};
use anyhow::Result;
use clap::Parser;

/// Parse the command line and dispatch to the matching handler.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            records,
            pain,
            efficiency,
            efficiency_history,
            now,
            format,
        } => handle_snapshot_command(
            RequestFiles {
                records,
                efficiency_history,
                ..Default::default()
            },
            pain,
            efficiency,
            now,
            format,
        ),
        Commands::Recommend {
            records,
            feedback,
            catalog,
            efficiency_history,
            pain,
            efficiency,
            max_results,
            locale,
            now,
            format,
        } => handle_recommend_command(
            RequestFiles {
                records,
                feedback,
                catalog,
                efficiency_history,
            },
            pain,
            efficiency,
            max_results,
            locale,
            now,
            format,
        ),
        Commands::ColdStart {
            feedback,
            catalog,
            locale,
            format,
        } => handle_cold_start_command(
            RequestFiles {
                feedback,
                catalog,
                ..Default::default()
            },
            locale,
            format,
        ),
        Commands::Feedback {
            feedback,
            top,
            format,
        } => handle_feedback_command(feedback, top, format),
        Commands::Evaluate {
            records,
            feedback,
            catalog,
            efficiency_history,
            pain,
            efficiency,
            now,
            format,
        } => handle_evaluate_command(
            RequestFiles {
                records,
                feedback,
                catalog,
                efficiency_history,
            },
            pain,
            efficiency,
            now,
            format,
        ),
    }
}
