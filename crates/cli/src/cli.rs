use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How command results are printed.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

/// Command-line interface for the `cyclecare` application.
#[derive(Debug, Parser)]
#[command(
    name = "cyclecare",
    version,
    about = "Personalized cycle-health recommendations from tracked history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `cyclecare` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarizes tracked history into a statistical snapshot.
    Snapshot {
        /// JSON array of calendar records.
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
        /// Current pain level (0-10).
        #[arg(long, default_value_t = 0.0)]
        pain: f64,
        /// Current work efficiency (0-100).
        #[arg(long, default_value_t = 100.0)]
        efficiency: f64,
        /// JSON array of earlier efficiency readings.
        #[arg(long, value_name = "FILE")]
        efficiency_history: Option<PathBuf>,
        /// Evaluate as of this RFC 3339 instant instead of now.
        #[arg(long, value_name = "TIMESTAMP")]
        now: Option<String>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Generates personalized recommendations.
    Recommend {
        /// JSON array of calendar records.
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
        /// JSON array of feedback records.
        #[arg(long, value_name = "FILE")]
        feedback: Option<PathBuf>,
        /// Catalog document replacing the built-in catalog.
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// JSON array of earlier efficiency readings.
        #[arg(long, value_name = "FILE")]
        efficiency_history: Option<PathBuf>,
        /// Current pain level (0-10).
        #[arg(long, default_value_t = 0.0)]
        pain: f64,
        /// Current work efficiency (0-100).
        #[arg(long, default_value_t = 100.0)]
        efficiency: f64,
        /// Maximum number of recommendations, at most 10 (overrides `CYCLECARE_MAX_RESULTS`).
        #[arg(long)]
        max_results: Option<usize>,
        /// Rationale language: en or zh (overrides `CYCLECARE_LOCALE`).
        #[arg(long)]
        locale: Option<String>,
        /// Evaluate as of this RFC 3339 instant instead of now.
        #[arg(long, value_name = "TIMESTAMP")]
        now: Option<String>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Lists starter recommendations for users without history.
    ColdStart {
        /// JSON array of feedback records.
        #[arg(long, value_name = "FILE")]
        feedback: Option<PathBuf>,
        /// Catalog document replacing the built-in catalog.
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Rationale language: en or zh (overrides `CYCLECARE_LOCALE`).
        #[arg(long)]
        locale: Option<String>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Reports engagement analytics over a feedback log.
    Feedback {
        /// JSON array of feedback records.
        #[arg(long, value_name = "FILE")]
        feedback: PathBuf,
        /// Number of popular and unpopular ids to list.
        #[arg(long)]
        top: Option<usize>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Generates recommendations and grades them for quality and reasonableness.
    Evaluate {
        /// JSON array of calendar records.
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
        /// JSON array of feedback records.
        #[arg(long, value_name = "FILE")]
        feedback: Option<PathBuf>,
        /// Catalog document replacing the built-in catalog.
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// JSON array of earlier efficiency readings.
        #[arg(long, value_name = "FILE")]
        efficiency_history: Option<PathBuf>,
        /// Current pain level (0-10).
        #[arg(long, default_value_t = 0.0)]
        pain: f64,
        /// Current work efficiency (0-100).
        #[arg(long, default_value_t = 100.0)]
        efficiency: f64,
        /// Evaluate as of this RFC 3339 instant instead of now.
        #[arg(long, value_name = "TIMESTAMP")]
        now: Option<String>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_defaults() {
        let cli = Cli::try_parse_from(["cyclecare", "recommend"]).unwrap();
        match cli.command {
            Commands::Recommend {
                pain,
                efficiency,
                format,
                max_results,
                ..
            } => {
                assert_eq!(pain, 0.0);
                assert_eq!(efficiency, 100.0);
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(max_results, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn kebab_case_flags_parse() {
        let cli = Cli::try_parse_from([
            "cyclecare",
            "evaluate",
            "--records",
            "records.json",
            "--efficiency-history",
            "history.json",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate {
                records,
                efficiency_history,
                format,
                ..
            } => {
                assert_eq!(records, Some(PathBuf::from("records.json")));
                assert_eq!(efficiency_history, Some(PathBuf::from("history.json")));
                assert!(format.is_json());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn feedback_requires_a_file() {
        assert!(Cli::try_parse_from(["cyclecare", "feedback"]).is_err());
        assert!(Cli::try_parse_from(["cyclecare", "cold-start", "--format", "yaml"]).is_err());
    }
}
