//! CLI command handlers for the cyclecare application.

mod evaluate;
mod feedback;
mod inputs;
mod recommend;
mod snapshot;

pub(crate) use evaluate::handle_evaluate_command;
pub(crate) use feedback::handle_feedback_command;
pub(crate) use inputs::RequestFiles;
pub(crate) use recommend::{handle_cold_start_command, handle_recommend_command};
pub(crate) use snapshot::handle_snapshot_command;
