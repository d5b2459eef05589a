//! Command-line interface for the `cyclecare` application.
//!
//! Reads tracked history and feedback from JSON files and delegates every
//! computation to `cyclecare-intelligence`.

mod app;
mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    app::run()
}
