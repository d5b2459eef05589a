//! Manages cyclecare configuration.
//!
//! This crate provides utilities for:
//! - Resolving the configuration file location.
//! - Reading environment variable overrides.
//! - Loading a validated `EngineConfig` from both.

pub mod config;
pub mod env;

pub use config::{apply_env_overrides, load_engine_config, load_engine_config_from};
pub use env::{
    config_file, env_cache_ttl_ms, env_diag, env_locale, env_max_results, env_pain_trend, home_dir,
};
