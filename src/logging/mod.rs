// src/logging/mod.rs
use std::io::Write;

use crate::core::config::Config;

// stdout carries command output (including one-time passwords), so logs go to stderr
pub fn init(config: &Config) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .target(env_logger::Target::Stderr);

    // RUST_LOG still wins for ad-hoc debugging
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if let Err(e) = builder.try_init() {
        let _ = writeln!(std::io::stderr(), "Logger already initialized: {}", e);
    }
}
