//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with the rendered dashboard on
//! stdout.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive: command line, then `RUST_LOG`, then config.
pub fn resolve_directive(cli: Option<&str>, env: Option<String>, config: &str) -> String {
    [cli.map(str::to_string), env]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| config.to_string())
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
