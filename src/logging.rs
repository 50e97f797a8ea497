//! Logging setup for the binary.
use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::defaults::Defaults;

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Identifies this process in logs.
    whoami: String,
}

impl LoggerConfig {
    pub const fn new(whoami: String) -> Self {
        Self { whoami }
    }

    /// Whoami built from `base` plus the optional service label.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name(Defaults::LOG_WHOAMI)
    }
}

/// Installs a compact fmt layer on stderr, filtered by `RUST_LOG`.
///
/// Stdout is left to the report so it can be piped.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let log_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let log_line_num = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(log_file)
                .with_line_number(log_line_num),
        )
        .with_filter(filt);

    tracing_subscriber::registry().with(stderr_sub).init();

    info!(whoami = %config.whoami, "logging started");
}

fn get_whoami_string(base: &str) -> String {
    match env::var(Defaults::SVC_LABEL_ENVVAR).ok() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
