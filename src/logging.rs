//! Tracing subscriber setup shared by the TUI and CLI entry points

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Where log output should go
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogTarget {
    /// File only; stderr would corrupt the alternate screen
    Tui,
    /// Console and file
    Cli,
}

/// Initialize logging. `RUST_LOG` wins over the built-in default filter.
pub fn init(log_file: &Path, target: LogTarget) -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "useradmin=info");
    }

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", log_file.display()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::from_default_env());

    let console_layer = match target {
        LogTarget::Cli => Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        ),
        LogTarget::Tui => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
