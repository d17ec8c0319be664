//! Diagnostic logging
//!
//! Standard output carries the status line only, so logs go to standard
//! error or to a file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub verbosity: u8,
    pub format: LogFormat,
    /// Log file; `None` logs to standard error
    pub file: Option<PathBuf>,
}

/// Maps `-v` occurrences to a default level; `RUST_LOG` still wins
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop and must be held until the process exits.
pub fn init(options: &LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for_verbosity(options.verbosity).into())
        .from_env_lossy();

    let (layer, guard) = match &options.file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            let layer = match options.format {
                LogFormat::Json => layer.json().with_filter(env_filter).boxed(),
                LogFormat::Text => layer.with_filter(env_filter).boxed(),
            };
            (layer, Some(guard))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            let layer = match options.format {
                LogFormat::Json => layer.json().with_filter(env_filter).boxed(),
                LogFormat::Text => layer.compact().with_filter(env_filter).boxed(),
            };
            (layer, None)
        }
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_appender(path: &Path) -> anyhow::Result<tracing_appender::rolling::RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path {:?} has no file name", path))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {:?}", dir))?;

    Ok(tracing_appender::rolling::never(dir, file_name))
}
