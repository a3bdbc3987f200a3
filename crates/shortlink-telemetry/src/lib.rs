//! Process-wide tracing setup shared by the shortlink binaries.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use typed_builder::TypedBuilder;

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("global subscriber already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("log bridge already installed: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct TelemetrySettings {
    /// Directive used when `RUST_LOG` is not set, e.g. `info,sqlx=warn`.
    #[builder(default = DEFAULT_FILTER.to_string(), setter(into))]
    pub filter: String,
    #[builder(default)]
    pub format: LogFormat,
    /// Write log lines to this file (truncated on start) instead of stdout.
    #[builder(default, setter(strip_option, into))]
    pub log_file: Option<PathBuf>,
}

/// Builds the filter, letting `RUST_LOG` take precedence over `fallback`.
fn env_filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::Filter {
        filter: fallback.to_string(),
        source,
    })
}

fn make_writer(log_file: Option<&PathBuf>) -> Result<BoxMakeWriter, TelemetryError> {
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| TelemetryError::LogFile {
                path: path.clone(),
                source,
            })?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stdout)),
    }
}

/// Installs the global tracing subscriber and routes `log` records into it.
///
/// Call once, early in `main`.
pub fn init(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let filter = env_filter(&settings.filter)?;
    let writer = make_writer(settings.log_file.as_ref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(settings.log_file.is_none());

    match settings.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    tracing_log::LogTracer::init()?;
    Ok(())
}
