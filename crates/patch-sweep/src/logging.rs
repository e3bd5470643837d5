//! Logging initialisation for the sweep binary
//!
//! Installs a global `tracing` subscriber writing to stderr, so the summary
//! printed on stdout stays parseable. The level comes from `RUST_LOG`
//! (default `info`); `PATCH_LOG_FORMAT=json` switches to JSON lines. Every
//! event carries the name of the thread that emitted it, which identifies
//! the `sweep-worker-{i}` that handled a task.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Environment variable selecting the [`LogFormat`]
pub const LOG_FORMAT_ENV: &str = "PATCH_LOG_FORMAT";

static INITIALISED: OnceLock<LogFormat> = OnceLock::new();

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `PATCH_LOG_FORMAT` is set but not valid UTF-8
    #[error("`PATCH_LOG_FORMAT` contained invalid UTF-8")]
    InvalidUnicode {
        /// Raw lookup failure
        #[source]
        source: env::VarError,
    },
    /// `PATCH_LOG_FORMAT` names a format other than `human` or `json`
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Value as supplied, before normalisation
        provided: String,
    },
}

/// Output format of log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines for a terminal
    #[default]
    Human,
    /// One JSON object per event, with the enclosing spans attached
    Json,
}

impl LogFormat {
    /// Format requested through `PATCH_LOG_FORMAT`, `Human` when unset
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source) => Err(LoggingError::InvalidUnicode { source }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnsupportedFormat {
                provided: raw.to_owned(),
            }),
        }
    }
}

/// Install the global subscriber once and return the format in use
///
/// A subscriber installed by someone else (a test harness, an embedding
/// application) is left in place.
///
/// # Errors
/// Returns [`LoggingError`] if `PATCH_LOG_FORMAT` cannot be read or names an
/// unknown format.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INITIALISED.get() {
        return Ok(*format);
    }

    let format = LogFormat::from_env()?;
    if let Err(err) = install_subscriber(format) {
        eprintln!("keeping the existing tracing subscriber: {err}");
    }
    Ok(*INITIALISED.get_or_init(|| format))
}

fn install_subscriber(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_names(true)
        .with_writer(std::io::stderr);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        for (raw, expected) in [
            ("human", LogFormat::Human),
            ("HUMAN", LogFormat::Human),
            (" json ", LogFormat::Json),
        ] {
            assert_eq!(raw.parse::<LogFormat>().unwrap(), expected);
        }
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        match "XML".parse::<LogFormat>() {
            Err(LoggingError::UnsupportedFormat { provided }) => assert_eq!(provided, "XML"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let first = init_logging().unwrap();
        assert_eq!(init_logging().unwrap(), first);
    }
}
