//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level. Console output is plain text
//! or JSON lines; file output, when a directory is configured, is always JSON
//! and rolls daily.

use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::core::BoxError;

const LOG_FILE_PREFIX: &str = "crm-server.log";

/// Initialize the global subscriber
pub fn init_logger(level: &str, json: bool, log_dir: Option<&str>) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    });

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_appender)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;
    Ok(())
}
