//! # GC Telemetry
//!
//! Logging and metrics plumbing shared by Groestl-Chain binaries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gc_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GC_SERVICE_NAME` | `groestl-chain` | Service name in log events |
//! | `GC_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `GC_CONSOLE_OUTPUT` | `true` | Write events to stderr |
//! | `GC_JSON_LOGS` | `false` | JSON output (default `true` in containers) |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metrics could not be encoded
    #[error("Failed to export metrics: {0}")]
    MetricsExport(String),

    /// Bad filter directive or other configuration problem
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Render every metric in the default Prometheus registry in text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}

/// Log a block-related event with standard fields.
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $msg:expr, $block_height:expr, $block_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            block_height = $block_height,
            block_hash = %$block_hash,
            $($($field)*,)?
            $msg
        )
    };
}
