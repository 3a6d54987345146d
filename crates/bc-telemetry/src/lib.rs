//! # BC Telemetry
//!
//! Logging setup for applications built on the ByzCoin client crates. The
//! library crates only emit `tracing` events; this crate installs the
//! subscriber that writes them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BC_JSON_LOGS` | `false` | One JSON object per line |
//! | `BC_CONSOLE_OUTPUT` | `true` | Write to stdout at all |
//! | `BC_SERVICE_NAME` | `byzcoin-client` | Service name in the startup event |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_logging, make_filter};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Filter directive does not parse
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Convenience macro for a span around one ledger request.
///
/// ```rust,ignore
/// let _span = ledger_span!("get_proof", instance = %iid).entered();
/// ```
#[macro_export]
macro_rules! ledger_span {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
