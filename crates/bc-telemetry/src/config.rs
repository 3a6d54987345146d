//! Telemetry configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name reported at startup
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error or full directives)
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "byzcoin-client".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BC_SERVICE_NAME`: Service name (default: byzcoin-client)
    /// - `BC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `BC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `BC_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("BC_SERVICE_NAME")
                .unwrap_or_else(|_| "byzcoin-client".to_string()),

            log_level: env::var("BC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("BC_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("BC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Configuration for tests: debug level, plain output.
    pub fn for_testing() -> Self {
        Self {
            service_name: "byzcoin-client-test".to_string(),
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_testing_config() {
        let config = TelemetryConfig::for_testing();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = TelemetryConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let back: TelemetryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
