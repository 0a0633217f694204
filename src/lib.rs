/*!
 * Report Bridge - command-line client for a remote report server
 *
 * The CLI and library layer on top of `report-connect`:
 * - TOML configuration with CLI and environment overrides
 * - Structured logging via `tracing`
 * - Subcommands for health, template discovery and report generation
 * - Structured exit codes
 */

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use config::{BridgeConfig, LogLevel};
pub use error::{BridgeError, Result};
pub use report_connect::{BlockingReportBridge, ReportBridge};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
