/*!
 * Error types for the report bridge CLI
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration could not be loaded or applied
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command-line value was malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server (or the bridge on its behalf) declined to produce a report
    #[error("Report generation failed: {0}")]
    ReportFailed(String),

    #[error("ReportServer at {0} is not healthy")]
    Unhealthy(String),
}

impl BridgeError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Config(_) | BridgeError::InvalidArgument(_) | BridgeError::Io(_) => {
                EXIT_FATAL
            }
            BridgeError::ReportFailed(_) | BridgeError::Unhealthy(_) => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(BridgeError::Config("x".into()).exit_code(), EXIT_FATAL);
        assert_eq!(BridgeError::InvalidArgument("x".into()).exit_code(), EXIT_FATAL);
        assert_eq!(BridgeError::ReportFailed("x".into()).exit_code(), EXIT_FAILURE);
        assert_eq!(BridgeError::Unhealthy("x".into()).exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_display() {
        let err = BridgeError::ReportFailed("Not connected to ReportServer".to_string());
        assert_eq!(
            err.to_string(),
            "Report generation failed: Not connected to ReportServer"
        );
    }
}
