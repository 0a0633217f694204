//! Error types for the report-connect crate

use report_interface::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("Invalid lookup name: {0}")]
    InvalidLookupName(String),

    #[error("Name not bound in registry: {0}")]
    NotBound(String),

    #[error("Connection to {address} failed: {reason}")]
    ConnectionFailed { address: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every connect failure reaches callers as a communication error
impl From<ConnectError> for ServiceError {
    fn from(err: ConnectError) -> Self {
        ServiceError::Communication(err.to_string())
    }
}
