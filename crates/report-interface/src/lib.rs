//! Report Interface: data model and service contract
//!
//! This crate defines the records exchanged with a report server and the
//! `ReportService` trait that both the remote client and server-side
//! implementations satisfy.
//!
//! # Architecture
//!
//! The `ReportService` trait has three operations:
//!
//! 1. **Generation**: render a template with caller parameters
//! 2. **Discovery**: list the templates the server knows
//! 3. **Liveness**: ask whether the server can serve requests now
//!
//! # Example
//!
//! ```rust,no_run
//! use report_interface::{ReportRequest, ReportService};
//!
//! async fn render<S: ReportService>(service: &S) -> anyhow::Result<()> {
//!     if !service.check_health().await? {
//!         return Ok(());
//!     }
//!
//!     let request = ReportRequest::new("invoice", "PDF").param("month", "3");
//!     let result = service.generate_report(&request).await?;
//!     println!("success: {}", result.is_success());
//!     Ok(())
//! }
//! ```

pub mod model;

use async_trait::async_trait;
use thiserror::Error;

pub use model::{ParameterDefinition, ReportDocument, ReportRequest, ReportResult, ReportTemplate};

/// Failure to talk to a report service
///
/// Application-level failures (the server answered but could not render)
/// are not errors: they arrive as `ReportResult::Failure`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// The report server contract
///
/// Implementations must be `Send + Sync` so a single handle can be shared
/// across tasks once resolved.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Render `request.template_id` in `request.output_format`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` only when the service could not be reached or
    /// answered with something unintelligible. A server that declines to
    /// render answers `Ok(ReportResult::Failure { .. })`.
    async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResult>;

    /// The server's current template catalog, in server order
    ///
    /// An empty catalog is a valid answer.
    async fn available_report_templates(&self) -> Result<Vec<ReportTemplate>>;

    /// Liveness probe with no side effects
    async fn check_health(&self) -> Result<bool>;
}

#[async_trait]
impl<T: ReportService + ?Sized> ReportService for std::sync::Arc<T> {
    async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResult> {
        (**self).generate_report(request).await
    }

    async fn available_report_templates(&self) -> Result<Vec<ReportTemplate>> {
        (**self).available_report_templates().await
    }

    async fn check_health(&self) -> Result<bool> {
        (**self).check_health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FixedService;

    #[async_trait]
    impl ReportService for FixedService {
        async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResult> {
            Ok(ReportResult::success(
                request.template_id.as_bytes().to_vec(),
                "text/plain",
                "out.txt",
            ))
        }

        async fn available_report_templates(&self) -> Result<Vec<ReportTemplate>> {
            Ok(vec![])
        }

        async fn check_health(&self) -> Result<bool> {
            Err(ServiceError::Unavailable("maintenance".to_string()))
        }
    }

    #[tokio::test]
    async fn test_arc_forwards_to_inner() {
        let service: Arc<dyn ReportService> = Arc::new(FixedService);

        let result = service
            .generate_report(&ReportRequest::new("abc", "TXT"))
            .await
            .unwrap();
        assert_eq!(result.report_data(), Some(&b"abc"[..]));
        assert!(service.available_report_templates().await.unwrap().is_empty());
        assert_eq!(
            service.check_health().await,
            Err(ServiceError::Unavailable("maintenance".to_string()))
        );
    }

    #[test]
    fn test_error_display() {
        let err = ServiceError::Communication("connection reset".to_string());
        assert_eq!(err.to_string(), "Communication error: connection reset");
    }
}
