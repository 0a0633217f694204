//! ReportBridge: fail-soft forwarder in front of a remote report service
//!
//! The bridge resolves its service handle exactly once, at construction.
//! From then on every operation has a total contract: transport failures
//! are logged and folded into a default value, never returned as errors.

use crate::registry::{lookup_name, GrpcRegistry, Registry};
use report_interface::{ReportRequest, ReportResult, ReportService, ReportTemplate};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Failure message returned by `generate_report` on a degraded bridge
pub const NOT_CONNECTED_MESSAGE: &str = "Not connected to ReportServer";

/// Caller-facing client for a report server
///
/// # Example
///
/// ```rust,no_run
/// use report_connect::ReportBridge;
/// use report_interface::ReportRequest;
///
/// # async fn example() {
/// let bridge = ReportBridge::connect("localhost:1099").await;
///
/// for template in bridge.available_report_templates().await {
///     println!("{} ({})", template.name, template.id);
/// }
///
/// let result = bridge
///     .generate_report(&ReportRequest::new("invoice", "PDF").param("month", "3"))
///     .await;
/// if let Some(message) = result.error_message() {
///     eprintln!("report failed: {}", message);
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct ReportBridge {
    server_address: String,

    /// Set once at construction; `None` means the lookup failed
    service: Option<Arc<dyn ReportService>>,
}

impl ReportBridge {
    /// Look up the ReportServer at `server_address` over gRPC
    ///
    /// Never fails: if the lookup fails the bridge is returned degraded.
    pub async fn connect(server_address: impl Into<String>) -> Self {
        Self::connect_with(&GrpcRegistry::default(), server_address).await
    }

    /// Look up the ReportServer at `server_address` through `registry`
    pub async fn connect_with<R: Registry + ?Sized>(
        registry: &R,
        server_address: impl Into<String>,
    ) -> Self {
        let server_address = server_address.into();
        let name = lookup_name(&server_address);

        info!("Looking up ReportServer at {}", name);

        match registry.lookup(&name).await {
            Ok(service) => {
                info!("Connected to ReportServer");
                Self::from_service(server_address, service)
            }
            Err(e) => {
                error!("Error connecting to ReportServer: {}", e);
                Self::disconnected(server_address)
            }
        }
    }

    /// Wrap an already-resolved service handle
    pub fn from_service(server_address: impl Into<String>, service: Arc<dyn ReportService>) -> Self {
        Self {
            server_address: server_address.into(),
            service: Some(service),
        }
    }

    /// A permanently degraded bridge
    pub fn disconnected(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            service: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.service.is_some()
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    /// Generate a report
    ///
    /// Returns `Failure("Not connected to ReportServer")` on a degraded
    /// bridge and `Failure("Error generating report: ...")` when the call
    /// fails in transit.
    pub async fn generate_report(&self, request: &ReportRequest) -> ReportResult {
        let Some(service) = &self.service else {
            debug!(
                "Skipping report '{}': bridge is not connected",
                request.template_id
            );
            return ReportResult::failure(NOT_CONNECTED_MESSAGE);
        };

        match service.generate_report(request).await {
            Ok(result) => result,
            Err(e) => {
                error!("Error generating report: {}", e);
                ReportResult::failure(format!("Error generating report: {}", e))
            }
        }
    }

    /// List the server's templates, or an empty list when unreachable
    pub async fn available_report_templates(&self) -> Vec<ReportTemplate> {
        let Some(service) = &self.service else {
            return Vec::new();
        };

        match service.available_report_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                error!("Error retrieving report templates: {}", e);
                Vec::new()
            }
        }
    }

    /// `true` only if the server answered and declared itself healthy
    pub async fn check_health(&self) -> bool {
        let Some(service) = &self.service else {
            return false;
        };

        match service.check_health().await {
            Ok(healthy) => healthy,
            Err(e) => {
                error!("Error checking ReportServer health: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for ReportBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBridge")
            .field("server_address", &self.server_address)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectError;
    use crate::registry::StaticRegistry;
    use async_trait::async_trait;
    use report_interface::ServiceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and fails every one of them in transit
    #[derive(Default)]
    struct BrokenService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReportService for BrokenService {
        async fn generate_report(
            &self,
            _request: &ReportRequest,
        ) -> report_interface::Result<ReportResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Communication("connection reset by peer".to_string()))
        }

        async fn available_report_templates(
            &self,
        ) -> report_interface::Result<Vec<ReportTemplate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Communication("connection reset by peer".to_string()))
        }

        async fn check_health(&self) -> report_interface::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Communication("connection reset by peer".to_string()))
        }
    }

    struct FailingRegistry;

    #[async_trait]
    impl Registry for FailingRegistry {
        async fn lookup(&self, name: &str) -> Result<Arc<dyn ReportService>, ConnectError> {
            Err(ConnectError::NotBound(name.to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_every_operation() {
        let bridge = ReportBridge::connect_with(&FailingRegistry, "localhost:1099").await;
        assert!(!bridge.is_connected());
        assert_eq!(bridge.server_address(), "localhost:1099");

        for request in [
            ReportRequest::new("invoice", "PDF"),
            ReportRequest::new("", "").param("x", "y").include_charts(true),
        ] {
            let result = bridge.generate_report(&request).await;
            assert_eq!(result, ReportResult::failure(NOT_CONNECTED_MESSAGE));
        }
        assert!(bridge.available_report_templates().await.is_empty());
        assert!(!bridge.check_health().await);
    }

    #[tokio::test]
    async fn test_transport_errors_fold_into_defaults() {
        let service = Arc::new(BrokenService::default());
        let bridge = ReportBridge::from_service("localhost:1099", service.clone());

        let result = bridge
            .generate_report(&ReportRequest::new("invoice", "PDF"))
            .await;
        let message = result.error_message().unwrap();
        assert!(message.starts_with("Error generating report: "));
        assert!(message.contains("connection reset by peer"));

        assert!(bridge.available_report_templates().await.is_empty());
        assert!(!bridge.check_health().await);

        // One attempt per call, no retries
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_lookup_uses_canonical_name() {
        let registry = StaticRegistry::new();
        registry
            .bind("reports.internal:1099/ReportServer", Arc::new(BrokenService::default()))
            .await;

        let bridge = ReportBridge::connect_with(&registry, "reports.internal:1099").await;
        assert!(bridge.is_connected());

        let other = ReportBridge::connect_with(&registry, "elsewhere:1099").await;
        assert!(!other.is_connected());
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_address_degrades() {
        let bridge = ReportBridge::connect("127.0.0.1:1").await;
        assert!(!bridge.is_connected());
        assert!(!bridge.check_health().await);
    }

    #[test]
    fn test_debug_hides_handle() {
        let bridge = ReportBridge::disconnected("localhost:1099");
        let rendered = format!("{:?}", bridge);
        assert!(rendered.contains("connected: false"));
    }

    #[test]
    fn test_bridge_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportBridge>();
    }
}
