//! Name resolution for report services
//!
//! A report server is looked up once under the canonical name
//! `"<address>/ReportServer"`. The registry turns that name into a live
//! `ReportService` handle or fails.

use crate::error::ConnectError;
use crate::remote::RemoteReportService;
use async_trait::async_trait;
use report_interface::ReportService;
use report_proto::SERVICE_NAME;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tonic::transport::Endpoint;
use tracing::{debug, info};

/// Scheme used when the configured address does not carry one
pub const DEFAULT_SCHEME: &str = "http";

/// Build the canonical lookup name for a server address
///
/// ```
/// assert_eq!(
///     report_connect::lookup_name("localhost:1099"),
///     "localhost:1099/ReportServer"
/// );
/// ```
pub fn lookup_name(address: &str) -> String {
    format!("{}/{}", address.trim_end_matches('/'), SERVICE_NAME)
}

/// Split a lookup name into `(address, bound name)`
pub fn parse_lookup_name(name: &str) -> Result<(&str, &str), ConnectError> {
    let (address, bound) = name
        .rsplit_once('/')
        .ok_or_else(|| ConnectError::InvalidLookupName(name.to_string()))?;

    // "http://" alone leaves an address ending in ':' or '/'
    if address.is_empty() || bound.is_empty() || address.ends_with(':') || address.ends_with('/')
    {
        return Err(ConnectError::InvalidLookupName(name.to_string()));
    }

    Ok((address, bound))
}

/// Resolves lookup names to report service handles
#[async_trait]
pub trait Registry: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Arc<dyn ReportService>, ConnectError>;
}

/// Transport settings for `GrpcRegistry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Scheme prefixed to addresses given as bare `host:port`
    pub scheme: String,

    /// Upper bound on establishing the connection (None = transport default)
    pub connect_timeout: Option<Duration>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            connect_timeout: None,
        }
    }
}

/// Registry that resolves names by opening a gRPC channel to the address
///
/// Only `ReportServer` is bound at any address; any other bound name fails
/// with `ConnectError::NotBound` before a connection is attempted.
#[derive(Debug, Clone, Default)]
pub struct GrpcRegistry {
    options: ConnectOptions,
}

impl GrpcRegistry {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Full URI for an address, adding the configured scheme when missing
    pub fn endpoint_uri(&self, address: &str) -> String {
        if address.contains("://") {
            address.to_string()
        } else {
            format!("{}://{}", self.options.scheme, address)
        }
    }
}

#[async_trait]
impl Registry for GrpcRegistry {
    async fn lookup(&self, name: &str) -> Result<Arc<dyn ReportService>, ConnectError> {
        let (address, bound) = parse_lookup_name(name)?;

        if bound != SERVICE_NAME {
            return Err(ConnectError::NotBound(name.to_string()));
        }

        let uri = self.endpoint_uri(address);
        debug!("Resolving {} via {}", name, uri);

        let mut endpoint =
            Endpoint::from_shared(uri).map_err(|e| ConnectError::ConnectionFailed {
                address: address.to_string(),
                reason: format!("Invalid endpoint: {}", e),
            })?;

        if let Some(timeout) = self.options.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectError::ConnectionFailed {
                address: address.to_string(),
                reason: format!("Connection failed: {}", e),
            })?;

        info!("Resolved {} to a gRPC channel", name);

        Ok(Arc::new(RemoteReportService::new(channel, address)))
    }
}

/// In-process name table
///
/// Binds services directly by lookup name, without any network hop. Useful
/// for embedding a service in the same process as its caller.
#[derive(Default)]
pub struct StaticRegistry {
    bindings: RwLock<HashMap<String, Arc<dyn ReportService>>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a service under `name`
    pub async fn bind(&self, name: impl Into<String>, service: Arc<dyn ReportService>) {
        let name = name.into();
        info!("Binding report service: {}", name);

        let mut bindings = self.bindings.write().await;
        bindings.insert(name, service);
    }

    pub async fn unbind(&self, name: &str) -> Result<(), ConnectError> {
        info!("Unbinding report service: {}", name);

        let mut bindings = self.bindings.write().await;
        bindings
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ConnectError::NotBound(name.to_string()))
    }

    /// All bound names, sorted
    pub async fn names(&self) -> Vec<String> {
        let bindings = self.bindings.read().await;
        let mut names: Vec<String> = bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl Registry for StaticRegistry {
    async fn lookup(&self, name: &str) -> Result<Arc<dyn ReportService>, ConnectError> {
        let bindings = self.bindings.read().await;
        bindings
            .get(name)
            .cloned()
            .ok_or_else(|| ConnectError::NotBound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_interface::{ReportRequest, ReportResult, ReportTemplate};

    struct IdleService;

    #[async_trait]
    impl ReportService for IdleService {
        async fn generate_report(
            &self,
            _request: &ReportRequest,
        ) -> report_interface::Result<ReportResult> {
            Ok(ReportResult::failure("idle"))
        }

        async fn available_report_templates(
            &self,
        ) -> report_interface::Result<Vec<ReportTemplate>> {
            Ok(vec![])
        }

        async fn check_health(&self) -> report_interface::Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_lookup_name() {
        assert_eq!(lookup_name("localhost:1099"), "localhost:1099/ReportServer");
        assert_eq!(lookup_name("localhost:1099/"), "localhost:1099/ReportServer");
    }

    #[test]
    fn test_parse_lookup_name() {
        assert_eq!(
            parse_lookup_name("localhost:1099/ReportServer").unwrap(),
            ("localhost:1099", "ReportServer")
        );
        assert_eq!(
            parse_lookup_name("http://10.0.0.5:50051/ReportServer").unwrap(),
            ("http://10.0.0.5:50051", "ReportServer")
        );
        assert!(parse_lookup_name("ReportServer").is_err());
        assert!(parse_lookup_name("/ReportServer").is_err());
        assert!(parse_lookup_name("localhost:1099/").is_err());
        assert!(parse_lookup_name("http:///ReportServer").is_err());
    }

    #[test]
    fn test_endpoint_uri_adds_scheme() {
        let registry = GrpcRegistry::default();
        assert_eq!(registry.endpoint_uri("localhost:1099"), "http://localhost:1099");
        assert_eq!(
            registry.endpoint_uri("https://reports.example.com"),
            "https://reports.example.com"
        );

        let registry = GrpcRegistry::new(ConnectOptions {
            scheme: "https".to_string(),
            connect_timeout: None,
        });
        assert_eq!(registry.endpoint_uri("localhost:1099"), "https://localhost:1099");
    }

    #[tokio::test]
    async fn test_grpc_registry_rejects_unknown_binding() {
        let registry = GrpcRegistry::default();
        let result = registry.lookup("localhost:1099/BillingServer").await;
        assert!(matches!(result, Err(ConnectError::NotBound(_))));
    }

    #[tokio::test]
    async fn test_grpc_registry_unreachable_address() {
        let registry = GrpcRegistry::new(ConnectOptions {
            connect_timeout: Some(Duration::from_secs(2)),
            ..Default::default()
        });
        let result = registry.lookup(&lookup_name("127.0.0.1:1")).await;
        assert!(matches!(
            result,
            Err(ConnectError::ConnectionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_registry_bind_lookup_unbind() {
        let registry = StaticRegistry::new();
        let name = lookup_name("embedded");

        assert!(matches!(
            registry.lookup(&name).await,
            Err(ConnectError::NotBound(_))
        ));

        registry.bind(name.clone(), Arc::new(IdleService)).await;
        assert_eq!(registry.names().await, vec![name.clone()]);

        let service = registry.lookup(&name).await.unwrap();
        assert!(service.check_health().await.unwrap());

        registry.unbind(&name).await.unwrap();
        assert!(registry.names().await.is_empty());
        assert!(matches!(
            registry.unbind(&name).await,
            Err(ConnectError::NotBound(_))
        ));
    }
}
