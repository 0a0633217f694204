//! RemoteReportService: ReportService implementation that proxies to a report host via gRPC

use async_trait::async_trait;
use report_interface::{ReportRequest, ReportResult, ReportService, ReportTemplate, Result};
use report_proto::{
    report_server_client::ReportServerClient, GenerateReportRequest, HealthRequest,
    ListTemplatesRequest,
};
use tonic::transport::Channel;
use tracing::debug;

use crate::error::ConnectError;

/// A remote implementation of ReportService that delegates every call to a
/// report host over gRPC.
///
/// This struct is cheaply cloneable (internally uses Arc via tonic's Channel).
///
/// # Example
///
/// ```rust,no_run
/// use report_connect::RemoteReportService;
/// use report_interface::ReportService;
/// use tonic::transport::Channel;
///
/// # async fn example() -> anyhow::Result<()> {
/// let channel = Channel::from_static("http://localhost:1099").connect().await?;
/// let service = RemoteReportService::new(channel, "localhost:1099");
///
/// if service.check_health().await? {
///     println!("ReportServer is up");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RemoteReportService {
    /// The gRPC client (cheap to clone due to Arc internally)
    client: ReportServerClient<Channel>,

    /// Address the channel was opened against, for diagnostics
    address: String,
}

impl RemoteReportService {
    /// Create a new RemoteReportService over an established channel.
    pub fn new(channel: Channel, address: impl Into<String>) -> Self {
        Self {
            client: ReportServerClient::new(channel),
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl ReportService for RemoteReportService {
    async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResult> {
        debug!(
            "Generating report '{}' as {} on {} ({} parameters, charts={})",
            request.template_id,
            request.output_format,
            self.address,
            request.parameters.len(),
            request.include_charts
        );

        let response = self
            .client
            .clone()
            .generate_report(GenerateReportRequest::from(request))
            .await
            .map_err(ConnectError::from)?;

        let result = ReportResult::try_from(response.into_inner())?;

        debug!("ReportServer answered success={}", result.is_success());

        Ok(result)
    }

    async fn available_report_templates(&self) -> Result<Vec<ReportTemplate>> {
        debug!("Listing report templates on {}", self.address);

        let response = self
            .client
            .clone()
            .get_available_report_templates(ListTemplatesRequest {})
            .await
            .map_err(ConnectError::from)?;

        let templates: Vec<ReportTemplate> = response.into_inner().into();

        debug!("Received {} templates", templates.len());

        Ok(templates)
    }

    async fn check_health(&self) -> Result<bool> {
        let response = self
            .client
            .clone()
            .check_health(HealthRequest {})
            .await
            .map_err(ConnectError::from)?;

        Ok(response.into_inner().healthy)
    }
}
