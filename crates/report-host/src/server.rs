//! gRPC server implementation for a report host.
//!
//! This module implements the `ReportServer` service by delegating to any
//! `ReportService`. The rendering engine behind that trait is opaque here.

use report_interface::{ReportRequest, ReportService, ServiceError};
use report_proto::report_server_server::{ReportServer, ReportServerServer};
use report_proto::{
    GenerateReportRequest, HealthRequest, HealthResponse, ListTemplatesRequest,
    ListTemplatesResponse, ReportResult,
};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

/// Adapter exposing a `ReportService` as the `ReportServer` gRPC service.
pub struct ReportHost<S> {
    service: Arc<S>,
}

impl<S: ReportService + 'static> ReportHost<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Wrap the adapter in the tonic service type for `Server::add_service`
    pub fn into_service(self) -> ReportServerServer<Self> {
        ReportServerServer::new(self)
    }
}

/// Translate a service failure into the status the client will see
pub fn status_from_error(err: ServiceError) -> Status {
    match err {
        ServiceError::Communication(msg) | ServiceError::Unavailable(msg) => {
            Status::unavailable(msg)
        }
        ServiceError::InvalidResponse(msg) => Status::internal(msg),
    }
}

#[tonic::async_trait]
impl<S: ReportService + 'static> ReportServer for ReportHost<S> {
    /// Renders a report.
    ///
    /// Application-level failures are returned in the message body with an
    /// OK status; only service errors become a non-OK status.
    async fn generate_report(
        &self,
        request: Request<GenerateReportRequest>,
    ) -> Result<Response<ReportResult>, Status> {
        let request = ReportRequest::from(request.into_inner());

        info!(
            "GenerateReport template={} format={} charts={}",
            request.template_id, request.output_format, request.include_charts
        );

        let result = self
            .service
            .generate_report(&request)
            .await
            .map_err(|e| {
                warn!("GenerateReport failed: {}", e);
                status_from_error(e)
            })?;

        if let Some(message) = result.error_message() {
            debug!("Template {} declined: {}", request.template_id, message);
        }

        Ok(Response::new(ReportResult::from(result)))
    }

    async fn get_available_report_templates(
        &self,
        _request: Request<ListTemplatesRequest>,
    ) -> Result<Response<ListTemplatesResponse>, Status> {
        let templates = self
            .service
            .available_report_templates()
            .await
            .map_err(|e| {
                warn!("GetAvailableReportTemplates failed: {}", e);
                status_from_error(e)
            })?;

        debug!("Serving {} templates", templates.len());

        Ok(Response::new(ListTemplatesResponse::from(templates)))
    }

    async fn check_health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        let healthy = self
            .service
            .check_health()
            .await
            .map_err(status_from_error)?;

        Ok(Response::new(HealthResponse { healthy }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = status_from_error(ServiceError::Unavailable("draining".to_string()));
        assert_eq!(status.code(), tonic::Code::Unavailable);
        assert_eq!(status.message(), "draining");

        let status = status_from_error(ServiceError::InvalidResponse("bad".to_string()));
        assert_eq!(status.code(), tonic::Code::Internal);
    }
}
