//! Report Host library.
//!
//! This crate exposes a `ReportService` implementation to report bridges
//! over gRPC, under the `ReportServer` service name.

pub mod server;

pub use server::{status_from_error, ReportHost};

use report_interface::ReportService;
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tonic::transport::Server;
use tracing::info;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Serve `service` on `addr` until `shutdown` completes
pub async fn serve<S, F>(addr: SocketAddr, service: S, shutdown: F) -> Result<(), HostError>
where
    S: ReportService + 'static,
    F: Future<Output = ()> + Send,
{
    info!("Starting ReportServer on {}", addr);

    Server::builder()
        .add_service(ReportHost::new(service).into_service())
        .serve_with_shutdown(addr, shutdown)
        .await?;

    info!("ReportServer on {} stopped", addr);

    Ok(())
}
