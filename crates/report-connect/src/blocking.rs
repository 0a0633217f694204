//! Synchronous facade over `ReportBridge`
//!
//! For callers that are not running inside an async runtime. Each call
//! blocks the current thread for the full round trip.

use crate::bridge::ReportBridge;
use crate::error::ConnectError;
use crate::registry::Registry;
use report_interface::{ReportRequest, ReportResult, ReportTemplate};
use tokio::runtime::Runtime;

/// A `ReportBridge` bundled with the runtime that drives it
///
/// Must not be used from within an async context: `block_on` panics there.
pub struct BlockingReportBridge {
    runtime: Runtime,
    bridge: ReportBridge,
}

impl BlockingReportBridge {
    /// Look up the ReportServer at `server_address` over gRPC
    ///
    /// # Errors
    ///
    /// Only fails if the runtime cannot be created. A failed lookup yields
    /// a degraded bridge, exactly like `ReportBridge::connect`.
    pub fn connect(server_address: impl Into<String>) -> Result<Self, ConnectError> {
        let runtime = Runtime::new()?;
        let bridge = runtime.block_on(ReportBridge::connect(server_address));
        Ok(Self { runtime, bridge })
    }

    pub fn connect_with<R: Registry + ?Sized>(
        registry: &R,
        server_address: impl Into<String>,
    ) -> Result<Self, ConnectError> {
        let runtime = Runtime::new()?;
        let bridge = runtime.block_on(ReportBridge::connect_with(registry, server_address));
        Ok(Self { runtime, bridge })
    }

    pub fn is_connected(&self) -> bool {
        self.bridge.is_connected()
    }

    pub fn server_address(&self) -> &str {
        self.bridge.server_address()
    }

    pub fn generate_report(&self, request: &ReportRequest) -> ReportResult {
        self.runtime.block_on(self.bridge.generate_report(request))
    }

    pub fn available_report_templates(&self) -> Vec<ReportTemplate> {
        self.runtime
            .block_on(self.bridge.available_report_templates())
    }

    pub fn check_health(&self) -> bool {
        self.runtime.block_on(self.bridge.check_health())
    }

    /// The async bridge underneath, e.g. to hand to another runtime
    pub fn into_inner(self) -> ReportBridge {
        self.bridge
    }
}
