//! Report Connect: client-side gRPC connectivity for a remote report server
//!
//! This crate lets a caller reach a report server without ever seeing a
//! transport error.
//!
//! # Architecture
//!
//! - **Registry**: resolves `"<address>/ReportServer"` to a service handle once
//! - **RemoteReportService**: implements `ReportService` by proxying over gRPC
//! - **ReportBridge**: holds the resolved handle and folds every failure into a
//!   default value (failure result, empty list, `false`)
//! - **BlockingReportBridge**: the same contract for synchronous callers
//!
//! # Example
//!
//! ```rust,no_run
//! use report_connect::ReportBridge;
//! use report_interface::ReportRequest;
//!
//! async fn example() {
//!     let bridge = ReportBridge::connect("localhost:1099").await;
//!
//!     if bridge.check_health().await {
//!         let result = bridge
//!             .generate_report(&ReportRequest::new("invoice", "PDF").param("month", "3"))
//!             .await;
//!         println!("success: {}", result.is_success());
//!     }
//! }
//! ```

pub mod blocking;
pub mod bridge;
pub mod error;
pub mod registry;
pub mod remote;

pub use blocking::BlockingReportBridge;
pub use bridge::{ReportBridge, NOT_CONNECTED_MESSAGE};
pub use error::ConnectError;
pub use registry::{
    lookup_name, parse_lookup_name, ConnectOptions, GrpcRegistry, Registry, StaticRegistry,
    DEFAULT_SCHEME,
};
pub use remote::RemoteReportService;
