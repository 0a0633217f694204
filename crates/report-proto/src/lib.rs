/// Generated gRPC protocol definitions for the report server.
///
/// This crate provides the protocol buffer definitions and generated code
/// for communication between the report bridge and a report host, plus the
/// conversions between wire messages and `report_interface` records.
pub mod report {
    pub mod v1 {
        tonic::include_proto!("report.v1");
    }
}

pub mod convert;

// Re-export commonly used types for convenience
pub use report::v1::*;

/// Name under which the report service is bound in a registry
pub const SERVICE_NAME: &str = "ReportServer";
