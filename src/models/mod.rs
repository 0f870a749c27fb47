//! Data models for API resources and diagnostic reports

pub mod network;
pub mod resource;

pub use network::{DiagnosticReport, ProbeFailure};
pub use resource::Resource;
