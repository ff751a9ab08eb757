//! Shared error and configuration types.

pub mod config;
pub mod error;

pub use config::{AuditConfig, StorageBackend, StorageConfig};
pub use error::{ComplianceError, ComplianceResult};
