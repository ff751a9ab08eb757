//! Compliance report generation and export.

pub mod generator;
pub mod scoring;
pub mod sections;

pub use generator::{ComplianceReport, ReportGenerator};
pub use scoring::{compliance_score, determine_status, ComplianceStatus};
pub use sections::{ReportSection, ReportStats, ReportTemplate};
