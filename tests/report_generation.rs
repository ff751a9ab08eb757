//! End-to-end report generation tests.
//!
//! Pipeline under test: audit entries logged through AuditLogger into a
//! file-backed store, then evaluated and rendered by ReportGenerator.
//! Real filesystem, no mocks.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use complykit::audit::{AuditLogger, AuditStore, MemoryStore};
use complykit::core::StorageConfig;
use complykit::frameworks::{AuditEntry, ComplianceProfile, RiskLevel};
use complykit::reports::{ComplianceReport, ComplianceStatus, ReportGenerator};

fn file_config(dir: &TempDir) -> StorageConfig {
    StorageConfig::file(dir.path().display().to_string())
}

fn wide_period() -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let now = Utc::now();
    (now - Duration::days(1), now + Duration::days(1))
}

// =============================================================================
// FILE-BACKED PIPELINE
// =============================================================================

/// Entries logged through the file backend surface in the report.
#[test]
fn test_file_backed_pipeline_detects_violations() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let logger = AuditLogger::new(config.open().unwrap());
    // Unnotified user-facing interactions violate transparency rules
    logger
        .log_interaction("inference", "user-1", "generate", Some("prompt"), Some("reply"))
        .unwrap();
    logger
        .log_interaction("inference", "user-2", "generate", None, None)
        .unwrap();

    let generator = ReportGenerator::new(config.open().unwrap());
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Nightly Audit");

    let report = generator.generate(start, end, &profile, None).unwrap();
    assert_eq!(report.total_entries, 2);
    assert!(report.violations_count > 0);
    assert!(report.compliance_score < 1.0);

    let md = report.to_markdown();
    assert!(md.contains("EUAI-002"));
    assert!(md.contains("## Compliance Matrix"));
}

/// Content hashes recorded by the logger survive the file round trip.
#[test]
fn test_file_backed_pipeline_preserves_hashes() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let logger = AuditLogger::new(config.open().unwrap());
    let entry = logger
        .log_interaction("inference", "user-1", "generate", Some("hello world"), None)
        .unwrap();

    let store = config.open().unwrap();
    let loaded = store.read(&entry.entry_id).unwrap().unwrap();
    assert_eq!(
        loaded.metadata_str("input_hash"),
        Some("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
    );
    assert!(loaded.metadata_str("input_content").is_none());
}

/// Retention cleanup removes only expired entries from disk.
#[test]
fn test_file_backed_retention_cleanup() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let logger = AuditLogger::new(config.open().unwrap()).with_retention_days(30);
    let stale = AuditEntry::new("stale", "inference", "u", "a")
        .with_timestamp(Utc::now() - Duration::days(90));
    logger.log(&stale).unwrap();
    logger
        .log_interaction("inference", "u", "a", None, None)
        .unwrap();

    assert_eq!(logger.cleanup_expired().unwrap(), 1);
    assert!(logger.get_entry("stale").unwrap().is_none());
    assert_eq!(logger.store().count().unwrap(), 1);
}

// =============================================================================
// STATUS DETERMINATION
// =============================================================================

fn memory_generator(entries: Vec<AuditEntry>) -> ReportGenerator {
    let store = MemoryStore::new();
    for entry in &entries {
        store.write(entry).unwrap();
    }
    ReportGenerator::new(Box::new(store))
}

/// A clean trail reports compliant across all frameworks.
#[test]
fn test_clean_trail_is_compliant() {
    let generator = memory_generator(vec![
        AuditEntry::new("e1", "heartbeat", "ops", "ping"),
        AuditEntry::new("e2", "heartbeat", "ops", "ping"),
    ]);
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Clean");

    let report = generator.generate(start, end, &profile, None).unwrap();
    assert_eq!(report.status, ComplianceStatus::Compliant);
    assert_eq!(report.compliance_score, 1.0);
    assert_eq!(report.violations_count, 0);
}

/// A single critical violation forces non_compliant even when the
/// weighted score stays high.
#[test]
fn test_critical_violation_forces_non_compliant() {
    let mut entries: Vec<AuditEntry> = (0..20)
        .map(|i| AuditEntry::new(format!("ok-{i}"), "heartbeat", "ops", "ping"))
        .collect();
    entries.push(
        AuditEntry::new("bad", "automated_decision", "svc", "decide")
            .with_risk_level(RiskLevel::Critical),
    );

    let generator = memory_generator(entries);
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Mixed");

    let report = generator.generate(start, end, &profile, None).unwrap();
    assert!(report.compliance_score > 0.80);
    assert_eq!(report.status, ComplianceStatus::NonCompliant);
    assert!(report.summary.critical_violations > 0);
}

// =============================================================================
// EXPORT FORMATS
// =============================================================================

/// The three export formats agree on the report's identity and status.
#[test]
fn test_export_formats_agree() {
    let generator = memory_generator(vec![AuditEntry::new("e1", "heartbeat", "ops", "ping")]);
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Exports");

    let report = generator.generate(start, end, &profile, None).unwrap();

    let md = report.to_markdown();
    assert!(md.contains(&report.id));
    assert!(md.contains("**Status:** COMPLIANT"));

    let json = report.to_json().unwrap();
    let parsed: ComplianceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.id, report.id);
    assert_eq!(parsed.status, ComplianceStatus::Compliant);

    let html = report.to_html();
    assert!(html.contains(&report.id));
    assert!(html.contains("#28a745"));
}

/// Single-framework reports restrict evaluation and use the framework
/// template title.
#[test]
fn test_single_framework_report() {
    let generator = memory_generator(vec![AuditEntry::new("e1", "inference", "user-1", "x")]);
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Targeted");

    let report = generator
        .generate(start, end, &profile, Some("hipaa"))
        .unwrap();
    assert_eq!(report.title, "HIPAA Compliance Report");
    assert_eq!(report.summary.frameworks, vec!["HIPAA".to_string()]);
    // Non-PHI entry is out of HIPAA scope
    assert_eq!(report.violations_count, 0);
}

/// The executive variant carries only the three summary sections.
#[test]
fn test_executive_summary_report() {
    let generator = memory_generator(vec![AuditEntry::new("e1", "heartbeat", "ops", "ping")]);
    let (start, end) = wide_period();
    let profile = ComplianceProfile::new("p1", "Board");

    let report = generator
        .generate_executive_summary(start, end, &profile)
        .unwrap();
    assert_eq!(report.title, "Executive Summary - Board");
    assert_eq!(report.sections.len(), 3);
    assert!(report.to_markdown().contains("## Executive Summary"));
}

/// Entries outside the period are ignored.
#[test]
fn test_period_bounds_filter_entries() {
    let now = Utc::now();
    let generator = memory_generator(vec![
        AuditEntry::new("in", "heartbeat", "ops", "ping").with_timestamp(now),
        AuditEntry::new("out", "heartbeat", "ops", "ping")
            .with_timestamp(now - Duration::days(30)),
    ]);
    let profile = ComplianceProfile::new("p1", "Bounds");

    let report = generator
        .generate(now - Duration::days(1), now + Duration::days(1), &profile, None)
        .unwrap();
    assert_eq!(report.total_entries, 1);
}
