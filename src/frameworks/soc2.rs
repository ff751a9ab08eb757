//! SOC2 Type II (AICPA Trust Services Criteria, 2017) rule table.
//!
//! Covers the five trust service principles: security (common
//! criteria), availability, processing integrity, confidentiality,
//! and privacy.

use crate::frameworks::engine::{Condition, Framework, Gate, RuleCheck};
use crate::frameworks::types::{ComplianceRule, RiskLevel};

/// Build the SOC2 Type II framework with all defined rules.
pub fn soc2() -> Framework {
    Framework::new("SOC2 Type II", "2017", rules())
}

fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "SOC2-CC6.1",
            "Logical Access Controls",
            RiskLevel::High,
            "security",
        )
        .with_description(
            "The entity implements logical access security software, infrastructure, \
             and architectures over protected information assets. Access is restricted \
             based on the user's identity, role, or other criteria, and permitted only \
             to authorized users.",
        )
        .with_remediation(
            "Implement role-based or attribute-based access control. Ensure all access \
             to AI systems and data is authenticated and authorized. Log all access \
             attempts.",
        )
        .with_references(&["AICPA TSC CC6.1", "NIST SP 800-53 AC-2, AC-3"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_access",
                "model_access",
                "api_call",
                "authentication",
                "inference",
                "training",
                "data_export",
            ]))
            .require(
                Condition::ActorKnown(&["anonymous"]),
                "Access event (type={event_type}) performed by unauthenticated or anonymous user",
            )
            .require(
                Condition::MetaTrue("access_controlled"),
                "Access event (type={event_type}) performed without documented access control validation",
            ),
        ),
        ComplianceRule::new(
            "SOC2-CC6.2",
            "System Boundary Definition",
            RiskLevel::Medium,
            "security",
        )
        .with_description(
            "Prior to issuing system credentials and granting system access, the \
             entity registers and authorizes new internal and external users. \
             Credentials are removed when access is no longer authorized.",
        )
        .with_remediation(
            "Maintain a clear inventory of system boundaries and authorized users, \
             with user provisioning/deprovisioning processes and regular access \
             reviews.",
        )
        .with_references(&["AICPA TSC CC6.2", "NIST SP 800-53 AC-2"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "api_call",
                "external_integration",
                "data_import",
                "data_export",
            ]))
            .require(
                Condition::SystemIdPresent,
                "External event (type={event_type}) performed without defined system boundary (missing system_id)",
            ),
        ),
        ComplianceRule::new(
            "SOC2-CC6.3",
            "Change Management",
            RiskLevel::Medium,
            "security",
        )
        .with_description(
            "The entity authorizes, designs, documents, tests, approves, and \
             implements changes to infrastructure, data, software, and procedures. \
             Changes are authorized, documented, tested, and approved before \
             implementation.",
        )
        .with_remediation(
            "Establish formal change management for AI systems. Document all changes \
             to models, configurations, and infrastructure, require approval before \
             production deployment, and test in non-production environments first.",
        )
        .with_references(&["AICPA TSC CC6.3", "NIST SP 800-53 CM-3"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "deployment",
                "model_update",
                "config_change",
                "training",
                "fine_tuning",
                "rollback",
            ]))
            .require(
                Condition::MetaTrue("change_approved"),
                "Change event (type={event_type}) performed without documented change approval",
            )
            .require(
                Condition::DocRef,
                "Change event (type={event_type}) performed without documentation reference",
            ),
        ),
        ComplianceRule::new(
            "SOC2-CC7.1",
            "System Monitoring",
            RiskLevel::High,
            "security",
        )
        .with_description(
            "The entity uses detection and monitoring procedures to identify \
             configuration changes introducing new vulnerabilities and \
             susceptibilities to newly discovered vulnerabilities, monitoring system \
             components for anomalies.",
        )
        .with_remediation(
            "Implement monitoring for AI systems covering performance metrics, error \
             rates, drift detection, and security events, with alerting thresholds and \
             response procedures.",
        )
        .with_references(&["AICPA TSC CC7.1", "NIST SP 800-53 AU-6, SI-4"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "training",
                "deployment",
                "data_access",
            ]))
            .require(
                Condition::MetaTrue("monitored"),
                "Significant operation (type={event_type}) performed without documented monitoring",
            ),
        ),
        ComplianceRule::new(
            "SOC2-CC7.2",
            "Incident Response",
            RiskLevel::High,
            "security",
        )
        .with_description(
            "The entity monitors system components for anomalies indicative of \
             malicious acts, natural disasters, and errors, and analyzes anomalies to \
             determine whether they represent security events.",
        )
        .with_remediation(
            "Establish an incident response plan specific to AI systems: detection, \
             analysis, containment, eradication, and recovery, including model \
             rollback and bias/fairness incidents.",
        )
        .with_references(&["AICPA TSC CC7.2", "NIST SP 800-53 IR-4, IR-5"])
        .with_logic(
            RuleCheck::when(Gate::any())
                .require(
                    Condition::AnyOf(&[
                        Condition::ErrorHandled,
                        Condition::MetaTrue("incident_logged"),
                    ]),
                    "Error event (type={event_type}) occurred without incident response logging",
                )
                .require(
                    Condition::IfEvent(
                        &["authentication_failure", "access_denied", "security_alert"],
                        &Condition::MetaTrue("incident_logged"),
                    ),
                    "Security event (type={event_type}) without incident response logging",
                ),
        ),
        ComplianceRule::new(
            "SOC2-CC8.1",
            "Availability Monitoring",
            RiskLevel::Medium,
            "availability",
        )
        .with_description(
            "The entity operates and monitors environmental protections, software, \
             data backup processes, and recovery infrastructure. System availability \
             is monitored against service level commitments.",
        )
        .with_remediation(
            "Implement availability monitoring for all AI system components. Define \
             and monitor SLAs for inference latency, throughput, and uptime, with \
             alerting for degradation.",
        )
        .with_references(&["AICPA TSC CC8.1", "NIST SP 800-53 CP-2, CP-7"])
        .with_logic(
            RuleCheck::when(Gate::events(&["health_check", "deployment", "scaling", "recovery"]))
                .require(
                    Condition::MetaTrue("sla_monitored"),
                    "Availability event (type={event_type}) without documented SLA monitoring",
                ),
        ),
        ComplianceRule::new(
            "SOC2-A1.1",
            "Recovery Objectives Defined",
            RiskLevel::Medium,
            "availability",
        )
        .with_description(
            "The entity maintains, monitors, and evaluates current processing \
             capacity and use of system components to manage capacity demand. \
             Recovery time objectives (RTO) and recovery point objectives (RPO) are \
             defined.",
        )
        .with_remediation(
            "Define and document RTO and RPO for AI systems. Implement backup \
             procedures for models, configurations, and data, and test recovery \
             procedures regularly.",
        )
        .with_references(&["AICPA TSC A1.1", "NIST SP 800-53 CP-9, CP-10"])
        .with_logic(
            RuleCheck::when(Gate::events(&["backup", "restore", "recovery", "disaster_recovery"]))
                .require(
                    Condition::AllMetaTrue(&[("rto_defined", "RTO"), ("rpo_defined", "RPO")]),
                    "Recovery event (type={event_type}) without defined RTO/RPO objectives (missing: {missing})",
                ),
        ),
        ComplianceRule::new(
            "SOC2-PI1.1",
            "Processing Integrity Validation",
            RiskLevel::Medium,
            "processing_integrity",
        )
        .with_description(
            "The entity implements policies and procedures over system inputs, \
             including controls that help ensure completeness, accuracy, timeliness, \
             and authorization of system inputs.",
        )
        .with_remediation(
            "Validate all AI system inputs: formats, ranges, and consistency. Log all \
             inputs with timestamps and monitor for data drift.",
        )
        .with_references(&["AICPA TSC PI1.1", "NIST SP 800-53 SI-10"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "training",
                "data_processing",
                "data_transformation",
            ]))
            .require(
                Condition::MetaTrue("input_validated"),
                "Processing event (type={event_type}) without documented input validation",
            ),
        ),
        ComplianceRule::new(
            "SOC2-C1.1",
            "Confidentiality Classification",
            RiskLevel::High,
            "confidentiality",
        )
        .with_description(
            "The entity identifies and maintains confidential information to meet its \
             confidentiality objectives. Information is classified according to its \
             sensitivity and protected accordingly.",
        )
        .with_remediation(
            "Classify all data processed by AI systems according to sensitivity \
             levels (public, internal, confidential, restricted) and apply protection \
             measures based on classification.",
        )
        .with_references(&["AICPA TSC C1.1", "NIST SP 800-53 RA-2"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_access",
                "data_processing",
                "inference",
                "training",
                "data_export",
            ]))
            .require(
                Condition::ClassificationNot("unclassified"),
                "Data event (type={event_type}) with unclassified data (classification should be specified)",
            ),
        ),
        ComplianceRule::new(
            "SOC2-P1.1",
            "Privacy Notice Provided",
            RiskLevel::High,
            "privacy",
        )
        .with_description(
            "The entity provides notice to data subjects about its privacy practices \
             at or before the time their personal information is collected, describing \
             the purposes for which personal information is collected, used, retained, \
             and disclosed.",
        )
        .with_remediation(
            "Provide clear privacy notices before collecting personal data for AI \
             processing, document how that data is used in training and inference, and \
             maintain records of notices provided.",
        )
        .with_references(&["AICPA TSC P1.1", "GDPR Article 13"])
        .with_logic(
            RuleCheck::when(Gate::classifications(&["pii", "phi", "personal", "sensitive"]))
                .require(
                    Condition::MetaTrue("privacy_notice_provided"),
                    "Personal data event (type={event_type}, classification={classification}) without documented privacy notice",
                ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::types::{AuditEntry, ComplianceProfile};

    fn profile() -> ComplianceProfile {
        ComplianceProfile::new("p", "Default")
    }

    #[test]
    fn test_rule_count() {
        let fw = soc2();
        assert_eq!(fw.rules().len(), 10);
        assert_eq!(fw.name(), "SOC2 Type II");
        assert_eq!(fw.version(), "2017");
    }

    #[test]
    fn test_incident_response_dual_trigger() {
        let fw = soc2();

        // Unhandled error without incident log.
        let error = AuditEntry::new("e-1", "timeout", "svc", "fail")
            .with_error_handled(false);
        let violation = fw
            .check(&error, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "SOC2-CC7.2")
            .cloned()
            .unwrap();
        assert!(violation.evidence.starts_with("Error event"));

        // Security event without incident log (error handled fine).
        let security = AuditEntry::new("e-2", "access_denied", "svc", "deny");
        let violation = fw
            .check(&security, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "SOC2-CC7.2")
            .cloned()
            .unwrap();
        assert!(violation.evidence.starts_with("Security event"));

        // Incident logged satisfies both paths.
        let logged = AuditEntry::new("e-3", "access_denied", "svc", "deny")
            .with_error_handled(false)
            .with_metadata("incident_logged", true);
        assert!(!fw
            .check(&logged, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "SOC2-CC7.2"));
    }

    #[test]
    fn test_missing_system_id_fails_boundary_rule() {
        let fw = soc2();
        let entry = AuditEntry::new("e-4", "api_call", "svc", "call");
        assert!(fw
            .check(&entry, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "SOC2-CC6.2"));

        let bounded = AuditEntry::new("e-5", "api_call", "svc", "call")
            .with_system_id("ml-gateway");
        assert!(!fw
            .check(&bounded, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "SOC2-CC6.2"));
    }

    #[test]
    fn test_unclassified_data_event_fails_confidentiality() {
        let fw = soc2();
        let entry = AuditEntry::new("e-6", "data_access", "svc", "read");
        assert!(fw
            .check(&entry, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "SOC2-C1.1"));

        let classified = AuditEntry::new("e-7", "data_access", "svc", "read")
            .with_classification("internal");
        assert!(!fw
            .check(&classified, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "SOC2-C1.1"));
    }

    #[test]
    fn test_change_approval_checked_before_documentation() {
        let fw = soc2();
        let entry = AuditEntry::new("e-8", "deployment", "ops", "deploy");
        let violation = fw
            .check(&entry, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "SOC2-CC6.3")
            .cloned()
            .unwrap();
        assert!(violation.evidence.contains("change approval"));

        let approved = AuditEntry::new("e-9", "deployment", "ops", "deploy")
            .with_metadata("change_approved", true);
        let violation = fw
            .check(&approved, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "SOC2-CC6.3")
            .cloned()
            .unwrap();
        assert!(violation.evidence.contains("documentation reference"));
    }
}
