//! GDPR (Regulation (EU) 2016/679) rule table.
//!
//! Covers processing principles, lawful basis, consent, transparency,
//! data subject rights, privacy by design, accountability records,
//! security, breach notification, and impact assessments.

use crate::frameworks::engine::{Condition, Framework, Gate, RuleCheck};
use crate::frameworks::types::{ComplianceRule, RiskLevel};

const PII: &[&str] = &["pii", "personal", "sensitive", "special_category"];
const HIGH_RISK: &[RiskLevel] = &[RiskLevel::High, RiskLevel::Critical];
const COLLECTION_EVENTS: &[&str] = &["data_collection", "registration", "signup", "form_submission"];

/// Build the GDPR framework with all defined rules.
pub fn gdpr() -> Framework {
    Framework::new("GDPR", "2016/679", rules())
}

fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "GDPR-Art5",
            "Data Processing Principles",
            RiskLevel::Critical,
            "data_protection",
        )
        .with_description(
            "Personal data shall be processed lawfully, fairly and transparently, \
             collected for specified purposes, minimised, accurate, retained no longer \
             than necessary, and secured. The controller must be able to demonstrate \
             compliance. (Article 5)",
        )
        .with_remediation(
            "Document the lawful basis for processing, limit collection to what is \
             necessary, implement accuracy checks, define retention periods, apply \
             security measures, and maintain records demonstrating compliance.",
        )
        .with_references(&["GDPR Article 5(1)(2)", "Recitals 39-47"])
        .with_logic(RuleCheck::when(Gate::classifications(PII)).require(
            Condition::AllMetaTrue(&[
                ("lawful_basis_documented", "lawful basis"),
                ("purpose_documented", "purpose limitation"),
            ]),
            "Personal data processing (classification={classification}) without documented lawful basis or purpose limitation",
        )),
        ComplianceRule::new(
            "GDPR-Art6",
            "Lawful Basis for Processing",
            RiskLevel::Critical,
            "legal_basis",
        )
        .with_description(
            "Processing is lawful only if at least one basis applies: consent, contract \
             necessity, legal obligation, vital interests, public interest, or \
             legitimate interests. Each activity must have a documented basis before \
             processing begins. (Article 6)",
        )
        .with_remediation(
            "Identify and document the appropriate lawful basis for each processing \
             activity before it begins. For consent, ensure it meets GDPR requirements. \
             For legitimate interests, conduct a balancing test.",
        )
        .with_references(&["GDPR Article 6(1)", "Recitals 40-50"])
        .with_logic(RuleCheck::when(Gate::classifications(PII)).require(
            Condition::ValueIn(
                "lawful_basis",
                &[
                    "consent",
                    "contract",
                    "legal_obligation",
                    "vital_interests",
                    "public_interest",
                    "legitimate_interests",
                ],
            ),
            "Personal data processing (classification={classification}) without valid lawful basis. Provided: {value}",
        )),
        ComplianceRule::new(
            "GDPR-Art7",
            "Conditions for Consent",
            RiskLevel::High,
            "consent",
        )
        .with_description(
            "Where processing is based on consent, the controller shall be able to \
             demonstrate that consent was freely given, specific, informed and \
             unambiguous, and that withdrawal is as easy as giving consent. (Article 7)",
        )
        .with_remediation(
            "Implement consent mechanisms that require affirmative action, are specific \
             to each purpose, provide clear information, allow easy withdrawal, and \
             maintain consent records.",
        )
        .with_references(&["GDPR Article 7(1-4)", "Recitals 32, 42, 43"])
        .with_logic(
            RuleCheck::when(Gate::any().and_meta_equals(&[("lawful_basis", "consent")])).require(
                Condition::AllMetaTrue(&[
                    ("consent_recorded", "recorded"),
                    ("consent_specific", "specific"),
                    ("consent_informed", "informed"),
                ]),
                "Consent-based processing without valid consent. Missing: {missing}",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art12",
            "Transparent Information and Communication",
            RiskLevel::High,
            "transparency",
        )
        .with_description(
            "Information about processing must be provided to the data subject in a \
             concise, transparent, intelligible and easily accessible form, using clear \
             and plain language. (Article 12)",
        )
        .with_remediation(
            "Develop clear, accessible privacy notices in plain language, provided \
             through multiple channels, with procedures to respond to data subject \
             requests within one month.",
        )
        .with_references(&["GDPR Article 12(1-6)", "Recitals 58-59"])
        .with_logic(RuleCheck::when(Gate::events(COLLECTION_EVENTS)).require(
            Condition::MetaTrue("privacy_notice_provided"),
            "Data collection event (type={event_type}) without transparent privacy information provided to data subject",
        )),
        ComplianceRule::new(
            "GDPR-Art13",
            "Information at Collection",
            RiskLevel::High,
            "transparency",
        )
        .with_description(
            "Where personal data are collected from the data subject, the controller \
             must provide at collection time the controller identity, purposes and \
             legal basis, recipients, retention period, data subject rights, and the \
             existence of automated decision-making. (Article 13)",
        )
        .with_remediation(
            "Create privacy notices including all Article 13 information, provided at \
             the point of collection. For AI systems, clearly explain automated \
             decision-making and the logic involved.",
        )
        .with_references(&["GDPR Article 13(1-3)", "Recitals 60-62"])
        .with_logic(
            RuleCheck::when(Gate::events(COLLECTION_EVENTS).and_classifications(PII)).require(
                Condition::MetaTrue("art13_disclosure_complete"),
                "Personal data collection (type={event_type}) without complete Article 13 information disclosure",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art15",
            "Right of Access",
            RiskLevel::High,
            "data_subject_rights",
        )
        .with_description(
            "The data subject has the right to obtain confirmation of processing, \
             access to the personal data, and supplementary information including \
             purposes, categories, recipients, and retention period. (Article 15)",
        )
        .with_remediation(
            "Implement systems to verify identity, retrieve all personal data across \
             systems, and generate a complete response within one month in a commonly \
             used electronic format.",
        )
        .with_references(&["GDPR Article 15(1-4)", "Recitals 63-64"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_subject_access_request",
                "dsar",
                "subject_access_request",
            ]))
            .require(
                Condition::MetaTrue("response_within_deadline"),
                "Data subject access request (type={event_type}) not responded to within the required timeframe",
            )
            .require(
                Condition::MetaTrue("complete_response_provided"),
                "Data subject access request (type={event_type}) response incomplete - must include all personal data and required information",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art17",
            "Right to Erasure (Right to be Forgotten)",
            RiskLevel::High,
            "data_subject_rights",
        )
        .with_description(
            "The data subject has the right to obtain erasure of personal data without \
             undue delay where grounds apply. Where data has been made public, the \
             controller must take reasonable steps to inform other controllers. \
             (Article 17)",
        )
        .with_remediation(
            "Implement erasure capabilities that identify all instances of personal \
             data, securely delete from all systems including backups, notify third \
             parties, and respond within one month.",
        )
        .with_references(&["GDPR Article 17(1-3)", "Recitals 65-66"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "erasure_request",
                "deletion_request",
                "right_to_be_forgotten",
            ]))
            .require(
                Condition::MetaTrue("erasure_complete"),
                "Erasure request (type={event_type}) not completed - personal data must be erased from all systems",
            )
            .require(
                // Defaults to true: notification is N/A when no third
                // parties received the data.
                Condition::MetaTrueOr("third_parties_notified", true),
                "Erasure request (type={event_type}) - third party recipients of data not notified of erasure requirement",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art20",
            "Right to Data Portability",
            RiskLevel::Medium,
            "data_subject_rights",
        )
        .with_description(
            "The data subject has the right to receive personal data they provided in \
             a structured, commonly used and machine-readable format, and to transmit \
             those data to another controller. (Article 20)",
        )
        .with_remediation(
            "Implement data export in structured, machine-readable formats (JSON, CSV, \
             XML) covering all data provided by the subject, with direct transmission \
             where feasible.",
        )
        .with_references(&["GDPR Article 20(1-4)", "Recital 68"])
        .with_logic(
            RuleCheck::when(Gate::events(&["portability_request", "data_export_request"]))
                .require(
                    Condition::MetaTrue("machine_readable_format"),
                    "Data portability request (type={event_type}) - data not provided in structured, machine-readable format",
                ),
        ),
        ComplianceRule::new(
            "GDPR-Art22",
            "Automated Decision-Making and Profiling",
            RiskLevel::Critical,
            "data_subject_rights",
        )
        .with_description(
            "The data subject has the right not to be subject to a decision based \
             solely on automated processing which produces legal or similarly \
             significant effects, absent suitable safeguards including human \
             intervention and the right to contest. (Article 22)",
        )
        .with_remediation(
            "Implement human review for decisions with significant effects, provide \
             meaningful information about the logic involved, and allow data subjects \
             to express their views and contest decisions.",
        )
        .with_references(&["GDPR Article 22(1-4)", "Recitals 71-72"])
        .with_logic(
            RuleCheck::when(
                Gate::events(&[
                    "automated_decision",
                    "profiling",
                    "scoring",
                    "credit_decision",
                    "hiring_decision",
                    "eligibility_decision",
                ])
                .and_meta_flags(&[("significant_effect", false)]),
            )
            .require(
                Condition::MetaTrue("human_intervention_available"),
                "Automated decision with significant effect (type={event_type}) without human intervention mechanism available",
            )
            .require(
                Condition::MetaTrue("right_to_contest_enabled"),
                "Automated decision with significant effect (type={event_type}) without right to contest the decision",
            )
            .require(
                Condition::MetaTrue("logic_explained"),
                "Automated decision with significant effect (type={event_type}) without meaningful information about the logic involved",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art25",
            "Data Protection by Design and Default",
            RiskLevel::High,
            "accountability",
        )
        .with_description(
            "The controller shall implement technical and organisational measures \
             designed to implement data-protection principles effectively and ensure \
             that, by default, only necessary personal data are processed. (Article 25)",
        )
        .with_remediation(
            "Embed privacy into system design from the outset: conduct privacy impact \
             assessments during development, implement data minimisation by default, \
             use pseudonymisation and encryption, and document design decisions.",
        )
        .with_references(&["GDPR Article 25(1-3)", "Recital 78"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "system_deployment",
                "feature_launch",
                "processing_change",
            ]))
            .require(
                Condition::MetaTrue("privacy_by_design_assessment"),
                "System deployment/change (type={event_type}) without documented privacy by design assessment",
            )
            .require(
                Condition::MetaTrue("data_minimisation_default"),
                "System deployment/change (type={event_type}) without data minimisation implemented by default",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art30",
            "Records of Processing Activities",
            RiskLevel::High,
            "accountability",
        )
        .with_description(
            "Each controller shall maintain a record of processing activities \
             containing purposes, categories of data subjects and data, recipients, \
             transfers, retention periods, and security measures, available to the \
             supervisory authority on request. (Article 30)",
        )
        .with_remediation(
            "Create and maintain records of all processing activities (ROPA) covering \
             all systems including AI/ML systems, reviewed and updated regularly.",
        )
        .with_references(&["GDPR Article 30(1-5)", "Recital 82"])
        .with_logic(
            RuleCheck::when(
                Gate::events(&["data_processing", "data_transfer", "new_processing_activity"])
                    .and_classifications(PII),
            )
            .require(
                Condition::MetaTrue("ropa_entry_exists"),
                "Processing activity (type={event_type}) not recorded in the Records of Processing Activities (ROPA)",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art32",
            "Security of Processing",
            RiskLevel::Critical,
            "security",
        )
        .with_description(
            "The controller and processor shall implement technical and organisational \
             measures appropriate to the risk, including pseudonymisation and \
             encryption, ongoing confidentiality and resilience, timely restoration, \
             and regular testing. (Article 32)",
        )
        .with_remediation(
            "Encrypt personal data in transit and at rest, implement access controls \
             and authentication, maintain backup and recovery procedures, and conduct \
             regular security testing. For AI systems, also consider model security.",
        )
        .with_references(&["GDPR Article 32(1-4)", "Recital 83"])
        .with_logic(
            RuleCheck::when(
                Gate::events(&[
                    "data_access",
                    "data_transfer",
                    "data_processing",
                    "data_export",
                    "api_call",
                    "model_inference",
                ])
                .and_classifications(PII),
            )
            .require(
                Condition::MetaTrue("encryption_applied"),
                "Personal data operation (type={event_type}) without appropriate encryption measures",
            )
            .require(
                Condition::MetaTrue("access_controlled"),
                "Personal data operation (type={event_type}) without appropriate access control measures",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art33",
            "Personal Data Breach Notification",
            RiskLevel::Critical,
            "security",
        )
        .with_description(
            "In the case of a personal data breach, the controller shall notify the \
             supervisory authority without undue delay and, where feasible, not later \
             than 72 hours after becoming aware, unless the breach is unlikely to \
             result in a risk to rights and freedoms. (Article 33)",
        )
        .with_remediation(
            "Establish breach detection and response procedures with clear escalation \
             paths, prepared notification templates, a breach register, and a tested \
             72-hour notification capability.",
        )
        .with_references(&["GDPR Article 33(1-5)", "Recitals 85-88"])
        .with_logic(
            RuleCheck::when(
                Gate::events(&["data_breach", "security_incident", "unauthorized_access"])
                    // No notification required when the breach poses no
                    // risk to rights and freedoms; presumed reportable.
                    .and_meta_flags(&[("risk_to_rights_freedoms", true)]),
            )
            .require(
                Condition::MetaTrue("supervisory_authority_notified"),
                "Personal data breach (type={event_type}) not notified to supervisory authority",
            )
            .require(
                Condition::MetaTrue("notification_within_72_hours"),
                "Personal data breach (type={event_type}) notification exceeded 72-hour requirement without documented justification",
            ),
        ),
        ComplianceRule::new(
            "GDPR-Art35",
            "Data Protection Impact Assessment",
            RiskLevel::High,
            "accountability",
        )
        .with_description(
            "Where processing is likely to result in a high risk to the rights and \
             freedoms of natural persons, the controller shall carry out a data \
             protection impact assessment prior to the processing, in particular for \
             systematic automated evaluation including profiling. (Article 35)",
        )
        .with_remediation(
            "Conduct DPIAs for high-risk processing, especially AI/ML systems: assess \
             necessity and proportionality, identify risks and mitigating measures, \
             consult the DPO, and complete before deployment.",
        )
        .with_references(&["GDPR Article 35(1-11)", "Recitals 89-92"])
        .with_logic(
            RuleCheck::when(
                Gate::events(&[
                    "profiling",
                    "automated_decision",
                    "large_scale_processing",
                    "systematic_monitoring",
                    "special_category_processing",
                    "new_technology_deployment",
                    "ai_model_deployment",
                ])
                .and_risk(HIGH_RISK),
            )
            .require(
                Condition::MetaTrue("dpia_completed"),
                "High-risk processing (type={event_type}) commenced without completing Data Protection Impact Assessment",
            )
            .require(
                Condition::MetaTrue("dpia_reviewed_by_dpo"),
                "High-risk processing (type={event_type}) DPIA not reviewed by Data Protection Officer",
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
        let fw = gdpr();
        assert_eq!(fw.rules().len(), 14);
        assert_eq!(fw.name(), "GDPR");
        assert_eq!(fw.version(), "2016/679");
    }

    #[test]
    fn test_lawful_basis_value_set() {
        let fw = gdpr();

        let missing = AuditEntry::new("e-1", "data_processing", "svc", "process")
            .with_classification("pii");
        let violation = fw
            .check(&missing, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "GDPR-Art6")
            .cloned()
            .unwrap();
        assert!(violation.evidence.ends_with("Provided: None"));

        let invalid = AuditEntry::new("e-2", "data_processing", "svc", "process")
            .with_classification("pii")
            .with_metadata("lawful_basis", "curiosity");
        let violation = fw
            .check(&invalid, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "GDPR-Art6")
            .cloned()
            .unwrap();
        assert!(violation.evidence.ends_with("Provided: curiosity"));

        let valid = AuditEntry::new("e-3", "data_processing", "svc", "process")
            .with_classification("pii")
            .with_metadata("lawful_basis", "contract");
        assert!(!fw
            .check(&valid, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art6"));
    }

    #[test]
    fn test_consent_conditions_only_apply_to_consent_basis() {
        let fw = gdpr();

        let contract = AuditEntry::new("e-4", "data_processing", "svc", "process")
            .with_metadata("lawful_basis", "contract");
        assert!(!fw
            .check(&contract, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art7"));

        let consent = AuditEntry::new("e-5", "data_processing", "svc", "process")
            .with_metadata("lawful_basis", "consent")
            .with_metadata("consent_specific", true);
        let violation = fw
            .check(&consent, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "GDPR-Art7")
            .cloned()
            .unwrap();
        assert_eq!(
            violation.evidence,
            "Consent-based processing without valid consent. Missing: recorded, informed"
        );
    }

    #[test]
    fn test_automated_decision_safeguards_in_order() {
        let fw = gdpr();

        // Without significant effect the rule does not apply.
        let minor = AuditEntry::new("e-6", "scoring", "svc", "score");
        assert!(!fw
            .check(&minor, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art22"));

        let significant = AuditEntry::new("e-7", "scoring", "svc", "score")
            .with_metadata("significant_effect", true)
            .with_metadata("human_intervention_available", true);
        let violation = fw
            .check(&significant, &profile())
            .violations
            .iter()
            .find(|v| v.rule_id == "GDPR-Art22")
            .cloned()
            .unwrap();
        assert!(violation.evidence.contains("right to contest"));
    }

    #[test]
    fn test_erasure_third_party_notification_defaults_true() {
        let fw = gdpr();

        let complete = AuditEntry::new("e-8", "erasure_request", "dpo", "erase")
            .with_metadata("erasure_complete", true);
        assert!(!fw
            .check(&complete, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art17"));

        let unnotified = AuditEntry::new("e-9", "erasure_request", "dpo", "erase")
            .with_metadata("erasure_complete", true)
            .with_metadata("third_parties_notified", false);
        assert!(fw
            .check(&unnotified, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art17"));
    }

    #[test]
    fn test_breach_without_risk_needs_no_notification() {
        let fw = gdpr();

        let no_risk = AuditEntry::new("e-10", "data_breach", "svc", "report")
            .with_metadata("risk_to_rights_freedoms", false);
        assert!(!fw
            .check(&no_risk, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art33"));

        let unreported = AuditEntry::new("e-11", "data_breach", "svc", "report");
        assert!(fw
            .check(&unreported, &profile())
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art33"));
    }

    #[test]
    fn test_non_pii_skips_data_protection_rules() {
        let fw = gdpr();
        let entry = AuditEntry::new("e-12", "data_processing", "svc", "process");
        let result = fw.check(&entry, &profile());
        assert!(!result
            .violations
            .iter()
            .any(|v| v.rule_id == "GDPR-Art5" || v.rule_id == "GDPR-Art6"));
    }
}
