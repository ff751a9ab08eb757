//! HIPAA (1996, with 2013 HITECH updates) rule table.
//!
//! Security Rule technical safeguards (45 CFR 164.312) and Privacy
//! Rule requirements (164.502, 164.514, 164.530). Every rule is scoped
//! to PHI-classified entries; non-PHI entries are compliant with the
//! whole framework by definition.

use crate::frameworks::engine::{Condition, Framework, Gate, RuleCheck};
use crate::frameworks::types::{ComplianceRule, RiskLevel};

/// Classification tokens that mark an entry as PHI-related
/// (substring match, case-insensitive).
const PHI_TOKENS: &[&str] = &[
    "PHI",
    "EPHI",
    "PROTECTED_HEALTH_INFORMATION",
    "HEALTH_DATA",
    "MEDICAL",
    "CLINICAL",
];

/// Build the HIPAA framework with all defined rules.
pub fn hipaa() -> Framework {
    Framework::new("HIPAA", "1996/2013", rules())
        .with_scope(Gate::any().and_classification_contains(PHI_TOKENS))
}

fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "HIPAA-164.312(a)",
            "Access Control",
            RiskLevel::Critical,
            "access_control",
        )
        .with_description(
            "Implement technical policies and procedures that allow access to \
             electronic protected health information only to those persons or software \
             programs that have been granted access rights, including unique user \
             identification, emergency access procedures, automatic logoff, and \
             encryption.",
        )
        .with_remediation(
            "Implement access controls including unique user IDs for all users \
             accessing ePHI, role-based access policies, automatic session timeouts, \
             emergency access procedures, and encryption for ePHI at rest.",
        )
        .with_references(&["45 CFR 164.312(a)(1)", "45 CFR 164.312(a)(2)(i-iv)"])
        .with_logic(
            RuleCheck::when(Gate::any())
                .require(
                    Condition::ActorKnown(&["anonymous"]),
                    "PHI access (type={event_type}) performed without unique user identification (actor={actor})",
                )
                .require(
                    Condition::MetaTrue("access_controlled"),
                    "PHI access (type={event_type}) without documented access control validation",
                )
                .require(
                    Condition::IfEvent(
                        &["data_access", "data_export", "inference"],
                        &Condition::MetaTrue("encryption_enabled"),
                    ),
                    "PHI data access (type={event_type}) without encryption enabled",
                ),
        ),
        ComplianceRule::new(
            "HIPAA-164.312(b)",
            "Audit Controls",
            RiskLevel::High,
            "audit",
        )
        .with_description(
            "Implement hardware, software, and/or procedural mechanisms that record \
             and examine activity in information systems that contain or use \
             electronic protected health information.",
        )
        .with_remediation(
            "Implement audit logging for all systems containing ePHI capturing user \
             identification, timestamp, type of access, data accessed, and \
             success/failure status, with retention policies and regular review.",
        )
        .with_references(&["45 CFR 164.312(b)"])
        .with_logic(
            RuleCheck::when(Gate::any())
                .require(
                    Condition::CoreFieldsPresent,
                    "PHI event missing required audit fields: {missing}",
                )
                .require(
                    // A persisted entry is presumed logged unless
                    // explicitly marked otherwise.
                    Condition::MetaTrueOr("audit_logged", true),
                    "PHI event (type={event_type}) without confirmation of audit logging",
                ),
        ),
        ComplianceRule::new(
            "HIPAA-164.312(c)",
            "Integrity Controls",
            RiskLevel::High,
            "integrity",
        )
        .with_description(
            "Implement policies and procedures to protect electronic protected health \
             information from improper alteration or destruction, with electronic \
             mechanisms to corroborate that ePHI has not been altered or destroyed in \
             an unauthorized manner.",
        )
        .with_remediation(
            "Implement integrity controls including checksums or digital signatures \
             for ePHI, change detection, version control for modifications, and \
             procedures for detecting unauthorized changes.",
        )
        .with_references(&["45 CFR 164.312(c)(1)", "45 CFR 164.312(c)(2)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "update",
                "modify",
                "write",
                "training",
                "data_transformation",
                "data_processing",
            ]))
            .require(
                Condition::MetaTrue("integrity_verified"),
                "PHI modification (type={event_type}) without integrity verification controls",
            ),
        ),
        ComplianceRule::new(
            "HIPAA-164.312(d)",
            "Person or Entity Authentication",
            RiskLevel::Critical,
            "authentication",
        )
        .with_description(
            "Implement procedures to verify that a person or entity seeking access to \
             electronic protected health information is the one claimed.",
        )
        .with_remediation(
            "Implement strong authentication for all ePHI access, with multi-factor \
             authentication for high-risk access and password policies meeting \
             industry standards.",
        )
        .with_references(&["45 CFR 164.312(d)"])
        .with_logic(
            RuleCheck::when(Gate::any())
                .require(
                    Condition::ActorKnown(&["anonymous"]),
                    "PHI access (type={event_type}) without authenticated user identification",
                )
                .require(
                    Condition::MetaTrue("authenticated"),
                    "PHI access (type={event_type}) without documented authentication verification",
                )
                .require(
                    Condition::IfEvent(
                        &["data_export", "bulk_access", "admin_access"],
                        &Condition::MetaTrue("mfa_verified"),
                    ),
                    "High-risk PHI operation (type={event_type}) without multi-factor authentication",
                ),
        ),
        ComplianceRule::new(
            "HIPAA-164.312(e)",
            "Transmission Security",
            RiskLevel::High,
            "transmission",
        )
        .with_description(
            "Implement technical security measures to guard against unauthorized \
             access to electronic protected health information that is being \
             transmitted over an electronic communications network.",
        )
        .with_remediation(
            "Encrypt all ePHI transmitted over networks (TLS 1.2+ recommended), use \
             secure transfer protocols, and verify integrity of transmitted data.",
        )
        .with_references(&["45 CFR 164.312(e)(1)", "45 CFR 164.312(e)(2)(i-ii)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_transfer",
                "data_export",
                "api_call",
                "external_integration",
                "inference",
            ]))
            .require(
                Condition::MetaTrue("transmission_encrypted"),
                "PHI transmission (type={event_type}) without documented encryption",
            )
            .require(
                Condition::ValueNotIn("protocol", &["http", "ftp", "telnet"]),
                "PHI transmission (type={event_type}) using insecure protocol ({value})",
            ),
        ),
        ComplianceRule::new(
            "HIPAA-164.502",
            "Uses and Disclosures",
            RiskLevel::Critical,
            "privacy",
        )
        .with_description(
            "A covered entity or business associate may not use or disclose protected \
             health information except as permitted or required. The minimum necessary \
             standard requires limiting PHI use, disclosure, and requests to the \
             minimum necessary to accomplish the intended purpose.",
        )
        .with_remediation(
            "Implement minimum necessary controls for PHI access, document the purpose \
             of each access, limit data exposure to what the use case requires, and \
             maintain records of all disclosures.",
        )
        .with_references(&["45 CFR 164.502", "45 CFR 164.514(d)"])
        .with_logic(
            RuleCheck::when(Gate::any())
                .require(
                    Condition::MetaTrue("purpose_documented"),
                    "PHI use (type={event_type}) without documented purpose for access",
                )
                .require(
                    Condition::MetaTrue("minimum_necessary_applied"),
                    "PHI use (type={event_type}) without minimum necessary standard applied",
                )
                .require(
                    Condition::IfEvent(
                        &["data_export", "data_share", "external_integration"],
                        &Condition::MetaTrue("disclosure_authorized"),
                    ),
                    "PHI disclosure (type={event_type}) without documented authorization",
                ),
        ),
        ComplianceRule::new(
            "HIPAA-164.514",
            "De-identification Standards",
            RiskLevel::High,
            "privacy",
        )
        .with_description(
            "Health information that does not identify an individual, and with no \
             reasonable basis to believe it can be used to identify an individual, is \
             not individually identifiable health information. De-identification may \
             be achieved through expert determination or safe harbor methods.",
        )
        .with_remediation(
            "When using health data for AI training or analytics, de-identify \
             following HIPAA Safe Harbor (remove 18 identifiers) or Expert \
             Determination, and record de-identification status for all datasets.",
        )
        .with_references(&["45 CFR 164.514(a)", "45 CFR 164.514(b)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "training",
                "analytics",
                "research",
                "data_aggregation",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("deidentified"),
                    Condition::MetaTrue("deidentification_exception_documented"),
                ]),
                "PHI used for {event_type} without de-identification or documented exception",
            ),
        ),
        ComplianceRule::new(
            "HIPAA-164.530",
            "Administrative Requirements",
            RiskLevel::Medium,
            "privacy",
        )
        .with_description(
            "A covered entity must maintain its privacy policies and procedures, \
             privacy practices notices, and other required documentation until six \
             years after the later of their creation or last effective date.",
        )
        .with_remediation(
            "Maintain documentation of privacy policies and practices for AI systems \
             processing PHI, retained at least six years, with procedures for \
             responding to individual rights requests.",
        )
        .with_references(&["45 CFR 164.530(j)"])
        .with_logic(RuleCheck::when(Gate::any()).require(
            Condition::AnyOf(&[Condition::DocRef, Condition::MetaTrue("policy_compliant")]),
            "PHI operation (type={event_type}) without reference to privacy policies or documented compliance",
        )),
    ]
}
