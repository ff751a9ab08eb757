//! EU AI Act (Regulation (EU) 2024/1689) rule table.
//!
//! Focuses on high-risk system obligations: human oversight,
//! transparency, risk management, documentation, and security.

use crate::frameworks::engine::{Condition, Framework, Gate, RuleCheck};
use crate::frameworks::types::{ComplianceRule, RiskLevel};

const HIGH_RISK: &[RiskLevel] = &[RiskLevel::High, RiskLevel::Critical];

/// Build the EU AI Act framework with all defined rules.
pub fn eu_ai_act() -> Framework {
    Framework::new("EU AI Act", "2024", rules())
}

fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "EUAI-001",
            "Human Oversight Documentation",
            RiskLevel::High,
            "oversight",
        )
        .with_description(
            "High-risk AI systems shall be designed so that they can be effectively \
             overseen by natural persons during the period in which they are in use. \
             (Article 14)",
        )
        .with_remediation(
            "Ensure human oversight mechanisms are in place and documented. Implement \
             'human-in-the-loop', 'human-on-the-loop', or 'human-in-command' approaches \
             as appropriate for the risk level.",
        )
        .with_references(&["EU AI Act Article 14", "Annex IV point 3"])
        .with_logic(RuleCheck::when(Gate::risk(HIGH_RISK)).require(
            Condition::Oversight,
            "High-risk operation (level={risk_level}) performed without documented human oversight",
        )),
        ComplianceRule::new(
            "EUAI-002",
            "Transparency - AI Interaction Notification",
            RiskLevel::High,
            "transparency",
        )
        .with_description(
            "AI systems intended to interact directly with natural persons must inform \
             those persons that they are interacting with an AI system, unless obvious \
             from the context of use. (Article 50)",
        )
        .with_remediation(
            "Implement clear notification mechanisms to inform users when they are \
             interacting with an AI system, provided before or at the start of the \
             interaction.",
        )
        .with_references(&["EU AI Act Article 50(1)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "chat",
                "completion",
                "interaction",
                "response",
            ]))
            .require(
                Condition::Notified,
                "User-facing AI interaction (type={event_type}) performed without notifying user of AI involvement",
            ),
        ),
        ComplianceRule::new(
            "EUAI-003",
            "Risk Assessment for High-Risk Systems",
            RiskLevel::Critical,
            "risk_management",
        )
        .with_description(
            "High-risk AI systems shall be subject to a risk management system run \
             throughout the entire lifecycle, including identification, estimation, \
             and evaluation of risks. (Article 9)",
        )
        .with_remediation(
            "Implement a risk management system that identifies, analyzes, estimates, \
             and evaluates risks throughout the AI system's lifecycle. Document all \
             risk assessments and mitigation measures.",
        )
        .with_references(&["EU AI Act Article 9", "Annex IV point 2"])
        .with_logic(RuleCheck::when(Gate::risk(HIGH_RISK)).require(
            Condition::MetaTrue("risk_assessment_documented"),
            "High-risk operation (level={risk_level}) performed without documented risk assessment",
        )),
        ComplianceRule::new(
            "EUAI-004",
            "Technical Documentation Maintenance",
            RiskLevel::High,
            "documentation",
        )
        .with_description(
            "The technical documentation of a high-risk AI system shall be drawn up \
             before the system is placed on the market and kept up to date, containing \
             at minimum the elements set out in Annex IV. (Article 11)",
        )
        .with_remediation(
            "Maintain technical documentation covering general description, detailed \
             description of elements, development process, monitoring information, and \
             human oversight measures.",
        )
        .with_references(&["EU AI Act Article 11", "Annex IV"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "deployment",
                "training",
                "fine_tuning",
                "model_update",
            ]))
            .require(
                Condition::DocRef,
                "Significant operation (type={event_type}) performed without reference to technical documentation",
            ),
        ),
        ComplianceRule::new(
            "EUAI-005",
            "Data Governance - Training Data Documentation",
            RiskLevel::High,
            "documentation",
        )
        .with_description(
            "High-risk AI systems trained with data shall be developed from training, \
             validation and testing data sets that meet quality criteria, with data \
             collection, preparation, and assumptions documented. (Article 10)",
        )
        .with_remediation(
            "Document all training, validation, and testing datasets including \
             collection processes, preparation operations, relevant assumptions, and \
             examination of possible biases.",
        )
        .with_references(&["EU AI Act Article 10", "Annex IV point 2(d)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "training",
                "fine_tuning",
                "data_preparation",
                "data_ingestion",
            ]))
            .require(
                Condition::MetaTrue("data_governance_documented"),
                "Training operation (type={event_type}) performed without documented data governance",
            ),
        ),
        ComplianceRule::new(
            "EUAI-006",
            "Robustness - Error Handling",
            RiskLevel::Medium,
            "risk_management",
        )
        .with_description(
            "High-risk AI systems shall achieve an appropriate level of robustness and \
             handle errors or inconsistencies during all lifecycle phases. (Article 15)",
        )
        .with_remediation(
            "Implement robust error handling including graceful degradation, fallback \
             procedures, and appropriate logging.",
        )
        .with_references(&["EU AI Act Article 15(1)(2)"])
        .with_logic(RuleCheck::when(Gate::any()).require(
            Condition::ErrorHandled,
            "Operation (type={event_type}) indicates error was not handled gracefully",
        )),
        ComplianceRule::new(
            "EUAI-007",
            "Accuracy Monitoring",
            RiskLevel::Medium,
            "risk_management",
        )
        .with_description(
            "High-risk AI systems shall achieve an appropriate level of accuracy, with \
             accuracy levels specified in the instructions of use and monitored \
             throughout the system's lifecycle. (Article 15)",
        )
        .with_remediation(
            "Implement accuracy monitoring that tracks system performance over time. \
             Document accuracy metrics and establish thresholds for acceptable accuracy.",
        )
        .with_references(&["EU AI Act Article 15(1)", "Annex IV point 2(g)"])
        .with_logic(
            RuleCheck::when(Gate::events(&["inference", "prediction", "completion"])).require(
                Condition::MetaTrue("accuracy_monitored"),
                "Inference operation (type={event_type}) performed without accuracy monitoring",
            ),
        ),
        ComplianceRule::new(
            "EUAI-008",
            "Cybersecurity Measures",
            RiskLevel::High,
            "security",
        )
        .with_description(
            "High-risk AI systems shall achieve an appropriate level of cybersecurity \
             and be resilient against attempts by unauthorized third parties to alter \
             their use, outputs or performance. (Article 15)",
        )
        .with_remediation(
            "Implement cybersecurity measures including access controls, input \
             validation, adversarial robustness testing, and regular security \
             assessments.",
        )
        .with_references(&["EU AI Act Article 15(4)(5)"])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "data_access",
                "model_access",
                "api_call",
                "authentication",
                "data_export",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("security_validated"),
                    Condition::MetaTrue("access_controlled"),
                ]),
                "Security-relevant operation (type={event_type}) performed without documented cybersecurity validation",
            ),
        ),
    ]
}
