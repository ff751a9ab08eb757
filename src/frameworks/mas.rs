//! MAS FEAT (Monetary Authority of Singapore, 2022) rule table.
//!
//! Covers the FEAT principles (Fairness, Ethics, Accountability,
//! Transparency) for AI adoption in Singapore's financial sector, plus
//! the MAS model risk management, data governance, and technology risk
//! management guidelines relevant to AI systems. Intended for financial
//! institutions regulated by MAS.

use crate::frameworks::engine::{Condition, Framework, Gate, RuleCheck};
use crate::frameworks::types::{ComplianceRule, RiskLevel};

const HIGH_RISK: &[RiskLevel] = &[RiskLevel::High, RiskLevel::Critical];

const DEPLOYMENT_EVENTS: &[&str] = &[
    "deployment",
    "model_release",
    "go_live",
    "production_release",
];

/// Build the MAS FEAT framework with all defined rules.
pub fn mas_feat() -> Framework {
    Framework::new("MAS FEAT", "2022", rules())
}

fn rules() -> Vec<ComplianceRule> {
    vec![
        // FEAT fairness.
        ComplianceRule::new(
            "MAS-FEAT-F1",
            "Fair AI-Driven Decisions",
            RiskLevel::High,
            "fairness",
        )
        .with_description(
            "Financial institutions should ensure that AI-driven decisions are \
             fair and do not systematically disadvantage individuals or groups. \
             AI systems used in customer-facing decisions (credit scoring, \
             insurance underwriting, fraud detection) must be designed to avoid \
             unfair discrimination based on protected attributes, except where \
             such attributes are legitimate risk factors permitted by law.",
        )
        .with_remediation(
            "Implement fairness testing procedures that evaluate AI outcomes \
             across different demographic groups. Document fairness metrics and \
             thresholds, conduct regular fairness audits, and establish \
             governance processes for reviewing fairness concerns.",
        )
        .with_references(&[
            "MAS FEAT Principles - Fairness",
            "MAS Information Paper on FEAT (2018)",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "credit_decision",
                "underwriting",
                "pricing",
                "fraud_detection",
                "risk_assessment",
                "loan_approval",
                "insurance_decision",
                "customer_scoring",
                "eligibility_check",
            ]))
            .require(
                Condition::MetaTrue("fairness_assessed"),
                "Customer-impacting AI decision (type={event_type}) performed without documented fairness assessment",
            ),
        ),
        ComplianceRule::new(
            "MAS-FEAT-F2",
            "Bias Detection and Mitigation",
            RiskLevel::High,
            "fairness",
        )
        .with_description(
            "Financial institutions must implement measures to detect and \
             mitigate biases in AI systems throughout the model lifecycle, \
             including bias detection during model development, ongoing \
             monitoring for emergent biases, and corrective actions when biases \
             are identified.",
        )
        .with_remediation(
            "Establish bias detection processes including statistical analysis \
             of training data and model outputs. Implement bias monitoring that \
             tracks fairness metrics over time, and maintain records of \
             debiasing actions taken.",
        )
        .with_references(&[
            "MAS FEAT Principles - Fairness",
            "MAS Veritas Framework for Responsible AI",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "training",
                "fine_tuning",
                "deployment",
                "model_update",
                "model_release",
                "model_promotion",
            ]))
            .require(
                Condition::MetaTrue("bias_mitigation_documented"),
                "Model lifecycle event (type={event_type}) performed without documented bias detection and mitigation measures",
            ),
        ),
        // FEAT ethics.
        ComplianceRule::new(
            "MAS-FEAT-E1",
            "Ethical Use of Data and AI",
            RiskLevel::High,
            "ethics",
        )
        .with_description(
            "Financial institutions must ensure that data and AI are used in an \
             ethical manner, respecting customer privacy, data protection \
             requirements, and legitimate customer expectations. AI systems \
             should not be used in ways that manipulate, deceive, or exploit \
             customers.",
        )
        .with_remediation(
            "Establish an AI ethics review process for new AI use cases. \
             Document ethical considerations in AI system design documents, \
             implement data usage policies ensuring ethical data practices, and \
             review alternative data sources for ethical implications.",
        )
        .with_references(&[
            "MAS FEAT Principles - Ethics",
            "MAS Personal Data Protection Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_ingestion",
                "data_processing",
                "feature_engineering",
                "training",
                "data_access",
                "data_export",
            ]))
            .require(
                Condition::MetaTrue("ethics_reviewed"),
                "Data/AI operation (type={event_type}) performed without documented ethical review",
            ),
        ),
        ComplianceRule::new(
            "MAS-FEAT-E2",
            "AI Alignment with Firm's Ethical Standards",
            RiskLevel::Medium,
            "ethics",
        )
        .with_description(
            "AI systems must be developed and operated in alignment with the \
             financial institution's ethical standards, corporate values, and \
             professional codes of conduct. The use of AI should support the \
             institution's commitment to treating customers fairly and \
             maintaining market integrity.",
        )
        .with_remediation(
            "Document how AI systems align with the firm's ethical standards \
             and corporate values. Include ethics compliance as part of AI \
             system design reviews and establish escalation procedures for \
             ethical concerns.",
        )
        .with_references(&[
            "MAS FEAT Principles - Ethics",
            "MAS Guidelines on Fair Dealing",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(DEPLOYMENT_EVENTS)).require(
                Condition::MetaTrue("ethics_aligned"),
                "AI deployment (type={event_type}) performed without documented alignment with firm's ethical standards",
            ),
        ),
        // FEAT accountability.
        ComplianceRule::new(
            "MAS-FEAT-A1",
            "Clear Accountability for AI Decisions",
            RiskLevel::High,
            "accountability",
        )
        .with_description(
            "Financial institutions must establish clear accountability \
             structures for AI-driven decisions, including identifying \
             individuals or committees responsible for AI system outcomes and \
             maintaining documentation of decision-making authority. Senior \
             management must be accountable for material AI systems.",
        )
        .with_remediation(
            "Define and document clear ownership and accountability for each AI \
             system, including business owners, model owners, and technical \
             owners. Establish AI governance committees with senior management \
             representation and ensure accountability is traceable in audit logs.",
        )
        .with_references(&[
            "MAS FEAT Principles - Accountability",
            "MAS Guidelines on Individual Accountability and Conduct",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "prediction",
                "decision",
                "credit_decision",
                "underwriting",
                "fraud_detection",
                "risk_assessment",
                "deployment",
                "model_update",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaNonEmpty("accountable_owner"),
                    Condition::MetaTrue("accountability_documented"),
                ]),
                "Material AI operation (type={event_type}) performed without documented accountability structure",
            ),
        ),
        ComplianceRule::new(
            "MAS-FEAT-A2",
            "Human Oversight for Material AI Decisions",
            RiskLevel::Critical,
            "accountability",
        )
        .with_description(
            "Material AI-driven decisions must include appropriate human \
             oversight. Financial institutions should implement human-in-the-loop \
             or human-on-the-loop mechanisms for AI systems that significantly \
             impact customers or business operations, with the ability to \
             intervene, override, or stop AI system operations when necessary.",
        )
        .with_remediation(
            "Implement human oversight mechanisms appropriate to the risk level \
             of AI decisions. Define criteria for when human review is \
             mandatory, provide tools for humans to review and override AI \
             decisions, and document oversight procedures.",
        )
        .with_references(&[
            "MAS FEAT Principles - Accountability",
            "MAS Model Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::risk(HIGH_RISK)).require(
                Condition::Oversight,
                "Material AI operation (level={risk_level}, type={event_type}) performed without human oversight",
            ),
        ),
        // FEAT transparency.
        ComplianceRule::new(
            "MAS-FEAT-T1",
            "Explainable AI Decisions",
            RiskLevel::High,
            "transparency",
        )
        .with_description(
            "Financial institutions should ensure that AI-driven decisions can \
             be explained in a manner appropriate to the context and audience. \
             Explanations should be provided for material decisions affecting \
             customers, with the level of explainability proportionate to the \
             significance of the decision.",
        )
        .with_remediation(
            "Implement explainability mechanisms appropriate to each AI use \
             case. Use interpretable models where possible, or implement \
             post-hoc explanation techniques for complex models, and maintain \
             explanation logs for audit purposes.",
        )
        .with_references(&[
            "MAS FEAT Principles - Transparency",
            "MAS Information Paper on Responsible AI in Finance",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "prediction",
                "decision",
                "credit_decision",
                "underwriting",
                "pricing",
                "fraud_detection",
                "risk_assessment",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("explanation_available"),
                    Condition::MetaNonEmpty("explainability_method"),
                ]),
                "AI decision (type={event_type}) performed without explainability mechanism documented",
            ),
        ),
        ComplianceRule::new(
            "MAS-FEAT-T2",
            "Customer Notification of AI Use",
            RiskLevel::High,
            "transparency",
        )
        .with_description(
            "Customers should be informed when AI is used to make or \
             significantly influence decisions that affect them. Financial \
             institutions should communicate the role of AI in decision-making, \
             the types of data used, and how customers can seek recourse or \
             human review of AI-driven decisions.",
        )
        .with_remediation(
            "Implement clear notification mechanisms to inform customers when \
             AI is involved in decisions affecting them. Include AI disclosure \
             in customer communications, establish processes for customers to \
             request human review, and maintain records of notifications.",
        )
        .with_references(&[
            "MAS FEAT Principles - Transparency",
            "MAS Guidelines on Fair Dealing",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "inference",
                "chat",
                "interaction",
                "response",
                "recommendation",
                "credit_decision",
                "underwriting",
                "customer_service",
            ]))
            .require(
                Condition::Notified,
                "Customer-facing AI operation (type={event_type}) performed without notifying customer of AI involvement",
            ),
        ),
        // Model risk management.
        ComplianceRule::new(
            "MAS-MRM-1",
            "Model Development Standards",
            RiskLevel::High,
            "model_risk",
        )
        .with_description(
            "Financial institutions must establish robust standards for AI/ML \
             model development, including documented development methodologies, \
             data quality requirements, feature engineering standards, model \
             selection criteria, and performance benchmarks.",
        )
        .with_remediation(
            "Establish and document model development standards and \
             methodologies. Implement version control for models and code, and \
             document model assumptions, limitations, and intended use cases.",
        )
        .with_references(&[
            "MAS Model Risk Management Guidelines",
            "MAS Technology Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "training",
                "fine_tuning",
                "model_development",
                "feature_engineering",
                "model_selection",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("development_standards_followed"),
                    Condition::DocRef,
                ]),
                "Model development activity (type={event_type}) performed without reference to development standards documentation",
            ),
        ),
        ComplianceRule::new(
            "MAS-MRM-2",
            "Model Validation Requirements",
            RiskLevel::High,
            "model_risk",
        )
        .with_description(
            "All material AI/ML models must undergo independent validation \
             before deployment and periodically thereafter. Validation should \
             assess model conceptual soundness, data quality, model performance, \
             and outcome analysis, by a function independent of model development.",
        )
        .with_remediation(
            "Establish an independent model validation function. Define \
             validation scope, methodology, and frequency based on model \
             materiality, document validation findings, and maintain validation \
             records.",
        )
        .with_references(&[
            "MAS Model Risk Management Guidelines",
            "MAS Supervisory Expectations on Model Risk",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(DEPLOYMENT_EVENTS)).require(
                Condition::MetaTrue("validation_completed"),
                "Model deployment (type={event_type}) performed without documented model validation",
            ),
        ),
        ComplianceRule::new(
            "MAS-MRM-3",
            "Model Monitoring and Review",
            RiskLevel::High,
            "model_risk",
        )
        .with_description(
            "Financial institutions must implement ongoing monitoring of AI/ML \
             models to detect performance degradation, data drift, concept \
             drift, and unexpected behaviors. Models should be subject to \
             periodic review and revalidation.",
        )
        .with_remediation(
            "Implement model monitoring frameworks that track performance \
             metrics, input data distributions, and output patterns. Define \
             alert thresholds and escalation procedures, and establish periodic \
             review schedules based on model materiality.",
        )
        .with_references(&[
            "MAS Model Risk Management Guidelines",
            "MAS Technology Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&["inference", "prediction", "scoring", "decision"]))
                .require(
                    Condition::AnyOf(&[
                        Condition::MetaTrue("monitoring_enabled"),
                        Condition::MetaTrue("performance_tracked"),
                    ]),
                    "Model inference (type={event_type}) performed without documented monitoring configuration",
                ),
        ),
        ComplianceRule::new(
            "MAS-MRM-4",
            "Model Inventory Maintained",
            RiskLevel::Medium,
            "model_risk",
        )
        .with_description(
            "Financial institutions must maintain a comprehensive inventory of \
             all AI/ML models in use, including model metadata, risk \
             classifications, ownership information, validation status, and \
             deployment details.",
        )
        .with_remediation(
            "Establish and maintain a centralized model inventory with \
             essential metadata such as model purpose, risk tier, owner, and \
             validation status. Implement processes to keep the inventory up to \
             date.",
        )
        .with_references(&[
            "MAS Model Risk Management Guidelines",
            "MAS Technology Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "deployment",
                "inference",
                "training",
                "model_update",
                "model_release",
                "model_retirement",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaNonEmpty("model_inventory_id"),
                    Condition::MetaTrue("model_registered"),
                ]),
                "Model operation (type={event_type}) performed without reference to model inventory",
            ),
        ),
        // Data governance.
        ComplianceRule::new(
            "MAS-DATA-1",
            "Data Quality Standards",
            RiskLevel::High,
            "data_governance",
        )
        .with_description(
            "Financial institutions must establish and maintain data quality \
             standards for AI systems. Data used in AI/ML models should be \
             accurate, complete, consistent, timely, and relevant, with data \
             quality assessed and documented.",
        )
        .with_remediation(
            "Define data quality standards and metrics for AI use cases. \
             Implement data quality checks and validation procedures, document \
             assessments and remediation actions, and ensure issues are \
             escalated and resolved promptly.",
        )
        .with_references(&[
            "MAS Data Management Guidelines",
            "MAS Technology Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_ingestion",
                "data_processing",
                "training",
                "fine_tuning",
                "feature_engineering",
                "data_preparation",
            ]))
            .require(
                Condition::MetaTrue("data_quality_validated"),
                "Data operation (type={event_type}) performed without documented data quality validation",
            ),
        ),
        ComplianceRule::new(
            "MAS-DATA-2",
            "Data Lineage Documentation",
            RiskLevel::Medium,
            "data_governance",
        )
        .with_description(
            "Financial institutions must maintain documentation of data lineage \
             for AI systems, tracking data sources, transformations, \
             aggregations, and dependencies throughout the data pipeline. Data \
             lineage supports auditability, debugging, and impact analysis.",
        )
        .with_remediation(
            "Implement data lineage tracking for AI data pipelines. Document \
             data sources, transformations, and dependencies, and ensure \
             lineage is available for audit and investigation purposes.",
        )
        .with_references(&[
            "MAS Data Management Guidelines",
            "MAS Technology Risk Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "data_processing",
                "feature_engineering",
                "data_transformation",
                "data_aggregation",
                "data_preparation",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("lineage_documented"),
                    Condition::MetaNonEmpty("data_lineage_id"),
                ]),
                "Data transformation (type={event_type}) performed without documented data lineage",
            ),
        ),
        ComplianceRule::new(
            "MAS-DATA-3",
            "Data Privacy Compliance",
            RiskLevel::Critical,
            "data_governance",
        )
        .with_description(
            "AI systems must comply with data privacy requirements including \
             Singapore's Personal Data Protection Act (PDPA) and MAS-specific \
             data protection requirements, including obtaining appropriate \
             consent, limiting data use to stated purposes, implementing data \
             minimization, and ensuring secure data handling.",
        )
        .with_remediation(
            "Ensure AI systems comply with PDPA and MAS data protection \
             requirements. Implement appropriate consent mechanisms, apply data \
             minimization principles, implement access controls and encryption \
             for personal data, and conduct privacy impact assessments for AI \
             use cases involving personal data.",
        )
        .with_references(&[
            "Singapore Personal Data Protection Act (PDPA)",
            "MAS Guidelines on Fair Dealing",
            "MAS Data Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::classifications(&[
                "pii",
                "personal",
                "customer_data",
                "sensitive",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("privacy_compliant"),
                    Condition::MetaTrue("consent_obtained"),
                ]),
                "Operation involving personal data (classification={classification}) performed without documented privacy compliance",
            ),
        ),
        // Operational resilience.
        ComplianceRule::new(
            "MAS-OPS-1",
            "AI System Resilience",
            RiskLevel::High,
            "operations",
        )
        .with_description(
            "AI systems must be designed and operated with appropriate \
             resilience measures to ensure continued availability and \
             performance, including redundancy, failover mechanisms, capacity \
             management, and graceful degradation capabilities.",
        )
        .with_remediation(
            "Design AI systems with appropriate redundancy and failover \
             capabilities. Implement input validation and anomaly detection, \
             test system resilience through stress testing, and define graceful \
             degradation strategies.",
        )
        .with_references(&[
            "MAS Technology Risk Management Guidelines",
            "MAS Business Continuity Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::any()).require(
                Condition::ErrorHandled,
                "AI operation (type={event_type}) indicates error was not handled gracefully, suggesting resilience gap",
            ),
        ),
        ComplianceRule::new(
            "MAS-OPS-2",
            "Incident Management for AI Failures",
            RiskLevel::High,
            "operations",
        )
        .with_description(
            "Financial institutions must have incident management procedures \
             specifically addressing AI system failures, including detection \
             mechanisms, escalation procedures, impact assessment, root cause \
             analysis, and communication protocols. AI-related incidents should \
             be reported to MAS where required.",
        )
        .with_remediation(
            "Establish incident management procedures for AI systems. Define \
             AI-specific incident categories and severity classifications, \
             implement monitoring and alerting for failures, and conduct \
             post-incident reviews.",
        )
        .with_references(&[
            "MAS Technology Risk Management Guidelines",
            "MAS Notice on Cyber Hygiene",
            "MAS Incident Reporting Requirements",
        ])
        .with_logic(
            RuleCheck::when(Gate::events(&[
                "error",
                "failure",
                "exception",
                "timeout",
                "degradation",
            ]))
            .require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("incident_logged"),
                    Condition::MetaNonEmpty("incident_id"),
                ]),
                "AI error event (type={event_type}) occurred without documented incident management response",
            ),
        ),
        ComplianceRule::new(
            "MAS-OPS-3",
            "Business Continuity for AI Systems",
            RiskLevel::Medium,
            "operations",
        )
        .with_description(
            "Financial institutions must include AI systems in their business \
             continuity planning, identifying critical AI dependencies, \
             establishing recovery procedures, defining backup and fallback \
             options, and testing continuity plans for scenarios where AI \
             systems are unavailable.",
        )
        .with_remediation(
            "Include AI systems in business continuity planning and testing. \
             Define fallback procedures for AI system unavailability such as \
             manual processing or simplified models, and document recovery time \
             and recovery point objectives for AI systems.",
        )
        .with_references(&[
            "MAS Technology Risk Management Guidelines",
            "MAS Business Continuity Management Guidelines",
        ])
        .with_logic(
            RuleCheck::when(Gate::risk(&[RiskLevel::Critical])).require(
                Condition::AnyOf(&[
                    Condition::MetaTrue("bcp_documented"),
                    Condition::MetaTrue("fallback_available"),
                ]),
                "Critical AI operation (type={event_type}) performed without documented business continuity provisions",
            ),
        ),
    ]
}
