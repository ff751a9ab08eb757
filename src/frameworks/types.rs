//! Data model for compliance evaluation.
//!
//! These types are created fresh per evaluation call and never mutated
//! afterwards. The rule engine holds no state beyond the immutable rule
//! list built at framework construction time.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{ComplianceError, ComplianceResult};
use crate::frameworks::engine::RuleCheck;

/// Severity / risk level with a fixed total order:
/// info < low < medium < high < critical.
///
/// All threshold comparisons go through [`RiskLevel::rank`]; never
/// compare the string forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Rank in the fixed total order (info=0 .. critical=4).
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Info => 0,
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }

    /// Lowercase canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Info => "info",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Parse a severity name case-insensitively.
    ///
    /// Rejects unknown names so that misconfigured profiles fail at
    /// construction time rather than at check time.
    pub fn parse(name: &str) -> ComplianceResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(RiskLevel::Info),
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(ComplianceError::validation_field(
                format!("unknown risk level: {other}"),
                "risk_level",
            )),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for RiskLevel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// One evaluated event: an immutable record of a single AI interaction
/// with its compliance-relevant attributes.
///
/// `metadata` is the extensibility point: rules read arbitrary string
/// keys and treat an absent key as `false` (missing evidence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Stable identifier, used as the report join key
    pub entry_id: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Event kind, matched case-insensitively (e.g. "inference")
    pub event_type: String,
    /// Identity that triggered the event; empty or "anonymous" is
    /// treated as unauthenticated
    pub actor: String,
    /// Description of the action taken
    pub action: String,
    /// Resource accessed or modified
    #[serde(default)]
    pub resource: String,
    /// Assessed risk level of this operation
    #[serde(default = "AuditEntry::default_risk_level")]
    pub risk_level: RiskLevel,
    /// Identifier of the AI system involved
    #[serde(default)]
    pub system_id: String,
    /// Data classification (e.g. "PII", "PHI", "unclassified"),
    /// matched case-insensitively
    #[serde(default = "AuditEntry::default_classification")]
    pub data_classification: String,
    /// Whether the user was notified of AI involvement
    #[serde(default)]
    pub user_notified: bool,
    /// Whether human oversight was present
    #[serde(default)]
    pub human_oversight: bool,
    /// Whether errors were handled gracefully
    #[serde(default = "AuditEntry::default_true")]
    pub error_handled: bool,
    /// Reference to related technical documentation
    #[serde(default)]
    pub documentation_ref: Option<String>,
    /// Open evidence bag read by rules via string keys
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl AuditEntry {
    fn default_risk_level() -> RiskLevel {
        RiskLevel::Low
    }

    fn default_classification() -> String {
        "unclassified".to_string()
    }

    fn default_true() -> bool {
        true
    }

    /// Create an entry with required fields; remaining fields take
    /// their documented defaults.
    pub fn new(
        entry_id: impl Into<String>,
        event_type: impl Into<String>,
        actor: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            timestamp: Utc::now(),
            event_type: event_type.into(),
            actor: actor.into(),
            action: action.into(),
            resource: String::new(),
            risk_level: RiskLevel::Low,
            system_id: String::new(),
            data_classification: Self::default_classification(),
            user_notified: false,
            human_oversight: false,
            error_handled: true,
            documentation_ref: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the event timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the risk level.
    pub fn with_risk_level(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }

    /// Set the resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set the system identifier.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = system_id.into();
        self
    }

    /// Set the data classification.
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.data_classification = classification.into();
        self
    }

    /// Set the user-notified flag.
    pub fn with_user_notified(mut self, notified: bool) -> Self {
        self.user_notified = notified;
        self
    }

    /// Set the human-oversight flag.
    pub fn with_human_oversight(mut self, oversight: bool) -> Self {
        self.human_oversight = oversight;
        self
    }

    /// Set the error-handled flag.
    pub fn with_error_handled(mut self, handled: bool) -> Self {
        self.error_handled = handled;
        self
    }

    /// Set the documentation reference.
    pub fn with_documentation_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.documentation_ref = Some(doc_ref.into());
        self
    }

    /// Insert a metadata value.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Read a metadata key as a boolean; absent or non-boolean values
    /// fall back to `default`.
    pub fn metadata_bool(&self, key: &str, default: bool) -> bool {
        match self.metadata.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(_) => default,
            None => default,
        }
    }

    /// Read a metadata key as a string, if present and string-valued.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

/// Static, framework-defined compliance rule. Never mutated at runtime.
pub struct ComplianceRule {
    /// Identifier, unique within a framework
    pub rule_id: String,
    /// Human-readable name
    pub name: String,
    /// What the rule requires
    pub description: String,
    /// Severity assigned to violations of this rule
    pub severity: RiskLevel,
    /// Free-form category (e.g. "transparency", "security")
    pub category: String,
    /// Suggested remediation steps
    pub remediation: String,
    /// Regulatory references backing this rule
    pub references: Vec<String>,
    /// Custom predicate overriding the declarative logic;
    /// `true` means compliant
    pub check_fn: Option<fn(&AuditEntry) -> bool>,
    /// Declarative applicability gate + evidence requirements
    pub logic: Option<RuleCheck>,
}

impl ComplianceRule {
    /// Create a rule with the required identity fields.
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        severity: RiskLevel,
        category: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            name: name.into(),
            description: String::new(),
            severity,
            category: category.into(),
            remediation: String::new(),
            references: Vec::new(),
            check_fn: None,
            logic: None,
        }
    }

    /// Set the description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the remediation text.
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    /// Set the regulatory references.
    pub fn with_references(mut self, references: &[&str]) -> Self {
        self.references = references.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Set a custom predicate, overriding any declarative logic.
    pub fn with_check_fn(mut self, check_fn: fn(&AuditEntry) -> bool) -> Self {
        self.check_fn = Some(check_fn);
        self
    }

    /// Set the declarative check record.
    pub fn with_logic(mut self, logic: RuleCheck) -> Self {
        self.logic = Some(logic);
        self
    }
}

impl fmt::Debug for ComplianceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceRule")
            .field("rule_id", &self.rule_id)
            .field("name", &self.name)
            .field("severity", &self.severity)
            .field("category", &self.category)
            .field("has_check_fn", &self.check_fn.is_some())
            .field("has_logic", &self.logic.is_some())
            .finish()
    }
}

/// Evaluation configuration: which rules apply and at what threshold.
/// Not mutated during a check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceProfile {
    pub profile_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Framework names to evaluate against
    #[serde(default)]
    pub enabled_frameworks: Vec<String>,
    /// If non-empty, only rules in these categories are evaluated
    #[serde(default)]
    pub enabled_categories: Vec<String>,
    /// Rule ids always skipped
    #[serde(default)]
    pub excluded_rules: Vec<String>,
    /// Rules strictly below this severity are skipped
    #[serde(default = "ComplianceProfile::default_min_severity")]
    pub min_severity: RiskLevel,
    /// Classification of the AI system under evaluation (informational)
    #[serde(default = "ComplianceProfile::default_system_classification")]
    pub system_classification: String,
    /// Additional custom rule ids (informational)
    #[serde(default)]
    pub custom_rules: Vec<String>,
    /// Free-form profile configuration (informational)
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ComplianceProfile {
    fn default_min_severity() -> RiskLevel {
        RiskLevel::Low
    }

    fn default_system_classification() -> String {
        "standard".to_string()
    }

    /// Create a profile that evaluates everything at the default
    /// `low` severity floor.
    pub fn new(profile_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            name: name.into(),
            description: String::new(),
            enabled_frameworks: Vec::new(),
            enabled_categories: Vec::new(),
            excluded_rules: Vec::new(),
            min_severity: RiskLevel::Low,
            system_classification: Self::default_system_classification(),
            custom_rules: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict evaluation to the given frameworks.
    pub fn with_frameworks(mut self, frameworks: &[&str]) -> Self {
        self.enabled_frameworks = frameworks.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Restrict evaluation to the given categories.
    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.enabled_categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Exclude specific rule ids.
    pub fn with_excluded_rules(mut self, rule_ids: &[&str]) -> Self {
        self.excluded_rules = rule_ids.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Set the minimum severity threshold.
    pub fn with_min_severity(mut self, severity: RiskLevel) -> Self {
        self.min_severity = severity;
        self
    }

    /// Set the minimum severity threshold from its name, rejecting
    /// unknown names.
    pub fn with_min_severity_name(mut self, name: &str) -> ComplianceResult<Self> {
        self.min_severity = RiskLevel::parse(name)?;
        Ok(self)
    }
}

/// The recorded failure of one entry against one rule.
///
/// A rule produces at most one violation per entry per check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceViolation {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: RiskLevel,
    pub description: String,
    /// Why this entry failed, human-readable
    pub evidence: String,
    pub remediation: String,
    pub entry_id: String,
    pub category: String,
    pub framework: String,
}

/// Result of evaluating one (entry, framework, profile) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheckResult {
    pub entry_id: String,
    pub framework: String,
    pub framework_version: String,
    /// When the check was performed
    pub timestamp: DateTime<Utc>,
    /// Violations in rule-declaration order
    pub violations: Vec<ComplianceViolation>,
    /// Rules surviving profile filters
    pub rules_checked: usize,
    /// `rules_checked - violations.len()`, derived
    pub rules_passed: usize,
    /// `violations.is_empty()`, derived
    pub is_compliant: bool,
}

impl ComplianceCheckResult {
    /// Build a result, computing the derived fields. These are not
    /// independently settable.
    pub fn new(
        entry_id: impl Into<String>,
        framework: impl Into<String>,
        framework_version: impl Into<String>,
        rules_checked: usize,
        violations: Vec<ComplianceViolation>,
    ) -> Self {
        let rules_passed = rules_checked - violations.len();
        let is_compliant = violations.is_empty();
        Self {
            entry_id: entry_id.into(),
            framework: framework.into(),
            framework_version: framework_version.into(),
            timestamp: Utc::now(),
            violations,
            rules_checked,
            rules_passed,
            is_compliant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_total_order() {
        assert!(RiskLevel::Info < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert_eq!(RiskLevel::Info.rank(), 0);
        assert_eq!(RiskLevel::Critical.rank(), 4);
    }

    #[test]
    fn test_risk_level_parse_case_insensitive() {
        assert_eq!(RiskLevel::parse("HIGH").unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::parse("critical").unwrap(), RiskLevel::Critical);
        assert_eq!(RiskLevel::parse(" Info ").unwrap(), RiskLevel::Info);
        assert!(RiskLevel::parse("severe").is_err());
    }

    #[test]
    fn test_risk_level_serde_lowercase() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: RiskLevel = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(back, RiskLevel::Critical);
    }

    #[test]
    fn test_entry_defaults() {
        let entry = AuditEntry::new("e-1", "inference", "svc-a", "generate");
        assert_eq!(entry.risk_level, RiskLevel::Low);
        assert_eq!(entry.data_classification, "unclassified");
        assert!(entry.error_handled);
        assert!(!entry.user_notified);
        assert!(!entry.human_oversight);
        assert!(entry.documentation_ref.is_none());
    }

    #[test]
    fn test_entry_metadata_defaults() {
        let entry = AuditEntry::new("e-1", "inference", "svc-a", "generate")
            .with_metadata("monitoring_enabled", true)
            .with_metadata("protocol", "https");

        assert!(entry.metadata_bool("monitoring_enabled", false));
        assert!(!entry.metadata_bool("absent_key", false));
        assert!(entry.metadata_bool("absent_key", true));
        assert_eq!(entry.metadata_str("protocol"), Some("https"));
        assert_eq!(entry.metadata_str("absent_key"), None);
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let entry = AuditEntry::new("e-7", "training", "pipeline", "fit model")
            .with_risk_level(RiskLevel::High)
            .with_classification("PII")
            .with_metadata("data_governance_documented", true);

        let json = serde_json::to_string(&entry).unwrap();
        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entry_id, "e-7");
        assert_eq!(back.risk_level, RiskLevel::High);
        assert!(back.metadata_bool("data_governance_documented", false));
    }

    #[test]
    fn test_profile_min_severity_name_validation() {
        let profile = ComplianceProfile::new("p-1", "Prod")
            .with_min_severity_name("MEDIUM")
            .unwrap();
        assert_eq!(profile.min_severity, RiskLevel::Medium);

        let err = ComplianceProfile::new("p-2", "Bad").with_min_severity_name("urgent");
        assert!(err.is_err());
    }

    #[test]
    fn test_check_result_derived_fields() {
        let violation = ComplianceViolation {
            rule_id: "R-1".into(),
            rule_name: "Rule".into(),
            severity: RiskLevel::High,
            description: String::new(),
            evidence: "missing flag".into(),
            remediation: String::new(),
            entry_id: "e-1".into(),
            category: "security".into(),
            framework: "Test".into(),
        };
        let result = ComplianceCheckResult::new("e-1", "Test", "1.0", 5, vec![violation]);
        assert_eq!(result.rules_passed, 4);
        assert!(!result.is_compliant);

        let clean = ComplianceCheckResult::new("e-1", "Test", "1.0", 5, vec![]);
        assert_eq!(clean.rules_passed, 5);
        assert!(clean.is_compliant);
    }
}
