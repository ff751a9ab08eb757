//! Rule-evaluation engine.
//!
//! One generic, data-driven evaluator shared by every framework. Each
//! rule carries a declarative [`RuleCheck`]: an applicability gate plus
//! an ordered list of evidence requirements. The first unmet requirement
//! produces the violation, with its evidence template rendered from the
//! entry. Rules with a `check_fn` bypass the declarative path entirely.
//!
//! `check()` is pure and synchronous: no I/O, no shared mutable state,
//! safe to call concurrently for different entries.

use std::collections::HashMap;

use crate::frameworks::types::{
    AuditEntry, ComplianceCheckResult, ComplianceProfile, ComplianceRule, ComplianceViolation,
    RiskLevel,
};
use crate::observability::Logger;

/// Applicability gate: which entries a rule (or a whole framework)
/// is scoped to. Empty slices mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct Gate {
    /// Entry `event_type` must match one of these (case-insensitive)
    pub event_types: &'static [&'static str],
    /// Entry `risk_level` must be one of these
    pub risk_levels: &'static [RiskLevel],
    /// Entry `data_classification` must equal one of these
    /// (case-insensitive exact match, list given lowercase)
    pub classifications: &'static [&'static str],
    /// Entry `data_classification` must *contain* one of these tokens
    /// (case-insensitive substring, list given uppercase)
    pub classification_contains: &'static [&'static str],
    /// Metadata booleans that must hold, with per-key defaults for
    /// absent values
    pub meta_flags: &'static [(&'static str, bool)],
    /// Metadata strings that must equal the given value
    /// (case-insensitive; an absent key fails the gate)
    pub meta_equals: &'static [(&'static str, &'static str)],
}

impl Gate {
    /// Gate that admits every entry.
    pub fn any() -> Self {
        Self::default()
    }

    /// Gate on event types.
    pub fn events(event_types: &'static [&'static str]) -> Self {
        Self {
            event_types,
            ..Self::default()
        }
    }

    /// Gate on risk levels.
    pub fn risk(risk_levels: &'static [RiskLevel]) -> Self {
        Self {
            risk_levels,
            ..Self::default()
        }
    }

    /// Gate on exact data classifications (lowercase list).
    pub fn classifications(classifications: &'static [&'static str]) -> Self {
        Self {
            classifications,
            ..Self::default()
        }
    }

    /// Restrict further by risk levels.
    pub fn and_risk(mut self, risk_levels: &'static [RiskLevel]) -> Self {
        self.risk_levels = risk_levels;
        self
    }

    /// Restrict further by exact classifications.
    pub fn and_classifications(mut self, classifications: &'static [&'static str]) -> Self {
        self.classifications = classifications;
        self
    }

    /// Restrict further by classification substring tokens (uppercase).
    pub fn and_classification_contains(mut self, tokens: &'static [&'static str]) -> Self {
        self.classification_contains = tokens;
        self
    }

    /// Restrict further by metadata booleans with defaults.
    pub fn and_meta_flags(mut self, flags: &'static [(&'static str, bool)]) -> Self {
        self.meta_flags = flags;
        self
    }

    /// Restrict further by metadata string equalities.
    pub fn and_meta_equals(mut self, pairs: &'static [(&'static str, &'static str)]) -> Self {
        self.meta_equals = pairs;
        self
    }

    /// Whether the rule applies to this entry. A gated-out entry is
    /// compliant by definition.
    pub fn applies(&self, entry: &AuditEntry) -> bool {
        if !self.event_types.is_empty() {
            let event = entry.event_type.to_ascii_lowercase();
            if !self.event_types.contains(&event.as_str()) {
                return false;
            }
        }
        if !self.risk_levels.is_empty() && !self.risk_levels.contains(&entry.risk_level) {
            return false;
        }
        if !self.classifications.is_empty() {
            let classification = entry.data_classification.to_ascii_lowercase();
            if !self.classifications.contains(&classification.as_str()) {
                return false;
            }
        }
        if !self.classification_contains.is_empty() {
            let classification = entry.data_classification.to_ascii_uppercase();
            if !self
                .classification_contains
                .iter()
                .any(|token| classification.contains(token))
            {
                return false;
            }
        }
        for (key, default) in self.meta_flags {
            if !entry.metadata_bool(key, *default) {
                return false;
            }
        }
        for (key, expected) in self.meta_equals {
            let matches = entry
                .metadata_str(key)
                .is_some_and(|v| v.eq_ignore_ascii_case(expected));
            if !matches {
                return false;
            }
        }
        true
    }
}

/// A single evidence condition over an entry.
///
/// Absent metadata keys read as `false`: missing evidence is presumed
/// non-compliance, never an error.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `human_oversight` flag is set
    Oversight,
    /// `user_notified` flag is set
    Notified,
    /// `error_handled` flag is set
    ErrorHandled,
    /// `documentation_ref` is present and non-empty
    DocRef,
    /// `actor` is non-empty and not one of the given identities
    /// (lowercase list, e.g. "anonymous")
    ActorKnown(&'static [&'static str]),
    /// `system_id` is non-empty
    SystemIdPresent,
    /// `data_classification` differs from the given value (lowercase)
    ClassificationNot(&'static str),
    /// Metadata boolean is true (absent = false)
    MetaTrue(&'static str),
    /// Metadata boolean is true, with a default for absent values
    MetaTrueOr(&'static str, bool),
    /// Metadata string is present and non-empty
    MetaNonEmpty(&'static str),
    /// All of the metadata booleans are true. Pairs are (key, label);
    /// evidence may name the missing labels via `{missing}`
    AllMetaTrue(&'static [(&'static str, &'static str)]),
    /// At least one sub-condition holds
    AnyOf(&'static [Condition]),
    /// The inner condition binds only for the given event types
    /// (case-insensitive); other events pass
    IfEvent(&'static [&'static str], &'static Condition),
    /// Metadata string value is in the allowed set (lowercase);
    /// evidence may cite it via `{value}`
    ValueIn(&'static str, &'static [&'static str]),
    /// Metadata string value is not in the banned set (lowercase);
    /// an absent value passes
    ValueNotIn(&'static str, &'static [&'static str]),
    /// `entry_id`, `event_type`, `actor`, and `action` are all
    /// non-empty; evidence may name the missing subset via `{missing}`
    CoreFieldsPresent,
}

impl Condition {
    /// Evaluate against an entry.
    pub fn holds(&self, entry: &AuditEntry) -> bool {
        match self {
            Condition::Oversight => entry.human_oversight,
            Condition::Notified => entry.user_notified,
            Condition::ErrorHandled => entry.error_handled,
            Condition::DocRef => entry
                .documentation_ref
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty()),
            Condition::ActorKnown(disallowed) => {
                let actor = entry.actor.trim().to_ascii_lowercase();
                !actor.is_empty() && !disallowed.contains(&actor.as_str())
            }
            Condition::SystemIdPresent => !entry.system_id.trim().is_empty(),
            Condition::ClassificationNot(value) => {
                entry.data_classification.to_ascii_lowercase() != *value
            }
            Condition::MetaTrue(key) => entry.metadata_bool(key, false),
            Condition::MetaTrueOr(key, default) => entry.metadata_bool(key, *default),
            Condition::MetaNonEmpty(key) => {
                entry.metadata_str(key).is_some_and(|v| !v.trim().is_empty())
            }
            Condition::AllMetaTrue(pairs) => {
                pairs.iter().all(|(k, _)| entry.metadata_bool(k, false))
            }
            Condition::AnyOf(conditions) => conditions.iter().any(|c| c.holds(entry)),
            Condition::IfEvent(events, inner) => {
                let event = entry.event_type.to_ascii_lowercase();
                !events.contains(&event.as_str()) || inner.holds(entry)
            }
            Condition::ValueIn(key, allowed) => entry
                .metadata_str(key)
                .map(|v| v.to_ascii_lowercase())
                .is_some_and(|v| allowed.contains(&v.as_str())),
            Condition::ValueNotIn(key, banned) => !entry
                .metadata_str(key)
                .map(|v| v.to_ascii_lowercase())
                .is_some_and(|v| banned.contains(&v.as_str())),
            Condition::CoreFieldsPresent => missing_core_fields(entry).is_empty(),
        }
    }
}

fn missing_core_fields(entry: &AuditEntry) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if entry.entry_id.trim().is_empty() {
        missing.push("entry_id");
    }
    if entry.event_type.trim().is_empty() {
        missing.push("event_type");
    }
    if entry.actor.trim().is_empty() {
        missing.push("actor");
    }
    if entry.action.trim().is_empty() {
        missing.push("action");
    }
    missing
}

/// One ordered evidence requirement: a condition and the evidence
/// message produced when it fails.
#[derive(Debug, Clone)]
pub struct Requirement {
    pub condition: Condition,
    /// Template supporting `{event_type}`, `{risk_level}`,
    /// `{classification}`, `{actor}`, `{value}`, `{missing}`
    pub evidence: &'static str,
}

/// Declarative check record: gate, then requirements in order. The
/// first unmet requirement yields the violation.
#[derive(Debug, Clone)]
pub struct RuleCheck {
    pub when: Gate,
    pub require: Vec<Requirement>,
}

impl RuleCheck {
    /// Start a check scoped by the given gate.
    pub fn when(gate: Gate) -> Self {
        Self {
            when: gate,
            require: Vec::new(),
        }
    }

    /// Append a requirement.
    pub fn require(mut self, condition: Condition, evidence: &'static str) -> Self {
        self.require.push(Requirement {
            condition,
            evidence,
        });
        self
    }
}

fn render_evidence(template: &str, entry: &AuditEntry, condition: &Condition) -> String {
    let mut rendered = template
        .replace("{event_type}", &entry.event_type)
        .replace("{risk_level}", entry.risk_level.as_str())
        .replace("{classification}", &entry.data_classification)
        .replace("{actor}", &entry.actor);

    if rendered.contains("{value}") {
        let value = match unwrap_if_event(condition) {
            Condition::ValueIn(key, _) | Condition::ValueNotIn(key, _) => entry
                .metadata_str(key)
                .filter(|v| !v.is_empty())
                .unwrap_or("None"),
            _ => "None",
        };
        rendered = rendered.replace("{value}", value);
    }

    if rendered.contains("{missing}") {
        let missing = match unwrap_if_event(condition) {
            Condition::AllMetaTrue(pairs) => pairs
                .iter()
                .filter(|(k, _)| !entry.metadata_bool(k, false))
                .map(|(_, label)| *label)
                .collect::<Vec<_>>()
                .join(", "),
            Condition::CoreFieldsPresent => missing_core_fields(entry).join(", "),
            _ => String::new(),
        };
        rendered = rendered.replace("{missing}", &missing);
    }

    rendered
}

fn unwrap_if_event(condition: &Condition) -> &Condition {
    match condition {
        Condition::IfEvent(_, inner) => unwrap_if_event(inner),
        other => other,
    }
}

/// A named, versioned collection of rules for one regulation.
///
/// Rules are read-only after construction; `check()` allocates its own
/// result and shares nothing between calls.
pub struct Framework {
    name: String,
    version: String,
    rules: Vec<ComplianceRule>,
    index: HashMap<String, usize>,
    scope: Option<Gate>,
}

impl Framework {
    /// Build a framework from its rule table, in declaration order.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        rules: Vec<ComplianceRule>,
    ) -> Self {
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.rule_id.clone(), i))
            .collect();
        Self {
            name: name.into(),
            version: version.into(),
            rules,
            index,
            scope: None,
        }
    }

    /// Scope every rule of this framework by a shared gate. Entries
    /// outside the gate are compliant with all rules (e.g. HIPAA only
    /// applies to PHI-classified entries).
    pub fn with_scope(mut self, gate: Gate) -> Self {
        self.scope = Some(gate);
        self
    }

    /// Framework name (exact, used for report-template selection).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Framework version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }

    /// Look up a rule by id.
    pub fn get_rule(&self, rule_id: &str) -> Option<&ComplianceRule> {
        self.index.get(rule_id).map(|&i| &self.rules[i])
    }

    /// All rule categories, sorted ascending and de-duplicated.
    pub fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.rules.iter().map(|r| r.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Evaluate one entry under a profile.
    ///
    /// Rules are visited in declaration order. A rule is skipped when
    /// its id is excluded, its category is outside a non-empty
    /// category allow-list, or its severity ranks below the profile
    /// minimum. Surviving rules count toward `rules_checked` whether
    /// or not they fire.
    pub fn check(&self, entry: &AuditEntry, profile: &ComplianceProfile) -> ComplianceCheckResult {
        let mut rules_checked = 0;
        let mut violations = Vec::new();

        for rule in &self.rules {
            if profile.excluded_rules.iter().any(|r| r == &rule.rule_id) {
                continue;
            }
            if !profile.enabled_categories.is_empty()
                && !profile.enabled_categories.iter().any(|c| c == &rule.category)
            {
                continue;
            }
            if rule.severity.rank() < profile.min_severity.rank() {
                continue;
            }

            rules_checked += 1;
            if let Some(violation) = self.evaluate(entry, rule) {
                violations.push(violation);
            }
        }

        ComplianceCheckResult::new(
            entry.entry_id.clone(),
            self.name.clone(),
            self.version.clone(),
            rules_checked,
            violations,
        )
    }

    fn evaluate(&self, entry: &AuditEntry, rule: &ComplianceRule) -> Option<ComplianceViolation> {
        if let Some(scope) = &self.scope {
            if !scope.applies(entry) {
                return None;
            }
        }

        // A panicking predicate propagates; it is framework-author
        // error and must not be swallowed.
        if let Some(check_fn) = rule.check_fn {
            if !check_fn(entry) {
                return Some(self.violation(entry, rule, "Custom check failed".to_string()));
            }
            return None;
        }

        let Some(logic) = &rule.logic else {
            // A rule with neither predicate nor declarative logic is
            // compliant by default. Surface it at debug level so a
            // misspelled table entry is detectable.
            Logger::trace(
                "RULE_WITHOUT_LOGIC",
                &[("framework", self.name.as_str()), ("rule_id", rule.rule_id.as_str())],
            );
            return None;
        };

        if !logic.when.applies(entry) {
            return None;
        }

        for requirement in &logic.require {
            if !requirement.condition.holds(entry) {
                let evidence = render_evidence(requirement.evidence, entry, &requirement.condition);
                return Some(self.violation(entry, rule, evidence));
            }
        }

        None
    }

    fn violation(
        &self,
        entry: &AuditEntry,
        rule: &ComplianceRule,
        evidence: String,
    ) -> ComplianceViolation {
        ComplianceViolation {
            rule_id: rule.rule_id.clone(),
            rule_name: rule.name.clone(),
            severity: rule.severity,
            description: rule.description.clone(),
            evidence,
            remediation: rule.remediation.clone(),
            entry_id: entry.entry_id.clone(),
            category: rule.category.clone(),
            framework: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AuditEntry {
        AuditEntry::new("e-1", "inference", "svc", "generate")
    }

    fn rule_with_logic(rule_id: &str, severity: RiskLevel, category: &str) -> ComplianceRule {
        ComplianceRule::new(rule_id, rule_id, severity, category).with_logic(
            RuleCheck::when(Gate::events(&["inference"]))
                .require(Condition::Notified, "operation without notification"),
        )
    }

    fn framework() -> Framework {
        Framework::new(
            "Test",
            "1.0",
            vec![
                rule_with_logic("T-1", RiskLevel::Low, "transparency"),
                rule_with_logic("T-2", RiskLevel::High, "security"),
                rule_with_logic("T-3", RiskLevel::Critical, "security"),
            ],
        )
    }

    #[test]
    fn test_result_arithmetic_invariant() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P");
        let result = fw.check(&entry(), &profile);
        assert_eq!(
            result.rules_passed + result.violations.len(),
            result.rules_checked
        );
        assert_eq!(result.is_compliant, result.violations.is_empty());
        assert_eq!(result.rules_checked, 3);
        assert_eq!(result.violations.len(), 3);
    }

    #[test]
    fn test_excluded_rules_never_fire() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P").with_excluded_rules(&["T-2"]);
        let result = fw.check(&entry(), &profile);
        assert_eq!(result.rules_checked, 2);
        assert!(result.violations.iter().all(|v| v.rule_id != "T-2"));
    }

    #[test]
    fn test_category_allow_list() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P").with_categories(&["security"]);
        let result = fw.check(&entry(), &profile);
        assert_eq!(result.rules_checked, 2);
        assert!(result.violations.iter().all(|v| v.category == "security"));
    }

    #[test]
    fn test_min_severity_threshold() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P").with_min_severity(RiskLevel::High);
        let result = fw.check(&entry(), &profile);
        assert_eq!(result.rules_checked, 2);
        assert!(result
            .violations
            .iter()
            .all(|v| v.severity.rank() >= RiskLevel::High.rank()));
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P");
        let result = fw.check(&entry(), &profile);
        let ids: Vec<&str> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["T-1", "T-2", "T-3"]);
    }

    #[test]
    fn test_gated_out_entry_is_compliant() {
        let fw = framework();
        let profile = ComplianceProfile::new("p", "P");
        let other = AuditEntry::new("e-2", "backup", "svc", "snapshot");
        let result = fw.check(&other, &profile);
        assert_eq!(result.rules_checked, 3);
        assert!(result.is_compliant);
    }

    #[test]
    fn test_unknown_rule_silently_compliant() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![ComplianceRule::new("T-9", "No logic", RiskLevel::High, "misc")],
        );
        let profile = ComplianceProfile::new("p", "P");
        let result = fw.check(&entry(), &profile);
        assert_eq!(result.rules_checked, 1);
        assert!(result.is_compliant);
    }

    #[test]
    fn test_check_fn_failure_uses_fixed_evidence() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![ComplianceRule::new("T-8", "Custom", RiskLevel::Low, "misc")
                .with_check_fn(|_| false)],
        );
        let profile = ComplianceProfile::new("p", "P");
        let result = fw.check(&entry(), &profile);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].evidence, "Custom check failed");
    }

    #[test]
    fn test_check_fn_overrides_logic() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![rule_with_logic("T-7", RiskLevel::Low, "misc").with_check_fn(|_| true)],
        );
        let profile = ComplianceProfile::new("p", "P");
        // Declarative logic would fail (no notification); check_fn wins.
        let result = fw.check(&entry(), &profile);
        assert!(result.is_compliant);
    }

    #[test]
    #[should_panic(expected = "predicate blew up")]
    fn test_check_fn_panic_propagates() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![ComplianceRule::new("T-6", "Boom", RiskLevel::Low, "misc")
                .with_check_fn(|_| panic!("predicate blew up"))],
        );
        let profile = ComplianceProfile::new("p", "P");
        fw.check(&entry(), &profile);
    }

    #[test]
    fn test_framework_scope_gate() {
        let fw = framework().with_scope(Gate::any().and_classification_contains(&["PHI"]));
        let profile = ComplianceProfile::new("p", "P");

        let public = entry().with_classification("public");
        assert!(fw.check(&public, &profile).is_compliant);

        let phi = entry().with_classification("ePHI");
        assert!(!fw.check(&phi, &profile).is_compliant);
    }

    #[test]
    fn test_list_categories_sorted_deduped() {
        let fw = framework();
        assert_eq!(fw.list_categories(), vec!["security", "transparency"]);
    }

    #[test]
    fn test_get_rule() {
        let fw = framework();
        assert!(fw.get_rule("T-2").is_some());
        assert!(fw.get_rule("missing").is_none());
    }

    #[test]
    fn test_requirements_checked_in_order() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![ComplianceRule::new("T-5", "Seq", RiskLevel::High, "misc").with_logic(
                RuleCheck::when(Gate::any())
                    .require(Condition::MetaTrue("first"), "first missing")
                    .require(Condition::MetaTrue("second"), "second missing"),
            )],
        );
        let profile = ComplianceProfile::new("p", "P");

        let neither = entry();
        assert_eq!(
            fw.check(&neither, &profile).violations[0].evidence,
            "first missing"
        );

        let first_only = entry().with_metadata("first", true);
        assert_eq!(
            fw.check(&first_only, &profile).violations[0].evidence,
            "second missing"
        );

        let both = entry()
            .with_metadata("first", true)
            .with_metadata("second", true);
        assert!(fw.check(&both, &profile).is_compliant);
    }

    #[test]
    fn test_evidence_placeholders() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![
                ComplianceRule::new("T-4", "Values", RiskLevel::High, "misc").with_logic(
                    RuleCheck::when(Gate::any()).require(
                        Condition::ValueIn("lawful_basis", &["consent"]),
                        "invalid basis. Provided: {value}",
                    ),
                ),
            ],
        );
        let profile = ComplianceProfile::new("p", "P");

        let absent = entry();
        assert_eq!(
            fw.check(&absent, &profile).violations[0].evidence,
            "invalid basis. Provided: None"
        );

        let wrong = entry().with_metadata("lawful_basis", "curiosity");
        assert_eq!(
            fw.check(&wrong, &profile).violations[0].evidence,
            "invalid basis. Provided: curiosity"
        );
    }

    #[test]
    fn test_all_meta_missing_placeholder() {
        let fw = Framework::new(
            "Test",
            "1.0",
            vec![
                ComplianceRule::new("T-3", "AllOf", RiskLevel::High, "misc").with_logic(
                    RuleCheck::when(Gate::any()).require(
                        Condition::AllMetaTrue(&[
                            ("consent_recorded", "recorded"),
                            ("consent_specific", "specific"),
                            ("consent_informed", "informed"),
                        ]),
                        "consent invalid. Missing: {missing}",
                    ),
                ),
            ],
        );
        let profile = ComplianceProfile::new("p", "P");
        let partial = entry().with_metadata("consent_specific", true);
        assert_eq!(
            fw.check(&partial, &profile).violations[0].evidence,
            "consent invalid. Missing: recorded, informed"
        );
    }

    #[test]
    fn test_meta_equals_gate() {
        let gate = Gate::any().and_meta_equals(&[("lawful_basis", "consent")]);
        assert!(!gate.applies(&entry()));
        assert!(gate.applies(&entry().with_metadata("lawful_basis", "Consent")));
        assert!(!gate.applies(&entry().with_metadata("lawful_basis", "contract")));
    }

    #[test]
    fn test_value_not_in_passes_when_absent() {
        let banned = Condition::ValueNotIn("protocol", &["http", "ftp", "telnet"]);
        assert!(banned.holds(&entry()));
        assert!(banned.holds(&entry().with_metadata("protocol", "https")));
        assert!(!banned.holds(&entry().with_metadata("protocol", "HTTP")));
    }

    #[test]
    fn test_actor_known() {
        let cond = Condition::ActorKnown(&["anonymous"]);
        assert!(cond.holds(&entry()));
        assert!(!cond.holds(&AuditEntry::new("e", "x", "", "a")));
        assert!(!cond.holds(&AuditEntry::new("e", "x", "Anonymous", "a")));
    }

    #[test]
    fn test_meta_flag_gate_defaults() {
        // Default-true gates admit entries that never set the key.
        let gate = Gate::any().and_meta_flags(&[("risk_to_rights_freedoms", true)]);
        assert!(gate.applies(&entry()));
        assert!(!gate.applies(&entry().with_metadata("risk_to_rights_freedoms", false)));

        // Default-false gates require the key to be set.
        let gate = Gate::any().and_meta_flags(&[("significant_effect", false)]);
        assert!(!gate.applies(&entry()));
        assert!(gate.applies(&entry().with_metadata("significant_effect", true)));
    }
}
