//! Framework rule table invariant tests.
//!
//! Every registered framework must satisfy the same structural
//! guarantees regardless of its rule content:
//! 1. Bookkeeping: rules_passed + violations == rules_checked
//! 2. Stable registry: known keys, unique rule ids, sorted categories
//! 3. Profile filters only ever shrink the evaluated rule set
//! 4. Scope gates admit or skip whole entries, never partial rules

use complykit::frameworks::{
    all_frameworks, framework_by_key, AuditEntry, ComplianceProfile, RiskLevel, FRAMEWORK_KEYS,
};

fn sample_entries() -> Vec<AuditEntry> {
    vec![
        AuditEntry::new("s1", "heartbeat", "ops", "ping"),
        AuditEntry::new("s2", "inference", "user-1", "generate")
            .with_user_notified(true)
            .with_human_oversight(true),
        AuditEntry::new("s3", "inference", "anonymous", "generate")
            .with_risk_level(RiskLevel::Critical)
            .with_classification("pii")
            .with_error_handled(false),
        AuditEntry::new("s4", "deployment", "release-bot", "rollout")
            .with_risk_level(RiskLevel::High)
            .with_documentation_ref("DOC-42"),
        AuditEntry::new("s5", "data_access", "analyst", "query")
            .with_classification("phi_medical")
            .with_metadata("purpose_documented", true),
        AuditEntry::new("s6", "training", "ml-pipeline", "train")
            .with_risk_level(RiskLevel::Medium)
            .with_metadata("lawful_basis", "consent"),
    ]
}

// =============================================================================
// BOOKKEEPING
// =============================================================================

/// Every check result must balance: checked = passed + violated.
#[test]
fn test_check_bookkeeping_balances_for_all_frameworks() {
    let profile = ComplianceProfile::new("p", "Sweep");
    for (key, framework) in all_frameworks() {
        for entry in sample_entries() {
            let result = framework.check(&entry, &profile);
            assert_eq!(
                result.rules_passed + result.violations.len(),
                result.rules_checked,
                "bookkeeping broken for {key} on {}",
                entry.entry_id
            );
            assert_eq!(result.is_compliant, result.violations.is_empty());
            assert_eq!(result.framework, framework.name());
        }
    }
}

/// A rule produces at most one violation per entry.
#[test]
fn test_at_most_one_violation_per_rule() {
    let profile = ComplianceProfile::new("p", "Sweep");
    let hostile = AuditEntry::new("h1", "inference", "anonymous", "generate")
        .with_risk_level(RiskLevel::Critical)
        .with_classification("pii")
        .with_error_handled(false);

    for (key, framework) in all_frameworks() {
        let result = framework.check(&hostile, &profile);
        let mut rule_ids: Vec<&str> =
            result.violations.iter().map(|v| v.rule_id.as_str()).collect();
        let before = rule_ids.len();
        rule_ids.sort_unstable();
        rule_ids.dedup();
        assert_eq!(rule_ids.len(), before, "duplicate violation in {key}");
    }
}

/// Violations carry the entry id and framework they came from.
#[test]
fn test_violations_are_attributed() {
    let profile = ComplianceProfile::new("p", "Sweep");
    let entry = AuditEntry::new("attr-1", "inference", "user-1", "generate");

    let framework = framework_by_key("eu_ai_act").unwrap();
    let result = framework.check(&entry, &profile);
    assert!(!result.violations.is_empty());
    for v in &result.violations {
        assert_eq!(v.entry_id, "attr-1");
        assert_eq!(v.framework, "EU AI Act");
        assert!(!v.evidence.is_empty());
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The registry holds exactly the seven built-in frameworks with their
/// published rule counts.
#[test]
fn test_registry_rule_counts() {
    let expected = [
        ("eu_ai_act", "EU AI Act", 8),
        ("gdpr", "GDPR", 14),
        ("hipaa", "HIPAA", 8),
        ("soc2", "SOC2 Type II", 10),
        ("iso_42001", "ISO/IEC 42001", 23),
        ("nist_ai_rmf", "NIST AI RMF", 15),
        ("mas_feat", "MAS FEAT", 18),
    ];
    assert_eq!(FRAMEWORK_KEYS.len(), expected.len());

    for (key, name, count) in expected {
        let framework = framework_by_key(key)
            .unwrap_or_else(|| panic!("missing framework {key}"));
        assert_eq!(framework.name(), name);
        assert_eq!(framework.rules().len(), count, "rule count for {key}");
    }
    assert!(framework_by_key("pci_dss").is_none());
}

/// Rule ids are unique and resolvable within each framework.
#[test]
fn test_rule_ids_unique_and_indexed() {
    for (key, framework) in all_frameworks() {
        let mut ids: Vec<&str> = framework.rules().iter().map(|r| r.rule_id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate rule id in {key}");

        for rule in framework.rules() {
            let found = framework.get_rule(&rule.rule_id);
            assert!(found.is_some(), "{key} cannot resolve {}", rule.rule_id);
        }
    }
}

/// Category listings are sorted and deduplicated.
#[test]
fn test_categories_sorted_and_deduplicated() {
    for (key, framework) in all_frameworks() {
        let categories = framework.list_categories();
        let mut expected = categories.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(categories, expected, "categories for {key}");
    }
}

// =============================================================================
// PROFILE FILTERS
// =============================================================================

/// Excluding a rule removes it from the checked count.
#[test]
fn test_excluded_rules_shrink_checked_count() {
    let framework = framework_by_key("eu_ai_act").unwrap();
    let entry = AuditEntry::new("e1", "heartbeat", "ops", "ping");

    let full = ComplianceProfile::new("p", "Full");
    let trimmed = ComplianceProfile::new("p", "Trimmed").with_excluded_rules(&["EUAI-001"]);

    let all = framework.check(&entry, &full).rules_checked;
    let fewer = framework.check(&entry, &trimmed).rules_checked;
    assert_eq!(fewer, all - 1);
}

/// A severity floor drops every rule strictly below it.
#[test]
fn test_min_severity_floor() {
    let framework = framework_by_key("eu_ai_act").unwrap();
    let entry = AuditEntry::new("e1", "heartbeat", "ops", "ping");
    let profile = ComplianceProfile::new("p", "Critical only")
        .with_min_severity(RiskLevel::Critical);

    let critical_rules = framework
        .rules()
        .iter()
        .filter(|r| r.severity == RiskLevel::Critical)
        .count();
    let result = framework.check(&entry, &profile);
    assert_eq!(result.rules_checked, critical_rules);
}

/// Category restrictions evaluate only matching rules.
#[test]
fn test_category_restriction() {
    let framework = framework_by_key("eu_ai_act").unwrap();
    let entry = AuditEntry::new("e1", "inference", "user-1", "generate");
    let profile =
        ComplianceProfile::new("p", "Transparency").with_categories(&["transparency"]);

    let result = framework.check(&entry, &profile);
    let transparency_rules = framework
        .rules()
        .iter()
        .filter(|r| r.category == "transparency")
        .count();
    assert_eq!(result.rules_checked, transparency_rules);
    // Unnotified interaction violates the transparency rule
    assert!(result.violations.iter().any(|v| v.rule_id == "EUAI-002"));
}

// =============================================================================
// GATES AND SCOPES
// =============================================================================

/// EUAI-002 fires only for user-facing events without notification.
#[test]
fn test_transparency_rule_gating() {
    let framework = framework_by_key("eu_ai_act").unwrap();
    let profile = ComplianceProfile::new("p", "P");

    let silent = AuditEntry::new("e1", "inference", "user-1", "generate");
    let result = framework.check(&silent, &profile);
    let violation = result
        .violations
        .iter()
        .find(|v| v.rule_id == "EUAI-002")
        .expect("unnotified interaction must violate EUAI-002");
    assert_eq!(
        violation.evidence,
        "User-facing AI interaction (type=inference) performed without notifying user of AI involvement"
    );

    let notified = AuditEntry::new("e2", "inference", "user-1", "generate")
        .with_user_notified(true);
    let result = framework.check(&notified, &profile);
    assert!(!result.violations.iter().any(|v| v.rule_id == "EUAI-002"));

    let batch = AuditEntry::new("e3", "batch_export", "svc", "export");
    let result = framework.check(&batch, &profile);
    assert!(!result.violations.iter().any(|v| v.rule_id == "EUAI-002"));
}

/// High-risk operations without oversight trip the critical risk rule.
#[test]
fn test_high_risk_without_oversight() {
    let framework = framework_by_key("eu_ai_act").unwrap();
    let profile = ComplianceProfile::new("p", "P");

    let entry = AuditEntry::new("e1", "automated_decision", "svc", "decide")
        .with_risk_level(RiskLevel::High);
    let result = framework.check(&entry, &profile);
    let ids: Vec<&str> = result.violations.iter().map(|v| v.rule_id.as_str()).collect();
    assert!(ids.contains(&"EUAI-001"));
    assert!(ids.contains(&"EUAI-003"));
}

/// HIPAA only evaluates PHI-classified entries.
#[test]
fn test_hipaa_scope_skips_non_phi() {
    let framework = framework_by_key("hipaa").unwrap();
    let profile = ComplianceProfile::new("p", "P");

    let public = AuditEntry::new("e1", "data_access", "anonymous", "query")
        .with_classification("public");
    assert!(framework.check(&public, &profile).is_compliant);

    let phi = AuditEntry::new("e2", "data_access", "anonymous", "query")
        .with_classification("phi_records");
    assert!(!framework.check(&phi, &profile).is_compliant);
}
