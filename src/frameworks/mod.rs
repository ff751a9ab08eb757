//! Compliance frameworks for AI system evaluation.
//!
//! Each framework is a [`Framework`] instance carrying a declarative
//! rule table built with the [`engine`] combinators:
//!
//! - EU AI Act: European Union's comprehensive AI regulation
//! - GDPR: General Data Protection Regulation (EU) 2016/679
//! - HIPAA: US healthcare data protection requirements
//! - SOC2 Type II: AICPA Trust Services Criteria
//! - ISO/IEC 42001: International standard for AI management systems
//! - NIST AI RMF: NIST AI Risk Management Framework 1.0
//! - MAS FEAT: Monetary Authority of Singapore FEAT principles
//!
//! ```no_run
//! use complykit::frameworks::{eu_ai_act, AuditEntry, ComplianceProfile};
//!
//! let framework = eu_ai_act();
//! let entry = AuditEntry::new("entry-001", "inference", "api-user", "Generated response");
//! let profile = ComplianceProfile::new("default", "Default Profile");
//! let result = framework.check(&entry, &profile);
//! assert_eq!(result.rules_checked, framework.rules().len());
//! ```

pub mod engine;
pub mod types;

mod eu_ai_act;
mod gdpr;
mod hipaa;
mod iso_42001;
mod mas;
mod nist_ai_rmf;
mod soc2;

pub use engine::{Condition, Framework, Gate, Requirement, RuleCheck};
pub use eu_ai_act::eu_ai_act;
pub use gdpr::gdpr;
pub use hipaa::hipaa;
pub use iso_42001::iso_42001;
pub use mas::mas_feat;
pub use nist_ai_rmf::nist_ai_rmf;
pub use soc2::soc2;
pub use types::{
    AuditEntry, ComplianceCheckResult, ComplianceProfile, ComplianceRule, ComplianceViolation,
    RiskLevel,
};

/// Registry keys for every built-in framework, in stable order.
pub const FRAMEWORK_KEYS: &[&str] = &[
    "eu_ai_act",
    "gdpr",
    "hipaa",
    "soc2",
    "iso_42001",
    "nist_ai_rmf",
    "mas_feat",
];

/// Look up a built-in framework by its registry key.
///
/// Returns `None` for unknown keys so callers can decide whether an
/// unrecognized profile entry is an error or simply skipped.
pub fn framework_by_key(key: &str) -> Option<Framework> {
    match key {
        "eu_ai_act" => Some(eu_ai_act()),
        "gdpr" => Some(gdpr()),
        "hipaa" => Some(hipaa()),
        "soc2" => Some(soc2()),
        "iso_42001" => Some(iso_42001()),
        "nist_ai_rmf" => Some(nist_ai_rmf()),
        "mas_feat" => Some(mas_feat()),
        _ => None,
    }
}

/// Build every built-in framework, keyed for report generation.
pub fn all_frameworks() -> Vec<(&'static str, Framework)> {
    FRAMEWORK_KEYS
        .iter()
        .filter_map(|key| framework_by_key(key).map(|fw| (*key, fw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_keys() {
        let frameworks = all_frameworks();
        assert_eq!(frameworks.len(), FRAMEWORK_KEYS.len());
        for (key, fw) in &frameworks {
            assert!(framework_by_key(key).is_some());
            assert!(!fw.rules().is_empty());
        }
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert!(framework_by_key("pci_dss").is_none());
    }

    #[test]
    fn test_rule_ids_unique_within_each_framework() {
        for (key, fw) in all_frameworks() {
            let mut ids: Vec<&str> = fw.rules().iter().map(|r| r.rule_id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate rule id in {key}");
        }
    }
}
