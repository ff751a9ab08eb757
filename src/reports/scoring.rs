//! Compliance scoring and status determination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frameworks::types::{ComplianceViolation, RiskLevel};

/// Overall compliance verdict for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsReview,
    NonCompliant,
}

impl ComplianceStatus {
    /// Snake-case name as it appears in exported reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NeedsReview => "needs_review",
            ComplianceStatus::NonCompliant => "non_compliant",
        }
    }

    /// Uppercase human label with spaces, for report headers.
    pub fn display_label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn penalty_weight(severity: RiskLevel) -> f64 {
    match severity {
        RiskLevel::Critical => 10.0,
        RiskLevel::High => 5.0,
        RiskLevel::Medium => 2.0,
        RiskLevel::Low => 1.0,
        RiskLevel::Info => 0.5,
    }
}

/// Score a check run in `[0.0, 1.0]`.
///
/// Each violation subtracts a severity-weighted penalty from a budget
/// of ten points per rule checked. Zero checks score a clean 1.0.
pub fn compliance_score(violations: &[ComplianceViolation], total_checks: usize) -> f64 {
    if total_checks == 0 || violations.is_empty() {
        return 1.0;
    }

    let penalty: f64 = violations.iter().map(|v| penalty_weight(v.severity)).sum();
    let max_penalty = total_checks as f64 * 10.0;
    let score = 1.0 - (penalty / max_penalty).min(1.0);
    score.clamp(0.0, 1.0)
}

/// Map a score and critical violation count to a status.
///
/// Any critical violation forces `non_compliant` regardless of score.
pub fn determine_status(score: f64, critical_count: usize) -> ComplianceStatus {
    if critical_count > 0 {
        ComplianceStatus::NonCompliant
    } else if score >= 0.95 {
        ComplianceStatus::Compliant
    } else if score >= 0.80 {
        ComplianceStatus::NeedsReview
    } else {
        ComplianceStatus::NonCompliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: RiskLevel) -> ComplianceViolation {
        ComplianceViolation {
            rule_id: "R-1".to_string(),
            rule_name: "Rule".to_string(),
            severity,
            description: String::new(),
            evidence: String::new(),
            remediation: String::new(),
            entry_id: "e1".to_string(),
            category: "testing".to_string(),
            framework: "GDPR".to_string(),
        }
    }

    #[test]
    fn test_score_perfect_when_no_violations() {
        assert_eq!(compliance_score(&[], 100), 1.0);
        assert_eq!(compliance_score(&[], 0), 1.0);
    }

    #[test]
    fn test_score_zero_checks_with_violations() {
        // Degenerate input, score stays clean rather than dividing by zero
        assert_eq!(compliance_score(&[violation(RiskLevel::Critical)], 0), 1.0);
    }

    #[test]
    fn test_score_weighted_penalties() {
        // 1 critical + 1 low over 10 checks: penalty 11 of 100
        let violations = vec![violation(RiskLevel::Critical), violation(RiskLevel::Low)];
        let score = compliance_score(&violations, 10);
        assert!((score - 0.89).abs() < 1e-9);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let violations: Vec<_> = (0..30).map(|_| violation(RiskLevel::Critical)).collect();
        assert_eq!(compliance_score(&violations, 2), 0.0);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(determine_status(1.0, 0), ComplianceStatus::Compliant);
        assert_eq!(determine_status(0.95, 0), ComplianceStatus::Compliant);
        assert_eq!(determine_status(0.94, 0), ComplianceStatus::NeedsReview);
        assert_eq!(determine_status(0.80, 0), ComplianceStatus::NeedsReview);
        assert_eq!(determine_status(0.79, 0), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_status_critical_override() {
        // High score cannot mask a critical violation
        assert_eq!(determine_status(0.99, 1), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&ComplianceStatus::NeedsReview).unwrap();
        assert_eq!(json, "\"needs_review\"");
        assert_eq!(ComplianceStatus::NonCompliant.display_label(), "NON COMPLIANT");
    }
}
