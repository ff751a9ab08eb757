//! Report sections and framework report templates.
//!
//! Sections are built from check results and audit entries, then
//! rendered to Markdown (and from there to HTML) by the generator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frameworks::types::{
    AuditEntry, ComplianceCheckResult, ComplianceViolation, RiskLevel,
};
use crate::utils::helpers::{group_by_date, severity_weight, Granularity};

/// One titled block of report content, possibly nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subsections: Vec<ReportSection>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ReportSection {
    /// Create a leaf section.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            subsections: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Render as Markdown with the section title at `level` hashes.
    pub fn to_markdown(&self, level: usize) -> String {
        let mut parts = vec![format!("{} {}", "#".repeat(level), self.title)];
        if !self.content.is_empty() {
            parts.push(self.content.clone());
        }
        for sub in &self.subsections {
            parts.push(sub.to_markdown(level + 1));
        }
        parts.join("\n\n")
    }
}

/// Named report layout for a framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub framework: String,
    pub title: String,
    /// Section slugs in presentation order
    pub sections: Vec<String>,
    pub format: String,
}

impl ReportTemplate {
    fn new(framework: &str, title: &str, sections: &[&str]) -> Self {
        Self {
            framework: framework.to_string(),
            title: title.to_string(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
            format: "markdown".to_string(),
        }
    }

    /// Template for a framework key; unknown keys get the executive
    /// summary layout.
    pub fn for_framework(key: Option<&str>) -> Self {
        match key {
            Some("eu_ai_act") => Self::new(
                "eu_ai_act",
                "EU AI Act Compliance Report",
                &[
                    "executive_summary",
                    "risk_classification",
                    "risk_assessment",
                    "transparency_obligations",
                    "human_oversight",
                    "compliance_matrix",
                    "data_governance",
                    "technical_documentation",
                    "recommendations",
                    "audit_summary",
                ],
            ),
            Some("soc2") => Self::new(
                "soc2",
                "SOC2 Type II Compliance Report",
                &[
                    "executive_summary",
                    "scope",
                    "security",
                    "availability",
                    "processing_integrity",
                    "confidentiality",
                    "privacy",
                    "compliance_matrix",
                    "exceptions",
                    "recommendations",
                    "audit_summary",
                ],
            ),
            Some("hipaa") => Self::new(
                "hipaa",
                "HIPAA Compliance Report",
                &[
                    "executive_summary",
                    "phi_handling",
                    "access_controls",
                    "audit_controls",
                    "integrity_controls",
                    "transmission_security",
                    "compliance_matrix",
                    "breach_assessment",
                    "recommendations",
                    "audit_summary",
                ],
            ),
            _ => Self::new(
                "executive",
                "Compliance Executive Summary",
                &[
                    "executive_summary",
                    "risk_assessment",
                    "compliance_matrix",
                    "recommendations",
                    "audit_summary",
                ],
            ),
        }
    }
}

/// Headline statistics a report is summarized from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_entries: usize,
    pub violations_count: usize,
    /// Percentage in [0, 100]
    pub compliance_rate: f64,
    pub critical_violations: usize,
    pub high_violations: usize,
    pub period_start: String,
    pub period_end: String,
    pub frameworks: Vec<String>,
}

/// Executive summary: status banner, key metrics table, and a prose
/// recap.
pub fn generate_executive_summary(stats: &ReportStats) -> ReportSection {
    let (banner, note) = if stats.critical_violations > 0 {
        (
            "NON-COMPLIANT",
            "Critical violations require immediate attention.",
        )
    } else if stats.high_violations > 0 {
        (
            "NEEDS REVIEW",
            "High-severity findings should be remediated promptly.",
        )
    } else if stats.violations_count > 0 {
        (
            "PARTIALLY COMPLIANT",
            "Minor findings were identified; review at the next compliance cycle.",
        )
    } else {
        (
            "COMPLIANT",
            "No violations were identified during the analysis period.",
        )
    };

    let mut content = format!("**Overall Status: {banner}**\n\n{note}\n\n");

    content.push_str("### Key Metrics\n\n");
    content.push_str("| Metric | Value |\n|--------|-------|\n");
    content.push_str(&format!(
        "| Analysis Period | {} to {} |\n",
        stats.period_start, stats.period_end
    ));
    content.push_str(&format!(
        "| Total Entries Analyzed | {} |\n",
        stats.total_entries
    ));
    content.push_str(&format!("| Violations Found | {} |\n", stats.violations_count));
    content.push_str(&format!(
        "| Compliance Rate | {:.2}% |\n",
        stats.compliance_rate
    ));
    content.push_str(&format!(
        "| Critical Violations | {} |\n",
        stats.critical_violations
    ));
    content.push_str(&format!(
        "| High-Severity Violations | {} |\n",
        stats.high_violations
    ));

    content.push_str("\n### Frameworks Evaluated\n\n");
    for framework in &stats.frameworks {
        content.push_str(&format!("- {framework}\n"));
    }

    content.push_str(&format!(
        "\n### Summary\n\nBetween {} and {}, {} audit entries were evaluated against {} framework(s). \
         {} violation(s) were identified, yielding a compliance rate of {:.2}%.",
        stats.period_start,
        stats.period_end,
        stats.total_entries,
        stats.frameworks.len(),
        stats.violations_count,
        stats.compliance_rate
    ));

    ReportSection::new("Executive Summary", content)
}

fn severity_counts(violations: &[ComplianceViolation]) -> HashMap<RiskLevel, usize> {
    let mut counts = HashMap::new();
    for v in violations {
        *counts.entry(v.severity).or_insert(0) += 1;
    }
    counts
}

/// Risk assessment: overall posture, severity distribution, category
/// breakdown, and the highest-priority findings.
pub fn generate_risk_assessment(violations: &[ComplianceViolation]) -> ReportSection {
    if violations.is_empty() {
        return ReportSection::new(
            "Risk Assessment",
            "No compliance risks identified during the analysis period.",
        );
    }

    let counts = severity_counts(violations);
    let count_of = |level: RiskLevel| counts.get(&level).copied().unwrap_or(0);

    let (overall, description) = if count_of(RiskLevel::Critical) > 0 {
        ("CRITICAL", "Critical compliance gaps expose the organization to regulatory action. Remediate immediately.")
    } else if count_of(RiskLevel::High) > 0 {
        ("HIGH", "Significant compliance gaps were found. Remediation should begin within the current cycle.")
    } else if count_of(RiskLevel::Medium) > 0 {
        ("MEDIUM", "Moderate compliance gaps were found. Plan remediation in upcoming work.")
    } else {
        ("LOW", "Only minor findings were identified. Monitor and address during routine maintenance.")
    };

    let mut content = format!("**Overall Risk Level: {overall}**\n\n{description}\n\n");

    content.push_str("### Severity Distribution\n\n");
    content.push_str("| Severity | Count |\n|----------|-------|\n");
    for level in [
        RiskLevel::Critical,
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::Info,
    ] {
        let n = count_of(level);
        if n > 0 {
            content.push_str(&format!("| {} | {} |\n", level.as_str().to_uppercase(), n));
        }
    }

    let mut by_category: HashMap<&str, usize> = HashMap::new();
    for v in violations {
        *by_category.entry(v.category.as_str()).or_insert(0) += 1;
    }
    let mut categories: Vec<_> = by_category.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    content.push_str("\n### Findings by Category\n\n");
    for (category, n) in categories {
        content.push_str(&format!("- **{category}**: {n} violation(s)\n"));
    }

    let priority: Vec<_> = violations
        .iter()
        .filter(|v| matches!(v.severity, RiskLevel::Critical | RiskLevel::High))
        .collect();
    if !priority.is_empty() {
        content.push_str("\n### Priority Findings\n\n");
        for v in priority.iter().take(10) {
            content.push_str(&format!(
                "- **[{}]** {}: {}\n",
                v.severity.as_str().to_uppercase(),
                v.rule_name,
                v.description
            ));
        }
        if priority.len() > 10 {
            content.push_str("- ...\n");
        }
    }

    content.push_str(
        "\n### Recommendations\n\n\
         1. Remediate all critical findings before further production use.\n\
         2. Assign owners and deadlines for high-severity findings.\n\
         3. Fold medium-severity findings into the next planning cycle.\n\
         4. Re-run the compliance check after remediation to confirm closure.",
    );

    ReportSection::new("Risk Assessment", content)
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let prefix: String = name.chars().take(max).collect();
        format!("{prefix}...")
    } else {
        name.to_string()
    }
}

/// Compliance matrix: pass/fail counts per framework plus a listing of
/// the first 20 violations.
pub fn generate_compliance_matrix(results: &[ComplianceCheckResult]) -> ReportSection {
    if results.is_empty() {
        return ReportSection::new(
            "Compliance Matrix",
            "No compliance check results available for this period.",
        );
    }

    struct FrameworkTotals {
        checked: usize,
        failed: usize,
    }

    let mut per_framework: HashMap<String, FrameworkTotals> = HashMap::new();
    for result in results {
        let totals = per_framework
            .entry(result.framework.clone())
            .or_insert(FrameworkTotals {
                checked: 0,
                failed: 0,
            });
        totals.checked += result.rules_checked;
        totals.failed += result.violations.len();
    }

    let mut names: Vec<_> = per_framework.keys().cloned().collect();
    names.sort();

    let mut content = String::from(
        "| Framework | Rules Checked | Passed | Failed | Compliance % |\n\
         |-----------|---------------|--------|--------|--------------|\n",
    );

    let mut total_checked = 0;
    let mut total_failed = 0;
    for name in &names {
        let totals = &per_framework[name];
        let passed = totals.checked - totals.failed;
        let rate = if totals.checked > 0 {
            passed as f64 / totals.checked as f64 * 100.0
        } else {
            100.0
        };
        content.push_str(&format!(
            "| {} | {} | {} | {} | {:.2}% |\n",
            name, totals.checked, passed, totals.failed, rate
        ));
        total_checked += totals.checked;
        total_failed += totals.failed;
    }

    let total_passed = total_checked - total_failed;
    let overall_rate = if total_checked > 0 {
        total_passed as f64 / total_checked as f64 * 100.0
    } else {
        100.0
    };
    content.push_str(&format!(
        "| **Total** | **{total_checked}** | **{total_passed}** | **{total_failed}** | **{overall_rate:.2}%** |\n"
    ));

    content.push_str(&format!(
        "\n### Overall Statistics\n\n\
         - Total rule evaluations: {total_checked}\n\
         - Passed: {total_passed}\n\
         - Failed: {total_failed}\n\
         - Overall compliance rate: {overall_rate:.2}%\n"
    ));

    let violations: Vec<_> = results.iter().flat_map(|r| r.violations.iter()).collect();
    if !violations.is_empty() {
        content.push_str(
            "\n### Detailed Violations\n\n\
             | Framework | Rule ID | Rule Name | Severity |\n\
             |-----------|---------|-----------|----------|\n",
        );
        for v in violations.iter().take(20) {
            content.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                v.framework,
                v.rule_id,
                truncate_name(&v.rule_name, 30),
                v.severity.as_str().to_uppercase()
            ));
        }
        if violations.len() > 20 {
            content.push_str(&format!(
                "\n*Showing first 20 of {} violations*\n",
                violations.len()
            ));
        }
    }

    content.push_str(
        "\n### Interpretation\n\n\
         Each rule evaluation pairs one audit entry with one framework rule. \
         A framework with a low compliance rate indicates the audited \
         activity repeatedly lacked the evidence that framework requires.",
    );

    ReportSection::new("Compliance Matrix", content)
}

/// Remediation recommendations, deduplicated and ordered by severity
/// and recurrence.
pub fn generate_recommendations(violations: &[ComplianceViolation]) -> ReportSection {
    if violations.is_empty() {
        return ReportSection::new(
            "Recommendations",
            "No violations were found. Maintain the current posture:\n\n\
             1. Keep audit logging enabled for all AI operations.\n\
             2. Review compliance profiles as regulations evolve.\n\
             3. Re-certify framework coverage on a quarterly cadence.\n\
             4. Rehearse incident response procedures periodically.\n\
             5. Keep documentation references current for deployed models.",
        );
    }

    struct Recommendation {
        text: String,
        severity: RiskLevel,
        count: usize,
        rule_ids: Vec<String>,
    }

    let mut dedup: HashMap<String, Recommendation> = HashMap::new();
    for v in violations {
        let remediation = if v.remediation.trim().is_empty() {
            format!("Address violations of rule {}", v.rule_id)
        } else {
            v.remediation.trim().to_string()
        };
        let key = remediation.to_lowercase();
        let rec = dedup.entry(key).or_insert(Recommendation {
            text: remediation,
            severity: v.severity,
            count: 0,
            rule_ids: Vec::new(),
        });
        rec.count += 1;
        if v.severity > rec.severity {
            rec.severity = v.severity;
        }
        if !rec.rule_ids.contains(&v.rule_id) {
            rec.rule_ids.push(v.rule_id.clone());
        }
    }

    let mut recs: Vec<_> = dedup.into_values().collect();
    recs.sort_by(|a, b| {
        severity_weight(b.severity)
            .cmp(&severity_weight(a.severity))
            .then(b.count.cmp(&a.count))
            .then(a.text.cmp(&b.text))
    });
    recs.truncate(15);

    let mut immediate = String::new();
    let mut short_term = String::new();
    let mut long_term = String::new();

    for (i, rec) in recs.iter().enumerate() {
        let ids = rec
            .rule_ids
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let item = format!(
            "{}. **{}**\n   - Severity: {}\n   - Affected Rules: {}\n   - Occurrences: {}\n",
            i + 1,
            rec.text,
            rec.severity.as_str().to_uppercase(),
            ids,
            rec.count
        );
        match rec.severity {
            RiskLevel::Critical | RiskLevel::High => immediate.push_str(&item),
            RiskLevel::Medium => short_term.push_str(&item),
            _ => long_term.push_str(&item),
        }
    }

    let mut content = String::new();
    if !immediate.is_empty() {
        content.push_str("#### Immediate Actions (24-48 hours)\n\n");
        content.push_str(&immediate);
        content.push('\n');
    }
    if !short_term.is_empty() {
        content.push_str("#### Short-Term Actions (1-2 weeks)\n\n");
        content.push_str(&short_term);
        content.push('\n');
    }
    if !long_term.is_empty() {
        content.push_str("#### Long-Term Improvements\n\n");
        content.push_str(&long_term);
        content.push('\n');
    }

    content.push_str(
        "### General Best Practices\n\n\
         1. Embed compliance checks into deployment pipelines.\n\
         2. Require human oversight for all high-risk AI operations.\n\
         3. Document intended use and limitations for every model.\n\
         4. Track remediation items to closure with named owners.\n\
         5. Schedule periodic audits rather than point-in-time reviews.",
    );

    ReportSection::new("Recommendations", content)
}

/// Interaction metrics derived from entry metadata: safety rate,
/// latency, and provider breakdown.
pub fn generate_metrics_summary(entries: &[AuditEntry]) -> ReportSection {
    if entries.is_empty() {
        return ReportSection::new(
            "Metrics Summary",
            "No audit entries recorded for this period.",
        );
    }

    let mut content = format!("Total interactions: {}\n", entries.len());

    let safety_flagged: Vec<bool> = entries
        .iter()
        .filter_map(|e| match e.metadata.get("safety_passed") {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        })
        .collect();
    if !safety_flagged.is_empty() {
        let passed = safety_flagged.iter().filter(|b| **b).count();
        let rate = passed as f64 / safety_flagged.len() as f64 * 100.0;
        content.push_str(&format!(
            "\n### Safety\n\n\
             - Interactions with safety evaluation: {}\n\
             - Safety pass rate: {:.2}%\n",
            safety_flagged.len(),
            rate
        ));
    }

    let mut latencies: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.metadata.get("latency_ms").and_then(Value::as_f64))
        .collect();
    if !latencies.is_empty() {
        latencies.sort_by(|a, b| a.total_cmp(b));
        let avg = latencies.iter().sum::<f64>() / latencies.len() as f64;
        let percentile = |p: f64| {
            let idx = ((latencies.len() as f64 - 1.0) * p).round() as usize;
            latencies[idx]
        };
        content.push_str(&format!(
            "\n### Latency\n\n\
             - Average: {:.1} ms\n\
             - p50: {:.1} ms\n\
             - p95: {:.1} ms\n",
            avg,
            percentile(0.50),
            percentile(0.95)
        ));
    }

    let mut by_provider: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        if let Some(provider) = entry.metadata_str("provider") {
            *by_provider.entry(provider.to_string()).or_insert(0) += 1;
        }
    }
    if !by_provider.is_empty() {
        let mut providers: Vec<_> = by_provider.into_iter().collect();
        providers.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        content.push_str("\n### By Provider\n\n| Provider | Interactions |\n|----------|--------------|\n");
        for (provider, n) in providers {
            content.push_str(&format!("| {provider} | {n} |\n"));
        }
    }

    ReportSection::new("Metrics Summary", content)
}

/// Audit trail summary: volumes by event type and by day.
pub fn generate_audit_summary(entries: &[AuditEntry], period: &str) -> ReportSection {
    if entries.is_empty() {
        return ReportSection::new(
            "Audit Summary",
            "No audit entries recorded for this period.",
        );
    }

    let mut actors: Vec<&str> = entries.iter().map(|e| e.actor.as_str()).collect();
    actors.sort_unstable();
    actors.dedup();

    let mut content = format!(
        "Audit trail summary for {period}.\n\n\
         - Total entries: {}\n\
         - Unique actors: {}\n",
        entries.len(),
        actors.len()
    );

    let mut by_event: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *by_event.entry(entry.event_type.as_str()).or_insert(0) += 1;
    }
    let mut events: Vec<_> = by_event.into_iter().collect();
    events.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    content.push_str("\n### Event Types\n\n| Event Type | Count |\n|------------|-------|\n");
    for (event_type, n) in events {
        content.push_str(&format!("| {event_type} | {n} |\n"));
    }

    let by_day = group_by_date(entries, Granularity::Day);
    content.push_str("\n### Daily Volume\n\n| Date | Entries |\n|------|---------|\n");
    for (day, bucket) in &by_day {
        content.push_str(&format!("| {day} | {} |\n", bucket.len()));
    }
    if let Some((peak_day, bucket)) = by_day.iter().max_by_key(|(_, b)| b.len()) {
        content.push_str(&format!(
            "\nPeak day: {peak_day} with {} entries.",
            bucket.len()
        ));
    }

    ReportSection::new("Audit Summary", content)
}
