//! Report assembly and export.
//!
//! [`ReportGenerator`] pulls audit entries from a store, evaluates them
//! against the registered frameworks, and assembles a
//! [`ComplianceReport`] exportable as Markdown, JSON, or standalone
//! HTML.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::storage::AuditStore;
use crate::core::error::{ComplianceError, ComplianceResult};
use crate::frameworks::engine::Framework;
use crate::frameworks::types::{ComplianceCheckResult, ComplianceProfile, ComplianceViolation, RiskLevel};
use crate::frameworks::{all_frameworks, framework_by_key};
use crate::observability::logger::Logger;
use crate::reports::scoring::{compliance_score, determine_status, ComplianceStatus};
use crate::reports::sections::{
    generate_audit_summary, generate_compliance_matrix, generate_executive_summary,
    generate_metrics_summary, generate_recommendations, generate_risk_assessment,
    ReportSection, ReportStats, ReportTemplate,
};
use crate::utils::helpers::format_period;

/// A fully assembled compliance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub id: String,
    pub title: String,
    /// Framework key when the report targets a single framework
    pub framework: Option<String>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    /// Name of the profile the report was generated under
    pub profile: String,
    pub summary: ReportStats,
    pub sections: Vec<ReportSection>,
    pub total_entries: usize,
    pub violations_count: usize,
    pub compliance_score: f64,
    pub status: ComplianceStatus,
}

impl ComplianceReport {
    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        out.push_str(&format!("**Report ID:** {}\n", self.id));
        out.push_str(&format!(
            "**Generated:** {} UTC\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!(
            "**Period:** {}\n",
            format_period(self.period_start, self.period_end)
        ));
        out.push_str(&format!(
            "**Framework:** {}\n",
            self.framework.as_deref().unwrap_or("Multiple")
        ));
        out.push_str(&format!("**Profile:** {}\n\n---\n\n", self.profile));

        out.push_str(&format!(
            "**Compliance Score:** {:.2}%\n",
            self.compliance_score * 100.0
        ));
        out.push_str(&format!("**Status:** {}\n", self.status.display_label()));
        out.push_str(&format!("**Total Entries:** {}\n", self.total_entries));
        out.push_str(&format!("**Violations:** {}\n\n---\n\n", self.violations_count));

        for section in &self.sections {
            out.push_str(&section.to_markdown(2));
            out.push_str("\n\n");
        }

        out.push_str("---\n\n*This report was generated by complykit.*\n");
        out
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> ComplianceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the report as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let status_color = match self.status {
            ComplianceStatus::Compliant => "#28a745",
            ComplianceStatus::NeedsReview => "#ffc107",
            ComplianceStatus::NonCompliant => "#dc3545",
        };

        let mut body = String::new();
        body.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.title)));
        body.push_str("<div class=\"meta\">\n");
        body.push_str(&format!("<p><strong>Report ID:</strong> {}</p>\n", self.id));
        body.push_str(&format!(
            "<p><strong>Generated:</strong> {} UTC</p>\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        body.push_str(&format!(
            "<p><strong>Period:</strong> {}</p>\n",
            format_period(self.period_start, self.period_end)
        ));
        body.push_str(&format!(
            "<p><strong>Profile:</strong> {}</p>\n",
            escape_html(&self.profile)
        ));
        body.push_str("</div>\n");
        body.push_str(&format!(
            "<p class=\"score\">Compliance Score: <span style=\"color:{status_color}\">{:.2}%</span> \
             <span class=\"status\" style=\"background:{status_color}\">{}</span></p>\n",
            self.compliance_score * 100.0,
            self.status.display_label()
        ));

        for section in &self.sections {
            body.push_str(&section_to_html(section, 2));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
             <style>\n\
             body {{ font-family: -apple-system, Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 60rem; color: #212529; }}\n\
             table {{ border-collapse: collapse; margin: 1rem 0; }}\n\
             th, td {{ border: 1px solid #dee2e6; padding: 0.4rem 0.8rem; text-align: left; }}\n\
             th {{ background: #f8f9fa; }}\n\
             .meta p {{ margin: 0.2rem 0; }}\n\
             .status {{ color: #fff; padding: 0.2rem 0.6rem; border-radius: 0.25rem; }}\n\
             .footer {{ color: #6c757d; font-style: italic; margin-top: 2rem; }}\n\
             </style>\n</head>\n<body>\n{}\
             <p class=\"footer\">This report was generated by complykit.</p>\n</body>\n</html>\n",
            escape_html(&self.title),
            body
        )
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn inline_html(text: &str) -> String {
    // Alternate ** pairs into <strong> tags
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    for (i, piece) in escaped.split("**").enumerate() {
        if i > 0 {
            out.push_str(if i % 2 == 1 { "<strong>" } else { "</strong>" });
        }
        out.push_str(piece);
    }
    out
}

fn section_to_html(section: &ReportSection, level: usize) -> String {
    let mut html = format!("<h{level}>{}</h{level}>\n", escape_html(&section.title));
    html.push_str(&markdown_to_html(&section.content, level));
    for sub in &section.subsections {
        html.push_str(&section_to_html(sub, level + 1));
    }
    html
}

/// Convert section Markdown to HTML. Handles the constructs the
/// section builders emit: tables, `###`/`####` headings, bullet lists,
/// and bold text.
fn markdown_to_html(content: &str, section_level: usize) -> String {
    let mut html = String::new();
    let mut in_table = false;
    let mut in_list = false;

    for line in content.lines() {
        let trimmed = line.trim();

        let is_table_row = trimmed.starts_with('|') && trimmed.ends_with('|');
        if in_table && !is_table_row {
            html.push_str("</table>\n");
            in_table = false;
        }
        let is_bullet = trimmed.starts_with("- ");
        if in_list && !is_bullet {
            html.push_str("</ul>\n");
            in_list = false;
        }

        if trimmed.is_empty() {
            continue;
        }

        if is_table_row {
            // Separator rows carry no content
            if trimmed.chars().all(|c| matches!(c, '|' | '-' | ' ' | ':')) {
                continue;
            }
            let tag = if in_table { "td" } else { "th" };
            if !in_table {
                html.push_str("<table>\n");
                in_table = true;
            }
            html.push_str("<tr>");
            for cell in trimmed.trim_matches('|').split('|') {
                html.push_str(&format!("<{tag}>{}</{tag}>", inline_html(cell.trim())));
            }
            html.push_str("</tr>\n");
        } else if let Some(heading) = trimmed.strip_prefix("#### ") {
            html.push_str(&format!(
                "<h{0}>{1}</h{0}>\n",
                section_level + 2,
                inline_html(heading)
            ));
        } else if let Some(heading) = trimmed.strip_prefix("### ") {
            html.push_str(&format!(
                "<h{0}>{1}</h{0}>\n",
                section_level + 1,
                inline_html(heading)
            ));
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            if !in_list {
                html.push_str("<ul>\n");
                in_list = true;
            }
            html.push_str(&format!("<li>{}</li>\n", inline_html(item)));
        } else {
            html.push_str(&format!("<p>{}</p>\n", inline_html(trimmed)));
        }
    }

    if in_table {
        html.push_str("</table>\n");
    }
    if in_list {
        html.push_str("</ul>\n");
    }
    html
}

/// Generates compliance reports from a store and a framework registry.
pub struct ReportGenerator {
    store: Box<dyn AuditStore>,
    frameworks: Vec<(&'static str, Framework)>,
}

impl ReportGenerator {
    /// Generator over the full built-in framework registry.
    pub fn new(store: Box<dyn AuditStore>) -> Self {
        Self {
            store,
            frameworks: all_frameworks(),
        }
    }

    /// Generator restricted to an explicit framework set.
    pub fn with_frameworks(
        store: Box<dyn AuditStore>,
        frameworks: Vec<(&'static str, Framework)>,
    ) -> Self {
        Self { store, frameworks }
    }

    fn selected_frameworks(
        &self,
        framework: Option<&str>,
        profile: &ComplianceProfile,
    ) -> ComplianceResult<Vec<&(&'static str, Framework)>> {
        if let Some(key) = framework {
            if framework_by_key(key).is_none() {
                return Err(ComplianceError::framework(format!(
                    "unknown framework: {key}"
                )));
            }
            return Ok(self.frameworks.iter().filter(|(k, _)| *k == key).collect());
        }

        if profile.enabled_frameworks.is_empty() {
            return Ok(self.frameworks.iter().collect());
        }

        let mut selected = Vec::new();
        for key in &profile.enabled_frameworks {
            match self.frameworks.iter().find(|(k, _)| k == key) {
                Some(pair) => selected.push(pair),
                None => Logger::warn(
                    "UNKNOWN_FRAMEWORK_IN_PROFILE",
                    &[("framework", key), ("profile", &profile.profile_id)],
                ),
            }
        }
        Ok(selected)
    }

    fn evaluate(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        profile: &ComplianceProfile,
        framework: Option<&str>,
    ) -> ComplianceResult<Evaluation> {
        let entries = self.store.list_entries(period_start, period_end)?;
        let selected = self.selected_frameworks(framework, profile)?;

        let mut results: Vec<ComplianceCheckResult> = Vec::new();
        let mut violations: Vec<ComplianceViolation> = Vec::new();
        for (_, fw) in &selected {
            for entry in &entries {
                let result = fw.check(entry, profile);
                violations.extend(result.violations.iter().cloned());
                results.push(result);
            }
        }

        let total_checks: usize = results.iter().map(|r| r.rules_checked).sum();
        let score = compliance_score(&violations, total_checks);
        let critical = violations
            .iter()
            .filter(|v| v.severity == RiskLevel::Critical)
            .count();
        let high = violations
            .iter()
            .filter(|v| v.severity == RiskLevel::High)
            .count();
        let status = determine_status(score, critical);

        let stats = ReportStats {
            total_entries: entries.len(),
            violations_count: violations.len(),
            compliance_rate: score * 100.0,
            critical_violations: critical,
            high_violations: high,
            period_start: period_start.format("%Y-%m-%d").to_string(),
            period_end: period_end.format("%Y-%m-%d").to_string(),
            frameworks: selected.iter().map(|(_, fw)| fw.name().to_string()).collect(),
        };

        Ok(Evaluation {
            entries,
            results,
            violations,
            stats,
            score,
            status,
        })
    }

    /// Generate a full report over the period.
    ///
    /// When `framework` is given only that framework is evaluated and
    /// its report template supplies the title; otherwise the profile's
    /// enabled frameworks (or all registered frameworks) apply.
    pub fn generate(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        profile: &ComplianceProfile,
        framework: Option<&str>,
    ) -> ComplianceResult<ComplianceReport> {
        let eval = self.evaluate(period_start, period_end, profile, framework)?;
        let period_label = format_period(period_start, period_end);

        let sections = vec![
            generate_executive_summary(&eval.stats),
            generate_risk_assessment(&eval.violations),
            generate_compliance_matrix(&eval.results),
            generate_metrics_summary(&eval.entries),
            generate_recommendations(&eval.violations),
            generate_audit_summary(&eval.entries, &period_label),
        ];

        let template = ReportTemplate::for_framework(framework);
        let title = match framework {
            Some(_) => template.title,
            None => format!("Compliance Report - {}", profile.name),
        };

        let report = self.assemble(
            title,
            framework,
            period_start,
            period_end,
            profile,
            eval,
            sections,
        );
        Logger::info(
            "REPORT_GENERATED",
            &[
                ("report_id", &report.id),
                ("entries", &report.total_entries.to_string()),
                ("violations", &report.violations_count.to_string()),
                ("status", report.status.as_str()),
            ],
        );
        Ok(report)
    }

    /// Generate a condensed report with only the executive sections.
    pub fn generate_executive_summary(
        &self,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        profile: &ComplianceProfile,
    ) -> ComplianceResult<ComplianceReport> {
        let eval = self.evaluate(period_start, period_end, profile, None)?;

        let sections = vec![
            generate_executive_summary(&eval.stats),
            generate_risk_assessment(&eval.violations),
            generate_compliance_matrix(&eval.results),
        ];

        let title = format!("Executive Summary - {}", profile.name);
        let report = self.assemble(
            title,
            None,
            period_start,
            period_end,
            profile,
            eval,
            sections,
        );
        Logger::info(
            "REPORT_GENERATED",
            &[
                ("report_id", &report.id),
                ("kind", "executive_summary"),
                ("status", report.status.as_str()),
            ],
        );
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        title: String,
        framework: Option<&str>,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        profile: &ComplianceProfile,
        eval: Evaluation,
        sections: Vec<ReportSection>,
    ) -> ComplianceReport {
        ComplianceReport {
            id: Uuid::new_v4().to_string(),
            title,
            framework: framework.map(str::to_string),
            period_start,
            period_end,
            generated_at: Utc::now(),
            profile: profile.name.clone(),
            total_entries: eval.stats.total_entries,
            violations_count: eval.stats.violations_count,
            summary: eval.stats,
            sections,
            compliance_score: eval.score,
            status: eval.status,
        }
    }
}

struct Evaluation {
    entries: Vec<crate::frameworks::types::AuditEntry>,
    results: Vec<ComplianceCheckResult>,
    violations: Vec<ComplianceViolation>,
    stats: ReportStats,
    score: f64,
    status: ComplianceStatus,
}
