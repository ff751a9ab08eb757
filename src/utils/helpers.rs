//! Reporting period helpers and entry grouping.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::core::error::{ComplianceError, ComplianceResult};
use crate::frameworks::types::AuditEntry;

fn compile(pattern: &str) -> ComplianceResult<Regex> {
    Regex::new(pattern).map_err(|e| ComplianceError::config(format!("bad period pattern: {e}")))
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

fn day_start(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn day_end(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 23, 59, 59).single()
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Render a date range as the most compact human label that covers it
/// exactly.
///
/// Full year becomes `2026`, a full quarter `2026-Q1`, a full month
/// `Jan 2026`. Everything else renders as
/// `YYYY-MM-DD to YYYY-MM-DD`.
pub fn format_period(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let range = format!(
        "{} to {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    if start.year() != end.year() {
        return range;
    }
    let year = start.year();

    if start.month() == 1 && start.day() == 1 && end.month() == 12 && end.day() == 31 {
        return year.to_string();
    }

    let start_quarter = (start.month() - 1) / 3;
    let end_quarter = (end.month() - 1) / 3;
    if start_quarter == end_quarter
        && matches!(start.month(), 1 | 4 | 7 | 10)
        && start.day() == 1
        && matches!(end.month(), 3 | 6 | 9 | 12)
        && Some(end.day()) == last_day_of_month(year, end.month())
    {
        return format!("{year}-Q{}", start_quarter + 1);
    }

    if start.month() == end.month()
        && start.day() == 1
        && Some(end.day()) == last_day_of_month(year, end.month())
    {
        return start.format("%b %Y").to_string();
    }

    range
}

/// Parse a period label into an inclusive datetime range.
///
/// Accepted forms: `2026-Q1`, `2026`, `Jan 2026` (or full month name),
/// `2026-01-01 to 2026-03-15`, and a single ISO date. The start lands
/// at 00:00:00 and the end at 23:59:59.
pub fn parse_period(period: &str) -> ComplianceResult<(DateTime<Utc>, DateTime<Utc>)> {
    let period = period.trim();
    let invalid = || ComplianceError::PeriodParse(period.to_string());

    if let Some(caps) = compile(r"^(\d{4})-Q([1-4])$")?.captures(period) {
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let quarter: u32 = caps[2].parse().map_err(|_| invalid())?;
        let start_month = (quarter - 1) * 3 + 1;
        let end_month = start_month + 2;
        let end_day = last_day_of_month(year, end_month).ok_or_else(invalid)?;
        let start = day_start(year, start_month, 1).ok_or_else(invalid)?;
        let end = day_end(year, end_month, end_day).ok_or_else(invalid)?;
        return Ok((start, end));
    }

    if compile(r"^\d{4}$")?.is_match(period) {
        let year: i32 = period.parse().map_err(|_| invalid())?;
        let start = day_start(year, 1, 1).ok_or_else(invalid)?;
        let end = day_end(year, 12, 31).ok_or_else(invalid)?;
        return Ok((start, end));
    }

    if let Some(caps) = compile(r"^(\w+)\s+(\d{4})$")?.captures(period) {
        let month = month_number(&caps[1]).ok_or_else(invalid)?;
        let year: i32 = caps[2].parse().map_err(|_| invalid())?;
        let end_day = last_day_of_month(year, month).ok_or_else(invalid)?;
        let start = day_start(year, month, 1).ok_or_else(invalid)?;
        let end = day_end(year, month, end_day).ok_or_else(invalid)?;
        return Ok((start, end));
    }

    if let Some(caps) =
        compile(r"^(\d{4}-\d{2}-\d{2})\s+to\s+(\d{4}-\d{2}-\d{2})$")?.captures(period)
    {
        let start_date =
            NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|_| invalid())?;
        let end_date = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").map_err(|_| invalid())?;
        let start =
            day_start(start_date.year(), start_date.month(), start_date.day()).ok_or_else(invalid)?;
        let end = day_end(end_date.year(), end_date.month(), end_date.day()).ok_or_else(invalid)?;
        return Ok((start, end));
    }

    if let Ok(date) = NaiveDate::parse_from_str(period, "%Y-%m-%d") {
        let start = day_start(date.year(), date.month(), date.day()).ok_or_else(invalid)?;
        let end = day_end(date.year(), date.month(), date.day()).ok_or_else(invalid)?;
        return Ok((start, end));
    }

    Err(invalid())
}

/// Numeric weight for a severity name, for sorting and aggregation.
///
/// Report scoring uses its own float weights; this integer table is
/// for ranking findings within sections.
pub fn severity_weight(severity: impl AsRef<str>) -> u32 {
    match severity.as_ref().to_lowercase().as_str() {
        "critical" => 10,
        "high" => 5,
        "medium" => 2,
        _ => 1,
    }
}

/// Bucketing granularity for [`group_by_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        };
        write!(f, "{label}")
    }
}

/// Group entries by timestamp bucket. Keys sort chronologically
/// within a granularity (`2026-01-05`, `2026-W02`, `2026-01`,
/// `2026-Q1`, `2026`).
pub fn group_by_date(
    entries: &[AuditEntry],
    granularity: Granularity,
) -> BTreeMap<String, Vec<AuditEntry>> {
    let mut groups: BTreeMap<String, Vec<AuditEntry>> = BTreeMap::new();
    for entry in entries {
        let ts = entry.timestamp;
        let key = match granularity {
            Granularity::Day => ts.format("%Y-%m-%d").to_string(),
            Granularity::Week => ts.format("%Y-W%V").to_string(),
            Granularity::Month => ts.format("%Y-%m").to_string(),
            Granularity::Quarter => format!("{}-Q{}", ts.year(), (ts.month() - 1) / 3 + 1),
            Granularity::Year => ts.format("%Y").to_string(),
        };
        groups.entry(key).or_default().push(entry.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::types::RiskLevel;

    fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_format_period_full_year() {
        assert_eq!(format_period(dt(2026, 1, 1), dt(2026, 12, 31)), "2026");
    }

    #[test]
    fn test_format_period_quarter() {
        assert_eq!(format_period(dt(2026, 1, 1), dt(2026, 3, 31)), "2026-Q1");
        assert_eq!(format_period(dt(2026, 10, 1), dt(2026, 12, 31)), "2026-Q4");
        assert_eq!(format_period(dt(2025, 10, 1), dt(2025, 12, 30)), "2025-10-01 to 2025-12-30");
    }

    #[test]
    fn test_format_period_month() {
        assert_eq!(format_period(dt(2026, 1, 1), dt(2026, 1, 31)), "Jan 2026");
        assert_eq!(format_period(dt(2026, 2, 1), dt(2026, 2, 28)), "Feb 2026");
    }

    #[test]
    fn test_format_period_plain_range() {
        assert_eq!(
            format_period(dt(2026, 1, 5), dt(2026, 2, 10)),
            "2026-01-05 to 2026-02-10"
        );
        assert_eq!(
            format_period(dt(2025, 12, 1), dt(2026, 1, 31)),
            "2025-12-01 to 2026-01-31"
        );
    }

    #[test]
    fn test_parse_period_quarter() {
        let (start, end) = parse_period("2026-Q1").unwrap();
        assert_eq!(start, dt(2026, 1, 1));
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_period_year() {
        let (start, end) = parse_period("2026").unwrap();
        assert_eq!(start, dt(2026, 1, 1));
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_period_month_names() {
        let (start, end) = parse_period("Jan 2026").unwrap();
        assert_eq!(start, dt(2026, 1, 1));
        assert_eq!(end.day(), 31);

        let (start, _) = parse_period("february 2024").unwrap();
        assert_eq!(start, dt(2024, 2, 1));
    }

    #[test]
    fn test_parse_period_explicit_range() {
        let (start, end) = parse_period("2026-01-01 to 2026-03-15").unwrap();
        assert_eq!(start, dt(2026, 1, 1));
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 15, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_period_single_day() {
        let (start, end) = parse_period("2026-06-15").unwrap();
        assert_eq!(start, dt(2026, 6, 15));
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 6, 15, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_period_rejects_garbage() {
        assert!(parse_period("last tuesday").is_err());
        assert!(parse_period("2026-Q5").is_err());
        assert!(parse_period("Smarch 2026").is_err());
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for label in ["2026-Q1", "2026", "Jan 2026", "2026-01-05 to 2026-02-10"] {
            let (start, end) = parse_period(label).unwrap();
            assert_eq!(format_period(start, end), label);
        }
    }

    #[test]
    fn test_severity_weight_table() {
        assert_eq!(severity_weight("critical"), 10);
        assert_eq!(severity_weight("HIGH"), 5);
        assert_eq!(severity_weight(RiskLevel::High), 5);
        assert_eq!(severity_weight("medium"), 2);
        assert_eq!(severity_weight("low"), 1);
        assert_eq!(severity_weight("info"), 1);
        assert_eq!(severity_weight("mystery"), 1);
    }

    #[test]
    fn test_group_by_date_buckets() {
        let entries = vec![
            AuditEntry::new("e1", "inference", "u", "a").with_timestamp(dt(2026, 1, 5)),
            AuditEntry::new("e2", "inference", "u", "a").with_timestamp(dt(2026, 1, 20)),
            AuditEntry::new("e3", "inference", "u", "a").with_timestamp(dt(2026, 4, 2)),
        ];

        let by_month = group_by_date(&entries, Granularity::Month);
        let keys: Vec<_> = by_month.keys().cloned().collect();
        assert_eq!(keys, vec!["2026-01", "2026-04"]);
        assert_eq!(by_month["2026-01"].len(), 2);

        let by_quarter = group_by_date(&entries, Granularity::Quarter);
        assert_eq!(by_quarter["2026-Q1"].len(), 2);
        assert_eq!(by_quarter["2026-Q2"].len(), 1);

        let by_day = group_by_date(&entries, Granularity::Day);
        assert_eq!(by_day.len(), 3);
    }
}
