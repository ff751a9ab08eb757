//! Period formatting, grouping, and severity helpers.

pub mod helpers;

pub use helpers::{format_period, group_by_date, parse_period, severity_weight, Granularity};
