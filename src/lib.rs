//! complykit - an AI-compliance audit toolkit
//!
//! Records AI-interaction audit entries, evaluates them against rule sets
//! drawn from regulatory frameworks, and renders the results into reports.

pub mod audit;
pub mod core;
pub mod frameworks;
pub mod observability;
pub mod reports;
pub mod utils;
