//! Output formatting

use serde::Serialize;

use crate::engine::SidebarSnapshot;
use crate::output::human::{format_human, format_report_human};
use crate::output::json::{format_json, format_report_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Outcome of replaying a fixture
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub snapshot: SidebarSnapshot,
    /// Notifications handled successfully
    pub processed: usize,
    /// Notifications dropped because their handler failed
    pub failed: usize,
    /// Invariant violation found after the replay, if any
    pub violation: Option<String>,
}

impl ReplayReport {
    pub fn is_consistent(&self) -> bool {
        self.violation.is_none()
    }
}

pub fn format_output(snapshot: &SidebarSnapshot, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(snapshot),
        OutputFormat::Json => format_json(snapshot),
    }
}

pub fn format_report(report: &ReplayReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_report_human(report),
        OutputFormat::Json => format_report_json(report),
    }
}
