//! JSON output formatting

use serde_json::{json, Value};

use crate::engine::SidebarSnapshot;
use crate::output::formatter::ReplayReport;

pub fn format_json(snapshot: &SidebarSnapshot) -> String {
    let data: Value = serde_json::to_value(snapshot).unwrap_or(json!(null));
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_report_json(report: &ReplayReport) -> String {
    let data = json!({
        "consistent": report.is_consistent(),
        "processed": report.processed,
        "failed": report.failed,
        "violation": report.violation,
        "snapshot": serde_json::to_value(&report.snapshot).unwrap_or(json!(null)),
    });
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
