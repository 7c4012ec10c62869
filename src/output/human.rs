//! Human-readable output formatting

use crate::engine::SidebarSnapshot;
use crate::output::formatter::ReplayReport;

pub fn format_human(snapshot: &SidebarSnapshot) -> String {
    let title = if snapshot.incognito {
        format!("Containers (window {}, private)", snapshot.window_id)
    } else {
        format!("Containers (window {})", snapshot.window_id)
    };
    let mut output = format!("{}\n{}\n", title, "-".repeat(title.len()));

    if snapshot.entries.is_empty() {
        output.push_str("No containers\n");
    } else {
        output.push_str(&format!(
            "{:<28} {:<20} {:<12} {:<10}\n",
            "ID", "NAME", "ICON", "COLOR"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for entry in &snapshot.entries {
            output.push_str(&format!(
                "{:<28} {:<20} {:<12} {:<10}\n",
                truncate(&entry.id, 28),
                truncate(&entry.name, 20),
                truncate(&entry.icon, 12),
                truncate(&entry.color, 10)
            ));
        }
    }

    output.push_str(&format!("\nTemporary containers: {}\n", snapshot.temporary.len()));
    for id in &snapshot.temporary {
        output.push_str(&format!("  {}\n", id));
    }

    output
}

pub fn format_report_human(report: &ReplayReport) -> String {
    let mut output = format_human(&report.snapshot);
    output.push_str(&format!(
        "\nNotifications: {} handled, {} failed\n",
        report.processed, report.failed
    ));
    match &report.violation {
        Some(violation) => output.push_str(&format!("Invariant: VIOLATED ({})\n", violation)),
        None => output.push_str("Invariant: ok\n"),
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EntrySnapshot;

    fn snapshot() -> SidebarSnapshot {
        SidebarSnapshot {
            window_id: 4,
            incognito: false,
            entries: vec![EntrySnapshot {
                id: "firefox-container-1".to_string(),
                name: "Personal".to_string(),
                icon: "fingerprint".to_string(),
                color: "blue".to_string(),
                color_code: "#37adff".to_string(),
            }],
            temporary: vec!["firefox-container-9".to_string()],
            taken_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_format_human_lists_entries() {
        let output = format_human(&snapshot());
        assert!(output.starts_with("Containers (window 4)"));
        assert!(output.contains("Personal"));
        assert!(output.contains("Temporary containers: 1"));
        assert!(output.contains("  firefox-container-9"));
    }

    #[test]
    fn test_format_report_violation() {
        let report = ReplayReport {
            snapshot: snapshot(),
            processed: 2,
            failed: 1,
            violation: Some("'x' is rendered 2 times".to_string()),
        };
        let output = format_report_human(&report);
        assert!(output.contains("2 handled, 1 failed"));
        assert!(output.contains("Invariant: VIOLATED"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long container name", 10), "a very ...");
    }
}
