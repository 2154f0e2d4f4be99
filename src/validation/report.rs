//! The aggregated output of a validation pass: `is_valid` plus every issue
//! found, serializable to the four equivalent export formats named in the
//! external interface.
use serde::{Deserialize, Serialize};

use crate::validation::issue::{Issue, Severity};

/// `is_valid` is false iff any issue has severity `Error` or `Critical`.
/// Immutable once returned to the driver; each refinement iteration produces
/// a new report rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<Issue>,
    /// Unix timestamp (seconds) supplied by the caller, not read from the
    /// system clock here: the pipeline's determinism requirement means two
    /// runs of `run()` on identical input must produce byte-equal reports,
    /// so wall-clock time cannot originate inside the library.
    pub timestamp: u64,
    /// Set by the driver when a refinement loop stops because the budget or
    /// deadline was reached rather than because a fixed point was found.
    pub exhausted: bool,
}

impl ValidationReport {
    pub fn new(issues: Vec<Issue>, timestamp: u64) -> Self {
        let is_valid = !issues.iter().any(|i| i.severity.is_blocking());
        Self { is_valid, issues, timestamp, exhausted: false }
    }

    pub fn with_exhausted(mut self, exhausted: bool) -> Self {
        self.exhausted = exhausted;
        self
    }

    pub fn issues_at_or_above(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity >= severity)
    }

    pub fn count_at_or_above(&self, severity: Severity) -> usize {
        self.issues_at_or_above(severity).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("severity,category,message,suggestion,affected_components,affected_nets,documentation_ref\n");
        for issue in &self.issues {
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                issue.severity,
                issue.category,
                csv_escape(&issue.message),
                csv_escape(issue.suggestion.as_deref().unwrap_or("")),
                csv_escape(&join_components(&issue.affected_components)),
                csv_escape(&issue.affected_nets.join(";")),
                csv_escape(issue.documentation_ref.as_deref().unwrap_or("")),
            ));
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<html><body>\n");
        out.push_str(&format!("<h1>Validation Report ({})</h1>\n", if self.is_valid { "valid" } else { "invalid" }));
        out.push_str("<table border=\"1\">\n<tr><th>Severity</th><th>Category</th><th>Message</th><th>Suggestion</th></tr>\n");
        for issue in &self.issues {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                issue.severity,
                issue.category,
                html_escape(&issue.message),
                html_escape(issue.suggestion.as_deref().unwrap_or("")),
            ));
        }
        out.push_str("</table>\n</body></html>\n");
        out
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Validation Report ({})\n\n", if self.is_valid { "valid" } else { "invalid" }));
        out.push_str("| Severity | Category | Message | Suggestion |\n");
        out.push_str("|---|---|---|---|\n");
        for issue in &self.issues {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                issue.severity,
                issue.category,
                issue.message,
                issue.suggestion.as_deref().unwrap_or("-"),
            ));
        }
        out
    }
}

fn join_components(ids: &[crate::model::ids::ComponentId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(";")
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::issue::Category;

    #[test]
    fn valid_report_has_no_blocking_issues() {
        let report = ValidationReport::new(vec![Issue::new(Severity::Info, Category::Thermal, "fine")], 0);
        assert!(report.is_valid);
    }

    #[test]
    fn error_issue_makes_report_invalid() {
        let report = ValidationReport::new(vec![Issue::new(Severity::Error, Category::Connectivity, "bad")], 0);
        assert!(!report.is_valid);
    }

    #[test]
    fn csv_escapes_embedded_commas() {
        let report = ValidationReport::new(
            vec![Issue::new(Severity::Warning, Category::Thermal, "hot, near U1")],
            0,
        );
        assert!(report.to_csv().contains("\"hot, near U1\""));
    }

    #[test]
    fn all_four_export_formats_mention_every_issue() {
        let report = ValidationReport::new(vec![Issue::new(Severity::Error, Category::Ground, "loop too large")], 0);
        assert!(report.to_json().unwrap().contains("loop too large"));
        assert!(report.to_csv().contains("loop too large"));
        assert!(report.to_html().contains("loop too large"));
        assert!(report.to_markdown().contains("loop too large"));
    }
}
