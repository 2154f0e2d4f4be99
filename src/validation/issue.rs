//! A single finding from a validation rule module: severity, category, a
//! human message, and the optional context a remediation or a user needs to
//! act on it.
use serde::{Deserialize, Serialize};

use crate::model::ids::ComponentId;

/// Ordered from least to most severe, matching `is_valid`'s threshold at
/// `Error`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// `is_valid` is false iff any issue has severity `Error` or `Critical`.
    pub fn is_blocking(self) -> bool {
        self >= Severity::Error
    }

    /// Maps a numeric 0..1 score to a severity bucket at the configured
    /// thresholds (default 0.3/0.7/0.9).
    pub fn from_score(score: f64, thresholds: (f64, f64, f64)) -> Self {
        let (info_t, warn_t, error_t) = thresholds;
        if score >= error_t {
            Severity::Critical
        } else if score >= warn_t {
            Severity::Error
        } else if score >= info_t {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// The rule module a finding came from. One variant per §4.6 module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    GeometricDrc,
    Connectivity,
    PowerDistribution,
    Ground,
    SignalIntegrity,
    Emi,
    Thermal,
    AudioSpecific,
    Manufacturing,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::GeometricDrc => "geometric-drc",
            Category::Connectivity => "connectivity",
            Category::PowerDistribution => "power-distribution",
            Category::Ground => "ground",
            Category::SignalIntegrity => "signal-integrity",
            Category::Emi => "emi",
            Category::Thermal => "thermal",
            Category::AudioSpecific => "audio-specific",
            Category::Manufacturing => "manufacturing",
        };
        f.write_str(s)
    }
}

/// One finding. Built with the `new` + `with_*` builder pattern; every field
/// beyond severity/category/message is optional context for a remediation or
/// a user to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub suggestion: Option<String>,
    pub affected_components: Vec<ComponentId>,
    pub affected_nets: Vec<String>,
    pub documentation_ref: Option<String>,
    /// Free-form supporting data (e.g. which parasitic model a frequency
    /// estimate assumed); not interpreted by the engine.
    pub details: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            suggestion: None,
            affected_components: Vec::new(),
            affected_nets: Vec::new(),
            documentation_ref: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_component(mut self, id: ComponentId) -> Self {
        self.affected_components.push(id);
        self
    }

    pub fn with_net(mut self, name: impl Into<String>) -> Self {
        self.affected_nets.push(name.into());
        self
    }

    pub fn with_doc_ref(mut self, doc_ref: impl Into<String>) -> Self {
        self.documentation_ref = Some(doc_ref.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_and_error_are_blocking() {
        assert!(Severity::Critical.is_blocking());
        assert!(Severity::Error.is_blocking());
        assert!(!Severity::Warning.is_blocking());
        assert!(!Severity::Info.is_blocking());
    }

    #[test]
    fn score_buckets_at_configured_thresholds() {
        let thresholds = (0.3, 0.7, 0.9);
        assert_eq!(Severity::from_score(0.1, thresholds), Severity::Info);
        assert_eq!(Severity::from_score(0.5, thresholds), Severity::Warning);
        assert_eq!(Severity::from_score(0.8, thresholds), Severity::Error);
        assert_eq!(Severity::from_score(0.95, thresholds), Severity::Critical);
    }

    #[test]
    fn builder_accumulates_context() {
        let issue = Issue::new(Severity::Error, Category::Connectivity, "net OUT is not fully connected")
            .with_suggestion("re-route the net with a larger search budget")
            .with_net("OUT")
            .with_doc_ref("validation.connectivity.disconnected");
        assert_eq!(issue.affected_nets, vec!["OUT".to_string()]);
        assert!(issue.suggestion.is_some());
    }
}
