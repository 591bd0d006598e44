//! Diagnostic issues carried by [`crate::OperationOutcome`] resources.
//!
//! The only part of an [`Issue`] the pipeline inspects is its
//! [`IssueSeverity`]; the remaining fields are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of an [`Issue`], using the FHIR `IssueSeverity` value set.
///
/// Declared from most to least severe so the derived ordering places
/// [`IssueSeverity::Fatal`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// The issue caused the action to fail and no further checking could be performed.
    Fatal,
    /// The issue is sufficiently important to cause the action to fail.
    Error,
    /// The issue is not important enough to cause the action to fail.
    Warning,
    /// Informational message only.
    Information,
}

impl IssueSeverity {
    /// Returns `true` for severities that fail an operation (`Fatal`, `Error`).
    pub fn is_error(self) -> bool {
        matches!(self, IssueSeverity::Fatal | IssueSeverity::Error)
    }

    /// Returns the wire code of this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueSeverity::Fatal => "fatal",
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Information => "information",
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

/// A single diagnostic entry of an operation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// How severe the issue is.
    pub severity: IssueSeverity,

    /// Issue type code (e.g. `"processing"`, `"not-found"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Free-text diagnostic detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,

    /// Unmodelled issue fields (`details`, `expression`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Creates an issue with the given severity and no further detail.
    pub fn new(severity: IssueSeverity) -> Self {
        Self {
            severity,
            code: None,
            diagnostics: None,
            extra: Map::new(),
        }
    }

    /// Sets the issue type code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the free-text diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: impl Into<String>) -> Self {
        self.diagnostics = Some(diagnostics.into());
        self
    }

    /// Returns the severity of this issue.
    pub fn severity(&self) -> IssueSeverity {
        self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_and_error_are_errors() {
        assert!(IssueSeverity::Fatal.is_error());
        assert!(IssueSeverity::Error.is_error());
        assert!(!IssueSeverity::Warning.is_error());
        assert!(!IssueSeverity::Information.is_error());
    }

    #[test]
    fn severity_serialises_lowercase() {
        let json = serde_json::to_string(&IssueSeverity::Information).unwrap();
        assert_eq!(json, "\"information\"");
        let back: IssueSeverity = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(back, IssueSeverity::Fatal);
    }

    #[test]
    fn issue_omits_absent_detail() {
        let issue = Issue::new(IssueSeverity::Warning).with_code("processing");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "severity": "warning", "code": "processing" })
        );
    }
}
