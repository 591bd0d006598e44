//! Business resource kinds and the operation outcome kind.
//!
//! Only the fields exercised by operations built on this crate are modelled;
//! each struct follows the FHIR R4 JSON shape for the fields it does carry and
//! keeps the rest in its `extra` map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Issue;

// ---------------------------------------------------------------------------
// Patient
// ---------------------------------------------------------------------------

/// A human name as used by [`Patient`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    /// Full text representation of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Family name (surname).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Given names, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HumanName {
    /// Creates a name that only carries its text representation.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Demographics of a person receiving care.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Logical id of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Names the patient is known by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patient {
    /// Creates a patient with a single text name.
    pub fn named(text: impl Into<String>) -> Self {
        Self {
            name: vec![HumanName::text(text)],
            ..Self::default()
        }
    }

    /// Sets the logical id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

/// Lifecycle state of an [`Appointment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Proposed,
    Pending,
    Booked,
    Arrived,
    Fulfilled,
    Cancelled,
    #[serde(rename = "noshow")]
    NoShow,
    EnteredInError,
    CheckedIn,
    Waitlist,
}

/// Whether a participant has accepted an [`Appointment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipationStatus {
    Accepted,
    Declined,
    Tentative,
    NeedsAction,
}

/// A literal or display-only reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Literal reference, e.g. `"Patient/123"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Text alternative for the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentParticipant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ParticipationStatus>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A booking of a healthcare event among patients and practitioners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Logical id of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,

    /// When the appointment is to take place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant: Vec<AppointmentParticipant>,

    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Appointment {
    /// Creates a booked appointment with the given participant displays.
    pub fn booked<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: Some(AppointmentStatus::Booked),
            participant: participants
                .into_iter()
                .map(|display| AppointmentParticipant {
                    actor: Some(Reference {
                        display: Some(display.into()),
                        ..Reference::default()
                    }),
                    status: Some(ParticipationStatus::Accepted),
                    extra: Map::new(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Sets the logical id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the start time.
    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }
}

// ---------------------------------------------------------------------------
// OperationOutcome
// ---------------------------------------------------------------------------

/// A collection of issues describing the result of an operation.
///
/// This is the only resource kind that can stop a pipeline: an outcome with at
/// least one issue of severity `error` or `fatal` is classified as failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    /// Logical id of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Issues in the order they were reported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issue: Vec<Issue>,

    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OperationOutcome {
    /// Creates an outcome holding the given issues.
    pub fn new(issue: Vec<Issue>) -> Self {
        Self {
            issue,
            ..Self::default()
        }
    }

    /// Appends an issue.
    pub fn add_issue(&mut self, issue: Issue) -> &mut Self {
        self.issue.push(issue);
        self
    }

    /// Returns `true` if the outcome carries any issue.
    pub fn has_issue(&self) -> bool {
        !self.issue.is_empty()
    }

    /// Returns `true` if any issue is of severity `error` or `fatal`.
    pub fn has_error(&self) -> bool {
        self.issue.iter().any(|issue| issue.severity.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueSeverity;

    #[test]
    fn outcome_without_issues_has_no_error() {
        let outcome = OperationOutcome::default();
        assert!(!outcome.has_issue());
        assert!(!outcome.has_error());
    }

    #[test]
    fn outcome_error_detection_looks_at_every_issue() {
        let outcome = OperationOutcome::new(vec![
            Issue::new(IssueSeverity::Information),
            Issue::new(IssueSeverity::Warning),
            Issue::new(IssueSeverity::Fatal),
        ]);
        assert!(outcome.has_error());

        let mut benign = OperationOutcome::default();
        benign
            .add_issue(Issue::new(IssueSeverity::Information))
            .add_issue(Issue::new(IssueSeverity::Warning));
        assert!(benign.has_issue());
        assert!(!benign.has_error());
    }

    #[test]
    fn appointment_status_uses_fhir_codes() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"noshow\"");
        let json = serde_json::to_string(&AppointmentStatus::EnteredInError).unwrap();
        assert_eq!(json, "\"entered-in-error\"");
    }
}
