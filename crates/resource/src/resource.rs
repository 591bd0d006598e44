//! The polymorphic [`Resource`] value and the capabilities shared by every kind.
//!
//! [`DomainResource`] is the capability set the pipeline classifier relies on:
//! a type tag, whether the value is an operation outcome, and its issues.
//! [`FromResource`] is the reverse direction, used to pull a concrete kind back
//! out of a [`Resource`] without any runtime reflection.

use serde::{Deserialize, Serialize};

use crate::{Appointment, Bundle, Issue, OperationOutcome, Parameters, Patient};

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// Any resource the pipeline can hold, tagged by `resourceType` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Appointment(Appointment),
    OperationOutcome(OperationOutcome),
    Parameters(Parameters),
    Bundle(Bundle),
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Capabilities every resource kind exposes to the pipeline.
///
/// The defaults describe a plain business resource; only the outcome kind
/// overrides [`DomainResource::is_outcome_kind`] and [`DomainResource::issues`].
pub trait DomainResource: Clone + Into<Resource> {
    /// Resource type name, e.g. `"Patient"`.
    fn type_tag(&self) -> &str;

    /// Returns `true` if this value is an operation outcome.
    fn is_outcome_kind(&self) -> bool {
        false
    }

    /// Issues carried by the value, in reported order. Empty unless this is an
    /// operation outcome.
    fn issues(&self) -> &[Issue] {
        &[]
    }
}

/// Borrowing a concrete kind back out of a [`Resource`].
pub trait FromResource: Sized {
    /// Type tag of the kind this implementation extracts.
    const TYPE_TAG: &'static str;

    /// Returns the inner value if `resource` is of this kind.
    fn from_resource(resource: &Resource) -> Option<&Self>;
}

impl DomainResource for Resource {
    fn type_tag(&self) -> &str {
        match self {
            Resource::Patient(r) => r.type_tag(),
            Resource::Appointment(r) => r.type_tag(),
            Resource::OperationOutcome(r) => r.type_tag(),
            Resource::Parameters(r) => r.type_tag(),
            Resource::Bundle(r) => r.type_tag(),
        }
    }

    fn is_outcome_kind(&self) -> bool {
        matches!(self, Resource::OperationOutcome(_))
    }

    fn issues(&self) -> &[Issue] {
        match self {
            Resource::OperationOutcome(outcome) => &outcome.issue,
            _ => &[],
        }
    }
}

impl DomainResource for OperationOutcome {
    fn type_tag(&self) -> &str {
        <Self as FromResource>::TYPE_TAG
    }

    fn is_outcome_kind(&self) -> bool {
        true
    }

    fn issues(&self) -> &[Issue] {
        &self.issue
    }
}

// ---------------------------------------------------------------------------
// Macro for concrete kinds.
// Generates: From<$kind> for Resource, FromResource and, for plain business
// kinds, DomainResource.
// ---------------------------------------------------------------------------
macro_rules! resource_kind {
    ($kind:ident) => {
        resource_kind!(@convert $kind);

        impl DomainResource for $kind {
            fn type_tag(&self) -> &str {
                <Self as FromResource>::TYPE_TAG
            }
        }
    };
    (@convert $kind:ident) => {
        impl From<$kind> for Resource {
            fn from(value: $kind) -> Self {
                Resource::$kind(value)
            }
        }

        impl FromResource for $kind {
            const TYPE_TAG: &'static str = stringify!($kind);

            fn from_resource(resource: &Resource) -> Option<&Self> {
                match resource {
                    Resource::$kind(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

resource_kind!(Patient);
resource_kind!(Appointment);
resource_kind!(Parameters);
resource_kind!(Bundle);
resource_kind!(@convert OperationOutcome);

/// Returns the default parameter name of a resource: its lowercased type tag.
pub fn parameter_name<R: DomainResource>(resource: &R) -> String {
    resource.type_tag().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IssueSeverity;

    #[test]
    fn type_tag_matches_wire_discriminator() {
        let resource: Resource = Patient::named("Ada").into();
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["resourceType"], resource.type_tag());
    }

    #[test]
    fn only_outcome_is_outcome_kind() {
        let outcome = OperationOutcome::new(vec![Issue::new(IssueSeverity::Error)]);
        assert!(outcome.is_outcome_kind());
        assert_eq!(outcome.issues().len(), 1);

        let wrapped = Resource::from(outcome);
        assert!(wrapped.is_outcome_kind());
        assert_eq!(wrapped.issues()[0].severity(), IssueSeverity::Error);

        let patient = Resource::from(Patient::default());
        assert!(!patient.is_outcome_kind());
        assert!(patient.issues().is_empty());
    }

    #[test]
    fn parameter_name_is_lowercased_type_tag() {
        assert_eq!(parameter_name(&Patient::default()), "patient");
        assert_eq!(parameter_name(&OperationOutcome::default()), "operationoutcome");
        assert_eq!(parameter_name(&Resource::from(Bundle::default())), "bundle");
    }

    #[test]
    fn from_resource_rejects_other_kinds() {
        let resource = Resource::from(Appointment::default());
        assert!(Appointment::from_resource(&resource).is_some());
        assert!(Patient::from_resource(&resource).is_none());
    }
}
