//! The two composite document shapes: [`Parameters`] and [`Bundle`].
//!
//! [`Parameters`] is a flat list of named slots; names are not unique and
//! duplicates are kept as separate slots. [`Bundle`] is an ordered list of
//! unnamed entries. Both are themselves resources and can be nested.
//!
//! The adapters [`to_parameter_component`] and [`to_bundle_entry`] wrap a single
//! resource into one slot or one entry respectively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FromResource, ParameterError, Resource};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// One named slot of a [`Parameters`] document.
///
/// A slot holds either a resource or a primitive string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterComponent {
    /// Slot name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Box<Resource>>,

    /// Other `value[x]` choices and `part`, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParameterComponent {
    /// Creates a slot holding a string value.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_string: Some(value.into()),
            resource: None,
            extra: Map::new(),
        }
    }
}

/// A flat, name-keyed document of slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Logical id of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Slots in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<ParameterComponent>,

    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parameters {
    /// Creates a document from the given slots, preserving their order.
    pub fn new(parameter: Vec<ParameterComponent>) -> Self {
        Self {
            parameter,
            ..Self::default()
        }
    }

    /// Appends a slot.
    pub fn add_parameter(&mut self, component: ParameterComponent) -> &mut Self {
        self.parameter.push(component);
        self
    }

    /// Returns the resource stored under `name`, requiring exactly one slot
    /// with that name holding a resource of kind `T`.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NotFound`] when no slot has the name.
    /// - [`ParameterError::Ambiguous`] when more than one slot has the name.
    /// - [`ParameterError::NoResource`] when the slot holds a primitive value.
    /// - [`ParameterError::TypeMismatch`] when the resource is a different kind.
    pub fn get_resource<T>(&self, name: &str) -> Result<T, ParameterError>
    where
        T: FromResource + Clone,
    {
        let mut matching = self.parameter.iter().filter(|p| p.name == name);
        let component = matching.next().ok_or_else(|| ParameterError::NotFound {
            name: name.to_string(),
        })?;

        let extra = matching.count();
        if extra > 0 {
            return Err(ParameterError::Ambiguous {
                name: name.to_string(),
                count: extra + 1,
            });
        }

        let resource = component
            .resource
            .as_deref()
            .ok_or_else(|| ParameterError::NoResource {
                name: name.to_string(),
            })?;

        T::from_resource(resource)
            .cloned()
            .ok_or_else(|| ParameterError::TypeMismatch {
                name: name.to_string(),
                expected: T::TYPE_TAG,
                found: crate::DomainResource::type_tag(resource).to_string(),
            })
    }

    /// Returns every resource of kind `T` stored under `name`, in slot order.
    ///
    /// Slots of another kind, or holding primitive values, are skipped.
    pub fn get_resources<T>(&self, name: &str) -> Vec<T>
    where
        T: FromResource + Clone,
    {
        self.parameter
            .iter()
            .filter(|p| p.name == name)
            .filter_map(|p| p.resource.as_deref())
            .filter_map(T::from_resource)
            .cloned()
            .collect()
    }

    /// Returns a new document holding only the slots whose name is listed.
    pub fn filter<S: AsRef<str>>(&self, names: &[S]) -> Parameters {
        let parameter = self
            .parameter
            .iter()
            .filter(|p| names.iter().any(|n| n.as_ref() == p.name))
            .cloned()
            .collect();
        Parameters {
            id: self.id.clone(),
            parameter,
            extra: self.extra.clone(),
        }
    }
}

/// Wraps a resource as a named [`Parameters`] slot.
pub fn to_parameter_component(
    resource: impl Into<Resource>,
    name: impl Into<String>,
) -> ParameterComponent {
    ParameterComponent {
        name: name.into(),
        value_string: None,
        resource: Some(Box::new(resource.into())),
        extra: Map::new(),
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Purpose of a [`Bundle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    #[default]
    Collection,
    Searchset,
    Batch,
    Transaction,
}

/// One unnamed entry of a [`Bundle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Box<Resource>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered sequence of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub bundle_type: BundleType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,

    /// Fields not modelled here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bundle {
    /// Creates a `collection` bundle from the given entries.
    pub fn collection(entry: Vec<BundleEntry>) -> Self {
        Self {
            bundle_type: BundleType::Collection,
            entry,
            ..Self::default()
        }
    }

    /// Returns the entry resources in order, skipping empty entries.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().filter_map(|e| e.resource.as_deref())
    }
}

/// Wraps a resource as a [`Bundle`] entry.
pub fn to_bundle_entry(resource: impl Into<Resource>) -> BundleEntry {
    BundleEntry {
        resource: Some(Box::new(resource.into())),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Issue, IssueSeverity, OperationOutcome, Patient};

    fn patient_and_outcome() -> Parameters {
        let mut outcome = OperationOutcome::default();
        outcome.add_issue(Issue::new(IssueSeverity::Information).with_code("informational"));

        let mut params = Parameters::default();
        params
            .add_parameter(to_parameter_component(Patient::named("Mr. Test"), "patient"))
            .add_parameter(to_parameter_component(outcome, "operationOutcome"));
        params
    }

    fn two_patients() -> Parameters {
        Parameters::new(vec![
            to_parameter_component(Patient::named("Mr. Test"), "patient"),
            to_parameter_component(Patient::named("Mr. Test 2"), "patient"),
        ])
    }

    #[test]
    fn get_resource_returns_typed_resource() {
        let patient: Patient = patient_and_outcome().get_resource("patient").unwrap();
        assert_eq!(patient, Patient::named("Mr. Test"));
    }

    #[test]
    fn get_resource_reports_missing_name() {
        let err = patient_and_outcome()
            .get_resource::<Patient>("missing")
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::NotFound {
                name: "missing".into()
            }
        );
    }

    #[test]
    fn get_resource_rejects_duplicate_names() {
        let err = two_patients().get_resource::<Patient>("patient").unwrap_err();
        assert_eq!(
            err,
            ParameterError::Ambiguous {
                name: "patient".into(),
                count: 2
            }
        );
    }

    #[test]
    fn get_resource_rejects_wrong_kind() {
        let err = patient_and_outcome()
            .get_resource::<OperationOutcome>("patient")
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::TypeMismatch {
                name: "patient".into(),
                expected: "OperationOutcome",
                found: "Patient".into(),
            }
        );
    }

    #[test]
    fn get_resource_rejects_primitive_slot() {
        let params = Parameters::new(vec![ParameterComponent::string("name", "stringValue")]);
        let err = params.get_resource::<Patient>("name").unwrap_err();
        assert_eq!(err, ParameterError::NoResource { name: "name".into() });
    }

    #[test]
    fn get_resources_collects_matching_kind_in_order() {
        let patients: Vec<Patient> = two_patients().get_resources("patient");
        assert_eq!(
            patients,
            vec![Patient::named("Mr. Test"), Patient::named("Mr. Test 2")]
        );
    }

    #[test]
    fn get_resources_is_empty_for_other_kind_or_name() {
        assert!(two_patients()
            .get_resources::<OperationOutcome>("patient")
            .is_empty());
        assert!(two_patients()
            .get_resources::<Patient>("relatedPerson")
            .is_empty());
    }

    #[test]
    fn filter_keeps_only_requested_names() {
        let params = patient_and_outcome();

        let only_patient = params.filter(&["patient"]);
        assert_eq!(only_patient.parameter.len(), 1);
        assert_eq!(only_patient.parameter[0].name, "patient");
        assert!(matches!(
            only_patient.parameter[0].resource.as_deref(),
            Some(Resource::Patient(_))
        ));

        let both = params.filter(&["operationOutcome", "patient"]);
        assert_eq!(both.parameter.len(), 2);
        assert_eq!(both.parameter[0].name, "patient");
    }

    #[test]
    fn bundle_resources_preserve_entry_order() {
        let bundle = Bundle::collection(vec![
            to_bundle_entry(Patient::named("first")),
            BundleEntry::default(),
            to_bundle_entry(Patient::named("second")),
        ]);
        let names: Vec<_> = bundle
            .resources()
            .map(|r| match r {
                Resource::Patient(p) => p.name[0].text.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec![Some("first".into()), Some("second".into())]);
    }
}
