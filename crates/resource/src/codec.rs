//! JSON encoding of resources and projected documents.

use crate::{CodecError, Resource};

/// Encodes a resource as compact JSON.
pub fn to_json(resource: &Resource) -> Result<String, CodecError> {
    serde_json::to_string(resource).map_err(CodecError::Encode)
}

/// Encodes a resource as indented JSON.
pub fn to_json_pretty(resource: &Resource) -> Result<String, CodecError> {
    serde_json::to_string_pretty(resource).map_err(CodecError::Encode)
}

/// Decodes a resource from JSON, dispatching on its `resourceType` field.
pub fn from_json(json: &str) -> Result<Resource, CodecError> {
    serde_json::from_str(json).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::{
        to_bundle_entry, to_parameter_component, Appointment, Bundle, Issue, IssueSeverity,
        OperationOutcome, Parameters, Patient,
    };

    #[test]
    fn parameters_encode_with_nested_resource() {
        let params = Parameters::new(vec![to_parameter_component(
            Patient::named("John Doe").with_id("p1"),
            "patient",
        )]);

        let value: serde_json::Value =
            serde_json::from_str(&to_json(&params.into()).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "resourceType": "Parameters",
                "parameter": [{
                    "name": "patient",
                    "resource": {
                        "resourceType": "Patient",
                        "id": "p1",
                        "name": [{ "text": "John Doe" }]
                    }
                }]
            })
        );
    }

    #[test]
    fn bundle_defaults_to_collection_type() {
        let bundle = Bundle::collection(vec![to_bundle_entry(OperationOutcome::new(vec![
            Issue::new(IssueSeverity::Error),
        ]))]);

        let value: serde_json::Value =
            serde_json::from_str(&to_json(&bundle.into()).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "resourceType": "Bundle",
                "type": "collection",
                "entry": [{
                    "resource": {
                        "resourceType": "OperationOutcome",
                        "issue": [{ "severity": "error" }]
                    }
                }]
            })
        );
    }

    #[test]
    fn decode_restores_appointment_start() {
        let json = r#"{
            "resourceType": "Appointment",
            "status": "booked",
            "start": "2024-03-01T09:30:00Z",
            "participant": [{ "actor": { "display": "Dr. Who" }, "status": "accepted" }]
        }"#;

        let resource = from_json(json).unwrap();
        let expected = Appointment::booked(["Dr. Who"])
            .starting_at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        assert_eq!(resource, Resource::Appointment(expected));
    }

    #[test]
    fn unmodelled_fields_survive_decode_and_encode() {
        let input = json!({
            "resourceType": "Patient",
            "id": "p1",
            "gender": "female",
            "birthDate": "1970-01-01",
            "name": [{ "text": "Ann", "use": "official" }]
        });

        let resource = from_json(&input.to_string()).unwrap();
        let Resource::Patient(patient) = &resource else {
            panic!("expected a Patient, got {resource:?}");
        };
        assert_eq!(patient.extra["gender"], "female");
        assert_eq!(patient.name[0].extra["use"], "official");

        let output: serde_json::Value =
            serde_json::from_str(&to_json(&resource).unwrap()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn unmodelled_fields_survive_inside_documents() {
        let input = json!({
            "resourceType": "Parameters",
            "meta": { "versionId": "3" },
            "parameter": [
                { "name": "count", "valueInteger": 2 },
                {
                    "name": "outcome",
                    "resource": {
                        "resourceType": "OperationOutcome",
                        "issue": [{
                            "severity": "warning",
                            "code": "processing",
                            "expression": ["Patient.name"]
                        }]
                    }
                }
            ]
        });

        let resource = from_json(&input.to_string()).unwrap();
        let output: serde_json::Value =
            serde_json::from_str(&to_json(&resource).unwrap()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn decode_rejects_unknown_resource_type() {
        let err = from_json(r#"{ "resourceType": "Spaceship" }"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
