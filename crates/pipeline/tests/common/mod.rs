//! Resource fixtures shared by the pipeline integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use resource::{
    to_parameter_component, Appointment, Issue, IssueSeverity, OperationOutcome, Parameters,
    Patient, Resource,
};

pub fn patient() -> Patient {
    Patient::named("John Doe").with_id("patient-1")
}

pub fn appointment() -> Appointment {
    Appointment::booked(["Dr. Smith"]).with_id("appointment-1")
}

/// An appointment for `patient`, listing the patient's names as participants.
pub fn appointment_for(patient: &Patient) -> Appointment {
    Appointment::booked(patient.name.iter().filter_map(|n| n.text.clone()))
}

pub fn outcome(severity: IssueSeverity) -> OperationOutcome {
    OperationOutcome::new(vec![Issue::new(severity)
        .with_code("processing")
        .with_diagnostics(format!("{severity} raised by fixture"))])
}

pub fn parameters(name: &str, resource: impl Into<Resource>) -> Parameters {
    Parameters::new(vec![to_parameter_component(resource, name)])
}

/// Resources of a projected `Bundle`, in entry order.
pub fn bundle_resources(projection: Resource) -> Vec<Resource> {
    match projection {
        Resource::Bundle(bundle) => bundle.resources().cloned().collect(),
        other => panic!("expected a Bundle projection, got {other:?}"),
    }
}

/// `(name, resource)` pairs of a projected `Parameters` document, in slot order.
pub fn parameter_slots(projection: Resource) -> Vec<(String, Resource)> {
    match projection {
        Resource::Parameters(params) => params
            .parameter
            .into_iter()
            .map(|p| {
                let resource = p.resource.map(|r| *r).expect("slot holds a resource");
                (p.name, resource)
            })
            .collect(),
        other => panic!("expected a Parameters projection, got {other:?}"),
    }
}

/// Counts how often the closures it hands out are invoked.
#[derive(Default)]
pub struct Spy {
    calls: Cell<u32>,
}

impl Spy {
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn hit(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    /// A resource-producing closure that records its invocation.
    pub fn produce(&self) -> impl FnOnce() -> Patient + '_ {
        move || {
            self.hit();
            patient()
        }
    }
}
