//! Named resources accumulated by a successful operation result.

use resource::{
    to_bundle_entry, to_parameter_component, Bundle, BundleEntry, ParameterComponent, Parameters,
    Resource,
};

/// A resource paired with the name it is projected under.
///
/// Names are not unique within a history; duplicates project to separate slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHolder {
    name: String,
    resource: Resource,
}

impl ResourceHolder {
    /// Creates a holder.
    pub fn new(name: impl Into<String>, resource: impl Into<Resource>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
        }
    }

    /// Name the resource is projected under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The held resource.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Wraps the held resource as a [`Parameters`] slot under the holder's name.
    pub fn to_parameter_component(&self) -> ParameterComponent {
        to_parameter_component(self.resource.clone(), self.name.clone())
    }

    /// Wraps the held resource as a [`Bundle`] entry; the name is dropped.
    pub fn to_bundle_entry(&self) -> BundleEntry {
        to_bundle_entry(self.resource.clone())
    }
}

/// Projects a holder history into a [`Parameters`] document, one slot per holder.
pub(crate) fn to_parameters(holders: &[ResourceHolder]) -> Parameters {
    Parameters::new(holders.iter().map(ResourceHolder::to_parameter_component).collect())
}

/// Projects a holder history into a `collection` [`Bundle`], one entry per holder.
pub(crate) fn to_bundle(holders: &[ResourceHolder]) -> Bundle {
    Bundle::collection(holders.iter().map(ResourceHolder::to_bundle_entry).collect())
}

#[cfg(test)]
mod tests {
    use resource::Patient;

    use super::*;

    #[test]
    fn parameters_keep_duplicate_names_as_separate_slots() {
        let holders = vec![
            ResourceHolder::new("patient", Patient::named("first")),
            ResourceHolder::new("patient", Patient::named("second")),
        ];

        let params = to_parameters(&holders);

        assert_eq!(params.parameter.len(), 2);
        assert!(params.parameter.iter().all(|p| p.name == "patient"));
        assert_eq!(
            params.parameter[1].resource.as_deref(),
            Some(&Resource::from(Patient::named("second")))
        );
    }

    #[test]
    fn bundle_drops_names_and_keeps_order() {
        let holders = vec![
            ResourceHolder::new("a", Patient::named("first")),
            ResourceHolder::new("b", Patient::named("second")),
        ];

        let bundle = to_bundle(&holders);
        let resources: Vec<&Resource> = bundle.resources().collect();

        assert_eq!(
            resources,
            vec![
                &Resource::from(Patient::named("first")),
                &Resource::from(Patient::named("second")),
            ]
        );
    }
}
