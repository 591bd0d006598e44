//! The [`OperationResult`] value: classification, inspection and projections.
//!
//! An [`OperationResult`] is either a success, holding the current primary value
//! and the named resources accumulated so far, or a failure, holding the
//! operation outcome that stopped the pipeline. The `operate*`
//! combinators are methods on the same type.
//!
//! ## Classification
//!
//! A single resource is a failure when it is an operation outcome carrying at
//! least one issue of severity `error` or `fatal`. Everything else, including
//! outcomes with only `information` or `warning` issues and outcomes with no
//! issues at all, is a success.
//!
//! A collection is always a success, whatever its elements are. Only a single
//! resource can be an operation outcome, and a collection never is one.

use resource::{parameter_name, DomainResource, Resource};
use tracing::debug;

use crate::holder::{to_bundle, to_parameters, ResourceHolder};

/// Name given to the holders of an empty collection.
pub const DEFAULT_COLLECTION_NAME: &str = "resource";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum State<T> {
    Success {
        primary: T,
        holders: Vec<ResourceHolder>,
    },
    Failure {
        outcome: Resource,
    },
}

/// Result of a chain of resource-producing operations.
///
/// Built with [`OperationResult::of`] (or one of its siblings), advanced with
/// the `operate*` combinators, and read with [`OperationResult::as_parameters`]
/// or [`OperationResult::as_bundle`].
///
/// Combinators take `self` by value. To branch a pipeline, clone the
/// intermediate result; each clone owns its own holder history.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct OperationResult<T> {
    pub(crate) state: State<T>,
}

impl<T> OperationResult<T> {
    pub(crate) fn success(primary: T, holders: Vec<ResourceHolder>) -> Self {
        Self {
            state: State::Success { primary, holders },
        }
    }

    pub(crate) fn failure(outcome: Resource) -> Self {
        Self {
            state: State::Failure { outcome },
        }
    }

    /// Returns `true` if no step has failed.
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success { .. })
    }

    /// Returns `true` if some step produced an error outcome.
    pub fn is_failure(&self) -> bool {
        matches!(self.state, State::Failure { .. })
    }

    /// Returns the current primary value, or `None` on failure.
    pub fn primary(&self) -> Option<&T> {
        match &self.state {
            State::Success { primary, .. } => Some(primary),
            State::Failure { .. } => None,
        }
    }

    /// Returns the accumulated holders, most recent first. Empty on failure.
    pub fn holders(&self) -> &[ResourceHolder] {
        match &self.state {
            State::Success { holders, .. } => holders,
            State::Failure { .. } => &[],
        }
    }

    /// Consumes the result and returns the failing outcome, if any.
    pub fn into_outcome(self) -> Option<Resource> {
        match self.state {
            State::Success { .. } => None,
            State::Failure { outcome } => Some(outcome),
        }
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    /// Projects the result into a `Parameters` document.
    ///
    /// On success every holder becomes one slot under its name, in history
    /// order. On failure the stored outcome is returned as is.
    pub fn as_parameters(&self) -> Resource {
        match &self.state {
            State::Success { holders, .. } => Resource::Parameters(to_parameters(holders)),
            State::Failure { outcome } => outcome.clone(),
        }
    }

    /// Projects the result into a `collection` Bundle.
    ///
    /// On success every holder becomes one entry, in history order, without its
    /// name. On failure the stored outcome is returned as is.
    pub fn as_bundle(&self) -> Resource {
        match &self.state {
            State::Success { holders, .. } => Resource::Bundle(to_bundle(holders)),
            State::Failure { outcome } => outcome.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

impl<T: DomainResource> OperationResult<T> {
    /// Classifies a resource, naming it after its lowercased type tag.
    pub fn of(resource: T) -> Self {
        Self::classify(resource, None)
    }

    /// Classifies a resource under an explicit name.
    pub fn of_named(resource: T, name: impl Into<String>) -> Self {
        Self::classify(resource, Some(name.into()))
    }

    pub(crate) fn classify(resource: T, name: Option<String>) -> Self {
        if is_error_outcome(&resource) {
            debug!(
                type_tag = resource.type_tag(),
                issues = resource.issues().len(),
                "Classified outcome as failure"
            );
            return Self::failure(resource.into());
        }

        let name = name.unwrap_or_else(|| parameter_name(&resource));
        debug!(name = %name, type_tag = resource.type_tag(), "Classified resource as success");
        let holder = ResourceHolder::new(name, resource.clone());
        Self::success(resource, vec![holder])
    }
}

impl<T: DomainResource> OperationResult<Vec<T>> {
    /// Wraps a collection, naming every element after the first element's
    /// lowercased type tag.
    ///
    /// Never produces a failure, even when elements are error outcomes.
    pub fn of_collection(resources: Vec<T>) -> Self {
        Self::classify_collection(resources, None)
    }

    /// Wraps a collection, naming every element `name`.
    pub fn of_collection_named(resources: Vec<T>, name: impl Into<String>) -> Self {
        Self::classify_collection(resources, Some(name.into()))
    }

    pub(crate) fn classify_collection(resources: Vec<T>, name: Option<String>) -> Self {
        let name = name.unwrap_or_else(|| {
            resources
                .first()
                .map(parameter_name)
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string())
        });

        let holders: Vec<ResourceHolder> = resources
            .iter()
            .map(|resource| ResourceHolder::new(name.clone(), resource.clone()))
            .collect();
        debug!(name = %name, count = holders.len(), "Classified collection as success");
        Self::success(resources, holders)
    }
}

fn is_error_outcome<R: DomainResource>(resource: &R) -> bool {
    resource.is_outcome_kind()
        && !resource.issues().is_empty()
        && resource.issues().iter().any(|issue| issue.severity().is_error())
}
