//! The `operate*` combinator family of [`OperationResult`].
//!
//! Every combinator follows the same shape: on a failure it returns the failure
//! unchanged without calling its closure; on a success it calls the closure,
//! classifies what it returns, and folds the holder history.
//!
//! Combinators differ along four axes:
//!
//! | Axis | Choices |
//! |------|---------|
//! | Closure input | nothing (`operate`), the primary value (`operate_resource`), the history as `Parameters` (`operate_parameters`) |
//! | Closure output | one resource, or a `Vec` of resources (`*_list`) |
//! | Naming | lowercased type tag, or explicit (`*_named`) |
//! | History | replaced by the new holders, or new holders prepended to it (`*_combined`) |
//!
//! Chained `*_combined` steps therefore read most-recent first.
//!
//! Closures that panic are not caught. The `try_*` combinators accept fallible
//! closures; an `Err` is handed back to the caller and never becomes a failure
//! state.

use resource::{DomainResource, Parameters};
use tracing::{debug, trace};

use crate::holder::{to_parameters, ResourceHolder};
use crate::result::{OperationResult, State};

/// How a combinator folds the previous holder history into the new result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum History {
    /// Keep only the holders produced by this step.
    Replace,
    /// Put the holders produced by this step in front of the previous history.
    Combine,
}

impl<T> OperationResult<T> {
    fn step<R>(
        self,
        history: History,
        next: impl FnOnce(T, &[ResourceHolder]) -> OperationResult<R>,
    ) -> OperationResult<R> {
        match self.state {
            State::Failure { outcome } => {
                trace!(?history, "Skipping step after failure");
                OperationResult::failure(outcome)
            }
            State::Success { primary, holders } => {
                let produced = next(primary, &holders);
                fold(produced, history, holders)
            }
        }
    }

    fn try_step<R, E>(
        self,
        history: History,
        next: impl FnOnce(T, &[ResourceHolder]) -> Result<OperationResult<R>, E>,
    ) -> Result<OperationResult<R>, E> {
        match self.state {
            State::Failure { outcome } => {
                trace!(?history, "Skipping fallible step after failure");
                Ok(OperationResult::failure(outcome))
            }
            State::Success { primary, holders } => {
                let produced = next(primary, &holders)?;
                Ok(fold(produced, history, holders))
            }
        }
    }

    // -----------------------------------------------------------------------
    // No input
    // -----------------------------------------------------------------------

    /// Runs `f` and replaces the history with its result.
    pub fn operate<R: DomainResource>(self, f: impl FnOnce() -> R) -> OperationResult<R> {
        self.step(History::Replace, |_, _| OperationResult::classify(f(), None))
    }

    /// Like [`OperationResult::operate`], naming the new holder `name`.
    pub fn operate_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce() -> R,
    ) -> OperationResult<R> {
        self.step(History::Replace, |_, _| {
            OperationResult::classify(f(), Some(name.into()))
        })
    }

    /// Runs `f` and prepends its result to the history.
    pub fn operate_combined<R: DomainResource>(self, f: impl FnOnce() -> R) -> OperationResult<R> {
        self.step(History::Combine, |_, _| OperationResult::classify(f(), None))
    }

    /// Like [`OperationResult::operate_combined`], naming the new holder `name`.
    pub fn operate_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce() -> R,
    ) -> OperationResult<R> {
        self.step(History::Combine, |_, _| {
            OperationResult::classify(f(), Some(name.into()))
        })
    }

    /// Runs `f` and replaces the history with one holder per returned resource.
    pub fn operate_list<R: DomainResource>(self, f: impl FnOnce() -> Vec<R>) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |_, _| {
            OperationResult::classify_collection(f(), None)
        })
    }

    /// Like [`OperationResult::operate_list`], naming every new holder `name`.
    pub fn operate_list_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce() -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |_, _| {
            OperationResult::classify_collection(f(), Some(name.into()))
        })
    }

    /// Runs `f` and prepends one holder per returned resource to the history.
    pub fn operate_list_combined<R: DomainResource>(
        self,
        f: impl FnOnce() -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |_, _| {
            OperationResult::classify_collection(f(), None)
        })
    }

    /// Like [`OperationResult::operate_list_combined`], naming every new holder
    /// `name`.
    pub fn operate_list_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce() -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |_, _| {
            OperationResult::classify_collection(f(), Some(name.into()))
        })
    }

    // -----------------------------------------------------------------------
    // Primary value as input
    // -----------------------------------------------------------------------

    /// Runs `f` on the primary value and replaces the history with its result.
    pub fn operate_resource<R: DomainResource>(self, f: impl FnOnce(T) -> R) -> OperationResult<R> {
        self.step(History::Replace, |primary, _| {
            OperationResult::classify(f(primary), None)
        })
    }

    /// Like [`OperationResult::operate_resource`], naming the new holder `name`.
    pub fn operate_resource_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(T) -> R,
    ) -> OperationResult<R> {
        self.step(History::Replace, |primary, _| {
            OperationResult::classify(f(primary), Some(name.into()))
        })
    }

    /// Runs `f` on the primary value and prepends its result to the history.
    pub fn operate_resource_combined<R: DomainResource>(
        self,
        f: impl FnOnce(T) -> R,
    ) -> OperationResult<R> {
        self.step(History::Combine, |primary, _| {
            OperationResult::classify(f(primary), None)
        })
    }

    /// Like [`OperationResult::operate_resource_combined`], naming the new holder `name`.
    pub fn operate_resource_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(T) -> R,
    ) -> OperationResult<R> {
        self.step(History::Combine, |primary, _| {
            OperationResult::classify(f(primary), Some(name.into()))
        })
    }

    /// Runs `f` on the primary value and replaces the history with one holder
    /// per returned resource.
    pub fn operate_resource_list<R: DomainResource>(
        self,
        f: impl FnOnce(T) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |primary, _| {
            OperationResult::classify_collection(f(primary), None)
        })
    }

    /// Like [`OperationResult::operate_resource_list`], naming every new holder `name`.
    pub fn operate_resource_list_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(T) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |primary, _| {
            OperationResult::classify_collection(f(primary), Some(name.into()))
        })
    }

    /// Runs `f` on the primary value and prepends one holder per returned resource.
    pub fn operate_resource_list_combined<R: DomainResource>(
        self,
        f: impl FnOnce(T) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |primary, _| {
            OperationResult::classify_collection(f(primary), None)
        })
    }

    /// Like [`OperationResult::operate_resource_list_combined`], naming every
    /// new holder `name`.
    pub fn operate_resource_list_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(T) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |primary, _| {
            OperationResult::classify_collection(f(primary), Some(name.into()))
        })
    }

    // -----------------------------------------------------------------------
    // History as input
    // -----------------------------------------------------------------------

    /// Runs `f` on the history projected as `Parameters` and replaces the
    /// history with its result.
    ///
    /// Earlier resources can be looked up by name with
    /// [`Parameters::get_resource`].
    pub fn operate_parameters<R: DomainResource>(
        self,
        f: impl FnOnce(Parameters) -> R,
    ) -> OperationResult<R> {
        self.step(History::Replace, |_, holders| {
            OperationResult::classify(f(to_parameters(holders)), None)
        })
    }

    /// Like [`OperationResult::operate_parameters`], naming the new holder `name`.
    pub fn operate_parameters_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(Parameters) -> R,
    ) -> OperationResult<R> {
        self.step(History::Replace, |_, holders| {
            OperationResult::classify(f(to_parameters(holders)), Some(name.into()))
        })
    }

    /// Runs `f` on the history projected as `Parameters` and prepends its
    /// result to the history.
    pub fn operate_parameters_combined<R: DomainResource>(
        self,
        f: impl FnOnce(Parameters) -> R,
    ) -> OperationResult<R> {
        self.step(History::Combine, |_, holders| {
            OperationResult::classify(f(to_parameters(holders)), None)
        })
    }

    /// Like [`OperationResult::operate_parameters_combined`], naming the new holder `name`.
    pub fn operate_parameters_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(Parameters) -> R,
    ) -> OperationResult<R> {
        self.step(History::Combine, |_, holders| {
            OperationResult::classify(f(to_parameters(holders)), Some(name.into()))
        })
    }

    /// Runs `f` on the history as `Parameters` and replaces the history with
    /// one holder per returned resource.
    pub fn operate_parameters_list<R: DomainResource>(
        self,
        f: impl FnOnce(Parameters) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |_, holders| {
            OperationResult::classify_collection(f(to_parameters(holders)), None)
        })
    }

    /// Like [`OperationResult::operate_parameters_list`], naming every new holder `name`.
    pub fn operate_parameters_list_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(Parameters) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Replace, |_, holders| {
            OperationResult::classify_collection(f(to_parameters(holders)), Some(name.into()))
        })
    }

    /// Runs `f` on the history as `Parameters` and prepends one holder per
    /// returned resource.
    pub fn operate_parameters_list_combined<R: DomainResource>(
        self,
        f: impl FnOnce(Parameters) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |_, holders| {
            OperationResult::classify_collection(f(to_parameters(holders)), None)
        })
    }

    /// Like [`OperationResult::operate_parameters_list_combined`], naming every
    /// new holder `name`.
    pub fn operate_parameters_list_combined_named<R: DomainResource>(
        self,
        name: impl Into<String>,
        f: impl FnOnce(Parameters) -> Vec<R>,
    ) -> OperationResult<Vec<R>> {
        self.step(History::Combine, |_, holders| {
            OperationResult::classify_collection(f(to_parameters(holders)), Some(name.into()))
        })
    }

    // -----------------------------------------------------------------------
    // Fallible closures
    // -----------------------------------------------------------------------

    /// Like [`OperationResult::operate_resource`], for a closure that can fail.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged. On a failure state the closure
    /// is not called and `Ok` with the failure is returned.
    pub fn try_operate_resource<R, E>(
        self,
        f: impl FnOnce(T) -> Result<R, E>,
    ) -> Result<OperationResult<R>, E>
    where
        R: DomainResource,
    {
        self.try_step(History::Replace, |primary, _| {
            f(primary).map(|r| OperationResult::classify(r, None))
        })
    }

    /// Like [`OperationResult::operate_resource_combined`], for a closure that can fail.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged.
    pub fn try_operate_resource_combined<R, E>(
        self,
        f: impl FnOnce(T) -> Result<R, E>,
    ) -> Result<OperationResult<R>, E>
    where
        R: DomainResource,
    {
        self.try_step(History::Combine, |primary, _| {
            f(primary).map(|r| OperationResult::classify(r, None))
        })
    }

    /// Like [`OperationResult::operate_parameters`], for a closure that can fail.
    ///
    /// Pairs with [`Parameters::get_resource`], whose lookup errors can be
    /// propagated with `?` inside the closure.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged.
    pub fn try_operate_parameters<R, E>(
        self,
        f: impl FnOnce(Parameters) -> Result<R, E>,
    ) -> Result<OperationResult<R>, E>
    where
        R: DomainResource,
    {
        self.try_step(History::Replace, |_, holders| {
            f(to_parameters(holders)).map(|r| OperationResult::classify(r, None))
        })
    }

    /// Like [`OperationResult::operate_parameters_combined`], for a closure that can fail.
    ///
    /// # Errors
    ///
    /// Returns the closure's error unchanged.
    pub fn try_operate_parameters_combined<R, E>(
        self,
        f: impl FnOnce(Parameters) -> Result<R, E>,
    ) -> Result<OperationResult<R>, E>
    where
        R: DomainResource,
    {
        self.try_step(History::Combine, |_, holders| {
            f(to_parameters(holders)).map(|r| OperationResult::classify(r, None))
        })
    }
}

/// Folds the previous history into a freshly classified result.
///
/// Only the history created by the current step is extended; `previous` is
/// moved in, so no other result can observe the change.
fn fold<R>(
    produced: OperationResult<R>,
    history: History,
    previous: Vec<ResourceHolder>,
) -> OperationResult<R> {
    match (history, produced.state) {
        (History::Combine, State::Success { primary, mut holders }) => {
            holders.extend(previous);
            debug!(?history, holders = holders.len(), "Folded step into history");
            OperationResult::success(primary, holders)
        }
        (_, state) => {
            if let State::Success { holders, .. } = &state {
                debug!(?history, holders = holders.len(), "Folded step into history");
            }
            OperationResult { state }
        }
    }
}
