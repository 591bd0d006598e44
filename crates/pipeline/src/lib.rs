//! Short-circuiting operation pipelines over domain resources.
//!
//! An [`OperationResult`] carries a resource through a chain of steps. Each
//! step may produce a new resource or an operation outcome; the first outcome
//! with an `error` or `fatal` issue turns the result into a failure, after
//! which every remaining step is skipped and the outcome is returned unchanged.
//!
//! Successful steps accumulate named resources ([`ResourceHolder`]s) that are
//! projected at the end into either a `Parameters` document or a `collection`
//! Bundle.
//!
//! ```
//! use pipeline::OperationResult;
//! use resource::{Appointment, Patient, Resource};
//!
//! let result = OperationResult::of(Patient::named("John Doe"))
//!     .operate_resource_combined(|patient| {
//!         Appointment::booked(patient.name.iter().filter_map(|n| n.text.clone()))
//!     });
//!
//! let Resource::Bundle(bundle) = result.as_bundle() else { unreachable!() };
//! assert_eq!(bundle.entry.len(), 2);
//! ```
//!
//! ## Architectural Layer
//!
//! **Business logic.** This crate has no I/O dependencies and installs no
//! tracing subscriber; it only emits `tracing` events.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`result`] | `OperationResult`, classification, projections |
//! | `combinators` | The `operate*` and `try_operate*` family, as methods on `OperationResult` |
//! | [`holder`] | `ResourceHolder` |

#![warn(missing_docs)]

mod combinators;
pub mod holder;
pub mod result;

pub use holder::ResourceHolder;
pub use result::{OperationResult, DEFAULT_COLLECTION_NAME};
