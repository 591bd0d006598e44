//! Domain resource model for operation pipelines.
//!
//! This crate defines the resources an operation pipeline passes between its
//! steps, the capability trait the pipeline classifier depends on, and the two
//! composite document shapes the pipeline projects into.
//!
//! ## Architectural Layer
//!
//! **Domain model.** This crate has no I/O dependencies. JSON support is
//! in-memory serialisation only; reading and writing files is left to callers.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`issue`] | `IssueSeverity`, `Issue` |
//! | [`kinds`] | Business kinds (`Patient`, `Appointment`) and `OperationOutcome` |
//! | [`resource`] | The `Resource` enum, `DomainResource` and `FromResource` traits |
//! | [`documents`] | `Parameters`, `Bundle`, slot/entry adapters, parameter lookup |
//! | [`codec`] | JSON encode/decode |
//! | [`errors`] | `ParameterError`, `CodecError` |

pub mod codec;
pub mod documents;
pub mod errors;
pub mod issue;
pub mod kinds;
pub mod resource;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use documents::{
    to_bundle_entry, to_parameter_component, Bundle, BundleEntry, BundleType, ParameterComponent,
    Parameters,
};
pub use errors::{CodecError, ParameterError};
pub use issue::{Issue, IssueSeverity};
pub use kinds::{
    Appointment, AppointmentParticipant, AppointmentStatus, HumanName, OperationOutcome,
    ParticipationStatus, Patient, Reference,
};
pub use resource::{parameter_name, DomainResource, FromResource, Resource};
