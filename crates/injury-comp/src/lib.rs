//! Personal-injury compensation under the Guangxi civil-liability schedule.
//!
//! [`compute`] is the engine. The remaining modules are its collaborators: document
//! renderers, the HTTP router and the ambient configuration, telemetry and error types
//! used by the service binary.

pub mod compensation;
pub mod config;
pub mod error;
pub mod report;
pub mod router;
pub mod telemetry;

pub use compensation::{compute, CaseInput, CaseSubmission, ComputationResult, ComputationStandards};
pub use router::compensation_router;
