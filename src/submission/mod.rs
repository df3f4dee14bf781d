//! Multi-step form submission: one cycle per submit, one remote call per
//! cycle, no partial commits.

pub mod flow;
pub mod orchestrator;

pub use flow::{Endpoint, FormFlow};
pub use orchestrator::{Collaborators, SubmissionOrchestrator, SubmissionState, SubmitOutcome};
