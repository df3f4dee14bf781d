use super::flow::FormFlow;
use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::ui::{FieldErrorDisplay, Notifier};
use crate::validation::{ErrorMap, FormInput, ValidationOutcome, validate};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Where a submission cycle currently is. Outside a cycle the orchestrator is
/// always `Idle`; the terminal results of a cycle are reported as
/// [`SubmitOutcome`] on the way back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Transforming,
    Submitting,
}

/// How one call to [`SubmissionOrchestrator::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the errors were shown per field and nothing was sent.
    Invalid(ErrorMap),
    /// The remote call succeeded and its result was committed.
    Committed,
    /// Something after validation failed; a generic notice was shown and
    /// nothing was committed.
    Failed { reason: String },
    /// Another submission was already in flight; this one did nothing.
    Ignored,
}

/// The collaborators a submission talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn ApiClient>,
    pub session: Arc<dyn SessionStore>,
    pub fields: Arc<dyn FieldErrorDisplay>,
    pub notifier: Arc<dyn Notifier>,
}

/// Drives validate → transform → submit → commit → notify for one form.
///
/// At most one cycle runs at a time: a submit that arrives while a cycle is
/// in flight is ignored, not queued.
pub struct SubmissionOrchestrator<F: FormFlow> {
    flow: F,
    collaborators: Collaborators,
    state: Mutex<SubmissionState>,
}

/// Puts the orchestrator back to `Idle` however the cycle ends, including when
/// the submit future is dropped mid-flight.
struct CycleGuard<'a> {
    state: &'a Mutex<SubmissionState>,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        *lock_state(self.state) = SubmissionState::Idle;
    }
}

/// The state is a plain `Copy` value, so a lock poisoned by a panicking
/// holder still guards a usable state.
fn lock_state(state: &Mutex<SubmissionState>) -> MutexGuard<'_, SubmissionState> {
    state.lock().unwrap_or_else(|poisoned| {
        warn!("submission state lock was poisoned, recovering");
        PoisonError::into_inner(poisoned)
    })
}

impl<F: FormFlow> SubmissionOrchestrator<F> {
    pub fn new(flow: F, collaborators: Collaborators) -> Self {
        Self {
            flow,
            collaborators,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn state(&self) -> SubmissionState {
        *lock_state(&self.state)
    }

    /// Run one submission cycle over a snapshot of the form.
    pub async fn submit(&self, input: FormInput) -> SubmitOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!(flow = self.flow.name(), "submission already in flight, ignoring");
            return SubmitOutcome::Ignored;
        };

        let attempt = Uuid::new_v4();
        debug!(flow = self.flow.name(), %attempt, "submission started");
        let outcome = self.run(attempt, &input).await;
        debug!(flow = self.flow.name(), %attempt, ?outcome, "submission finished");
        outcome
    }

    fn try_begin(&self) -> Option<CycleGuard<'_>> {
        let mut state = lock_state(&self.state);
        if *state != SubmissionState::Idle {
            return None;
        }
        *state = SubmissionState::Validating;
        Some(CycleGuard { state: &self.state })
    }

    fn transition(&self, attempt: Uuid, next: SubmissionState) {
        let mut state = lock_state(&self.state);
        debug!(flow = self.flow.name(), %attempt, from = ?*state, to = ?next, "submission state");
        *state = next;
    }

    async fn run(&self, attempt: Uuid, input: &FormInput) -> SubmitOutcome {
        let Collaborators {
            api,
            session,
            fields,
            notifier,
        } = &self.collaborators;

        fields.clear_field_errors();

        let schema = match self.flow.schema() {
            Ok(schema) => schema,
            Err(error) => return self.fail(attempt, &anyhow::Error::from(error)),
        };

        if let ValidationOutcome::Invalid(failures) = validate(&schema, input) {
            let errors = ErrorMap::from_failures(&failures);
            debug!(
                flow = self.flow.name(),
                %attempt,
                fields = ?errors.fields().collect::<Vec<_>>(),
                "validation failed"
            );
            fields.show_field_errors(&errors);
            return SubmitOutcome::Invalid(errors);
        }

        self.transition(attempt, SubmissionState::Transforming);
        let body = match serde_json::to_value(self.flow.build_payload(input)) {
            Ok(body) => body,
            Err(error) => return self.fail(attempt, &anyhow::Error::from(error)),
        };

        self.transition(attempt, SubmissionState::Submitting);
        let endpoint = self.flow.endpoint();
        let response = match api.request(endpoint.method, endpoint.path, Some(body)).await {
            Ok(response) => response,
            Err(error) => return self.fail(attempt, &anyhow::Error::from(error)),
        };

        if let Err(error) = self.flow.commit(response, session.as_ref()) {
            return self.fail(attempt, &error);
        }

        info!(flow = self.flow.name(), %attempt, "submission committed");
        notifier.notify(&self.flow.success_notice());
        SubmitOutcome::Committed
    }

    fn fail(&self, attempt: Uuid, error: &anyhow::Error) -> SubmitOutcome {
        warn!(flow = self.flow.name(), %attempt, error = %format!("{error:#}"), "submission failed");
        self.collaborators
            .notifier
            .notify(&self.flow.failure_notice());
        SubmitOutcome::Failed {
            reason: format!("{error:#}"),
        }
    }
}
