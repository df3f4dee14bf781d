use std::sync::Arc;

use bookwise::forms::profile::prefill;
use bookwise::forms::{NAME, ProfileUpdateFlow};
use bookwise::submission::{SubmissionOrchestrator, SubmissionState, SubmitOutcome};
use serde_json::json;
use tokio::sync::Notify;

use crate::doubles::{Harness, StubApi, ana, signed_in_store};

fn updated_ana() -> serde_json::Value {
    json!({ "id": "u-1", "name": "Ana Maria", "email": "ana@x.com" })
}

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let gate = Arc::new(Notify::new());
    let harness = Harness::new(
        StubApi::new().respond(Ok(updated_ana())).gated(gate.clone()),
        signed_in_store(),
    );
    let orchestrator = SubmissionOrchestrator::new(ProfileUpdateFlow, harness.collaborators());
    let input = prefill(&ana()).with(NAME, "Ana Maria");

    let (first, second) = tokio::join!(orchestrator.submit(input.clone()), async {
        harness.api.wait_entered().await;
        assert_eq!(orchestrator.state(), SubmissionState::Submitting);
        let second = orchestrator.submit(input.clone()).await;
        gate.notify_one();
        second
    });

    assert_eq!(first, SubmitOutcome::Committed);
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(harness.api.requests().len(), 1);
    assert_eq!(harness.notifier.notices().len(), 1);
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn dropping_an_in_flight_submit_returns_to_idle() {
    let gate = Arc::new(Notify::new());
    let harness = Harness::new(
        StubApi::new()
            .respond(Ok(updated_ana()))
            .gated(gate.clone()),
        signed_in_store(),
    );
    let orchestrator = SubmissionOrchestrator::new(ProfileUpdateFlow, harness.collaborators());
    let input = prefill(&ana()).with(NAME, "Ana Maria");

    tokio::select! {
        outcome = orchestrator.submit(input.clone()) => panic!("gated submit finished: {outcome:?}"),
        () = harness.api.wait_entered() => {}
    }

    assert_eq!(orchestrator.state(), SubmissionState::Idle);
    assert_eq!(harness.current_user(), Some(ana()));
    assert!(harness.notifier.notices().is_empty());

    // The abandoned cycle never committed; a fresh one runs normally.
    gate.notify_one();
    let outcome = orchestrator.submit(input).await;
    assert_eq!(outcome, SubmitOutcome::Committed);
    assert_eq!(harness.current_user().unwrap().name, "Ana Maria");
}
