use std::sync::Arc;

use bookwise::forms::{EMAIL, NAME, PASSWORD, SignInFlow, SignUpFlow};
use bookwise::session::{MemorySessionStore, SessionStore};
use bookwise::submission::{SubmissionOrchestrator, SubmitOutcome};
use bookwise::validation::FormInput;
use reqwest::Method;
use serde_json::json;

use crate::doubles::{Harness, StubApi, signed_in_store};

#[tokio::test]
async fn signin_begins_a_session() {
    let harness = Harness::new(
        StubApi::new().respond(Ok(json!({
            "user": { "id": "u-9", "name": "Bo", "email": "bo@x.com" },
            "token": "tok-9"
        }))),
        Arc::new(MemorySessionStore::new()),
    );
    let orchestrator = SubmissionOrchestrator::new(SignInFlow, harness.collaborators());
    let input = FormInput::new()
        .with(EMAIL, "bo@x.com")
        .with(PASSWORD, "hunter22");

    let outcome = orchestrator.submit(input).await;

    assert_eq!(outcome, SubmitOutcome::Committed);
    let request = &harness.api.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/sessions");
    assert_eq!(
        request.body,
        Some(json!({ "email": "bo@x.com", "password": "hunter22" }))
    );
    assert_eq!(harness.session.token().as_deref(), Some("tok-9"));
    assert_eq!(harness.current_user().unwrap().name, "Bo");
}

#[tokio::test]
async fn signin_with_bad_email_makes_no_remote_call() {
    let harness = Harness::new(StubApi::new(), Arc::new(MemorySessionStore::new()));
    let orchestrator = SubmissionOrchestrator::new(SignInFlow, harness.collaborators());
    let input = FormInput::new()
        .with(EMAIL, "bo-at-x.com")
        .with(PASSWORD, "hunter22");

    let outcome = orchestrator.submit(input).await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![EMAIL]);
    assert_eq!(harness.api.call_count(), 0);
    assert!(harness.current_user().is_none());
}

#[tokio::test]
async fn signup_does_not_touch_the_session() {
    let harness = Harness::new(
        StubApi::new().respond(Ok(json!({ "id": "u-2", "name": "Cy", "email": "cy@x.com" }))),
        signed_in_store(),
    );
    let before = harness.current_user();
    let orchestrator = SubmissionOrchestrator::new(SignUpFlow, harness.collaborators());
    let input = FormInput::new()
        .with(NAME, "Cy")
        .with(EMAIL, "cy@x.com")
        .with(PASSWORD, "hunter22");

    let outcome = orchestrator.submit(input).await;

    assert_eq!(outcome, SubmitOutcome::Committed);
    assert_eq!(harness.api.requests()[0].path, "/users");
    assert_eq!(harness.current_user(), before);
    assert_eq!(harness.notifier.notices().len(), 1);
}
