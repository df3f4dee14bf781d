use std::sync::Arc;

use bookwise::avatar::{AvatarOutcome, AvatarSync};
use bookwise::session::MemorySessionStore;
use bookwise::ui::NoticeKind;
use serde_json::json;

use crate::doubles::{Harness, StubApi, StubPicker, ana, signed_in_store, transport_error};

fn sync(harness: &Harness, picker: StubPicker) -> AvatarSync {
    AvatarSync::new(
        Arc::new(picker),
        harness.api.clone(),
        harness.session.clone(),
        harness.notifier.clone(),
    )
}

#[tokio::test]
async fn picked_image_is_uploaded_and_committed() {
    let harness = Harness::new(
        StubApi::new().respond_upload(Ok(json!({ "avatar_url": "https://cdn.example/new.png" }))),
        signed_in_store(),
    );

    let outcome = sync(&harness, StubPicker::png()).run().await;

    assert_eq!(
        outcome,
        AvatarOutcome::Updated(Some("https://cdn.example/new.png".into()))
    );
    let uploads = harness.api.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field("user_id"), Some("u-1"));
    assert_eq!(uploads[0].file.file_name, "u-1.png");
    assert_eq!(uploads[0].file.bytes, b"fake png bytes".to_vec());

    let user = harness.current_user().unwrap();
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example/new.png"));
    assert_eq!(user.name, ana().name);

    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
}

#[tokio::test]
async fn cancelled_pick_is_a_silent_no_op() {
    let harness = Harness::new(StubApi::new(), signed_in_store());

    let outcome = sync(&harness, StubPicker::Cancelled).run().await;

    assert_eq!(outcome, AvatarOutcome::Cancelled);
    assert_eq!(harness.api.call_count(), 0);
    assert!(harness.notifier.notices().is_empty());
    assert_eq!(harness.current_user(), Some(ana()));
}

#[tokio::test]
async fn upload_failure_is_reported_and_profile_kept() {
    let harness = Harness::new(
        StubApi::new().respond_upload(Err(transport_error("/users/avatar"))),
        signed_in_store(),
    );

    let outcome = sync(&harness, StubPicker::png()).run().await;

    assert!(matches!(outcome, AvatarOutcome::Failed { .. }));
    let failures = harness.notifier.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].title, "Avatar update failed");
    assert_eq!(harness.current_user(), Some(ana()));
}

#[tokio::test]
async fn response_without_avatar_reference_is_a_failure() {
    let harness = Harness::new(
        StubApi::new().respond_upload(Ok(json!({ "status": "ok" }))),
        signed_in_store(),
    );

    let outcome = sync(&harness, StubPicker::png()).run().await;

    assert!(matches!(outcome, AvatarOutcome::Failed { .. }));
    assert_eq!(harness.notifier.failures().len(), 1);
    assert_eq!(harness.current_user(), Some(ana()));
}

#[tokio::test]
async fn picker_error_is_reported_without_upload() {
    let harness = Harness::new(StubApi::new(), signed_in_store());

    let outcome = sync(&harness, StubPicker::Failing("permission denied".into()))
        .run()
        .await;

    assert!(matches!(outcome, AvatarOutcome::Failed { .. }));
    assert_eq!(harness.api.call_count(), 0);
    assert_eq!(harness.notifier.failures().len(), 1);
}

#[tokio::test]
async fn signed_out_user_cannot_sync() {
    let harness = Harness::new(StubApi::new(), Arc::new(MemorySessionStore::new()));

    let outcome = sync(&harness, StubPicker::png()).run().await;

    assert!(matches!(outcome, AvatarOutcome::Failed { .. }));
    assert_eq!(harness.api.call_count(), 0);
    assert_eq!(harness.notifier.failures().len(), 1);
}
