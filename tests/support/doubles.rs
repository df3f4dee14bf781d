#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bookwise::api::{ApiClient, UploadForm};
use bookwise::avatar::{AssetPicker, PickOutcome, PickedAsset};
use bookwise::error::{ApiError, AssetError};
use bookwise::session::{MemorySessionStore, Session, SessionStore, UserProfile};
use bookwise::submission::Collaborators;
use bookwise::ui::{FieldErrorDisplay, Notice, Notifier};
use bookwise::validation::ErrorMap;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Notify;

pub fn ana() -> UserProfile {
    UserProfile {
        id: "u-1".into(),
        name: "Ana".into(),
        email: "ana@x.com".into(),
        avatar_url: Some("https://cdn.example/old.png".into()),
    }
}

pub fn signed_in_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(Session::new(ana(), "tok-1")))
}

pub fn transport_error(path: &str) -> ApiError {
    ApiError::Transport {
        path: path.into(),
        message: "connection refused".into(),
    }
}

// ── Notifier / field display ───────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn failures(&self) -> Vec<Notice> {
        self.notices().into_iter().filter(Notice::is_failure).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[derive(Default)]
pub struct RecordingFieldErrors {
    shown: Mutex<Vec<ErrorMap>>,
    clears: AtomicUsize,
}

impl RecordingFieldErrors {
    pub fn shown(&self) -> Vec<ErrorMap> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl FieldErrorDisplay for RecordingFieldErrors {
    fn show_field_errors(&self, errors: &ErrorMap) {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(errors.clone());
    }

    fn clear_field_errors(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

// ── API ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Scripted API. Requests can be held at a gate until the test releases them.
#[derive(Default)]
pub struct StubApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    upload_responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<UploadForm>>,
    gate: Option<Arc<Notify>>,
    entered: Notify,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<Value, ApiError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    pub fn respond_upload(self, response: Result<Value, ApiError>) -> Self {
        self.upload_responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Hold every `request` until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Resolves once a `request` has been received.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn uploads(&self) -> Vec<UploadForm> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len() + self.uploads().len()
    }

    fn next(queue: &Mutex<VecDeque<Result<Value, ApiError>>>, path: &str) -> Result<Value, ApiError> {
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Decode {
                    path: path.into(),
                    message: "no scripted response".into(),
                })
            })
    }
}

impl ApiClient for StubApi {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>> {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedRequest {
                    method,
                    path: path.to_string(),
                    body,
                });
            self.entered.notify_one();
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Self::next(&self.responses, path)
        })
    }

    fn upload<'a>(
        &'a self,
        _method: Method,
        path: &'a str,
        form: UploadForm,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>> {
        Box::pin(async move {
            self.uploads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(form);
            Self::next(&self.upload_responses, path)
        })
    }
}

// ── Picker ─────────────────────────────────────────────────────

pub enum StubPicker {
    Picked(PickedAsset),
    Cancelled,
    Failing(String),
}

impl StubPicker {
    pub fn png() -> Self {
        Self::Picked(PickedAsset {
            mime_type: "image/png".into(),
            bytes: b"fake png bytes".to_vec(),
        })
    }
}

impl AssetPicker for StubPicker {
    fn pick(&self) -> Pin<Box<dyn Future<Output = Result<PickOutcome, AssetError>> + Send + '_>> {
        let outcome = match self {
            Self::Picked(asset) => Ok(PickOutcome::Picked(asset.clone())),
            Self::Cancelled => Ok(PickOutcome::Cancelled),
            Self::Failing(reason) => Err(AssetError::Pick(reason.clone())),
        };
        Box::pin(async move { outcome })
    }
}

// ── Wiring ─────────────────────────────────────────────────────

pub struct Harness {
    pub api: Arc<StubApi>,
    pub session: Arc<MemorySessionStore>,
    pub fields: Arc<RecordingFieldErrors>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(api: StubApi, session: Arc<MemorySessionStore>) -> Self {
        Self {
            api: Arc::new(api),
            session,
            fields: Arc::new(RecordingFieldErrors::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            api: self.api.clone(),
            session: self.session.clone(),
            fields: self.fields.clone(),
            notifier: self.notifier.clone(),
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current_user()
    }
}
