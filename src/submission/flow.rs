use crate::error::SchemaError;
use crate::session::SessionStore;
use crate::ui::Notice;
use crate::validation::{FormInput, Schema};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Where a form's payload is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }
}

/// Everything form-specific the orchestrator needs: how to validate, what to
/// send where, and how a successful response lands in the session.
pub trait FormFlow: Send + Sync {
    type Payload: Serialize;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Built fresh for each submission attempt.
    fn schema(&self) -> Result<Schema, SchemaError>;

    /// Pure transform of validated input into the request body.
    fn build_payload(&self, input: &FormInput) -> Self::Payload;

    fn endpoint(&self) -> Endpoint;

    /// Write the response into local state. Must decode fully before writing
    /// so that a malformed response commits nothing.
    fn commit(&self, response: Value, session: &dyn SessionStore) -> anyhow::Result<()>;

    fn success_notice(&self) -> Notice;

    fn failure_notice(&self) -> Notice;
}
