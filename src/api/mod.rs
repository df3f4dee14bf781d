//! The remote booking API as seen by the flows: an opaque request/response
//! collaborator plus a `reqwest` implementation.

pub mod http;

pub use http::HttpApiClient;

use crate::error::ApiError;
use reqwest::Method;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// A file attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A multipart form: plain text fields followed by one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub file: FilePart,
}

impl UploadForm {
    pub fn new(file: FilePart) -> Self {
        Self {
            fields: Vec::new(),
            file,
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Remote call collaborator. Responses are JSON; an empty body reads as
/// `Value::Null`.
pub trait ApiClient: Send + Sync {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>>;

    fn upload<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        form: UploadForm,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>>;
}
