use super::{ApiClient, UploadForm};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionStore;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const MAX_ERROR_BODY_CHARS: usize = 200;

pub fn build_api_client(config: &ApiConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Truncate a server error body so it can be logged and displayed.
pub fn truncate_body(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }

    let mut end = MAX_ERROR_BODY_CHARS;
    while end > 0 && !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

/// JSON-over-HTTP client for the booking API.
///
/// When a session store is attached, its token is sent as a bearer token on
/// every request.
pub struct HttpApiClient {
    base_url: String,
    client: Client,
    session: Option<Arc<dyn SessionStore>>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_api_client(config),
            session: None,
        }
    }

    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.as_ref().and_then(|session| session.token()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(path: &str, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(|error| {
            warn!(path, %error, "api request failed before a response");
            ApiError::Transport {
                path: path.to_string(),
                message: error.to_string(),
            }
        })?;
        Self::read_json(path, response).await
    }

    async fn read_json(path: &str, response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(|error| ApiError::Transport {
            path: path.to_string(),
            message: format!("failed to read response body: {error}"),
        })?;

        if !status.is_success() {
            let body = truncate_body(&String::from_utf8_lossy(&bytes));
            warn!(path, status = status.as_u16(), body = %body, "api request rejected");
            return Err(ApiError::Server {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(path, status = status.as_u16(), "api request succeeded");
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|error| ApiError::Decode {
            path: path.to_string(),
            message: error.to_string(),
        })
    }
}

impl ApiClient for HttpApiClient {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.authorize(self.client.request(method, self.url(path)));
            if let Some(body) = body {
                builder = builder.json(&body);
            }
            Self::send(path, builder).await
        })
    }

    fn upload<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        form: UploadForm,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>> {
        Box::pin(async move {
            let UploadForm { fields, file } = form;
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|error| ApiError::Transport {
                    path: path.to_string(),
                    message: format!("invalid upload MIME type: {error}"),
                })?;

            let mut multipart = reqwest::multipart::Form::new();
            for (name, value) in fields {
                multipart = multipart.text(name, value);
            }
            let multipart = multipart.part(file.field, part);

            let builder = self
                .authorize(self.client.request(method, self.url(path)))
                .multipart(multipart);
            Self::send(path, builder).await
        })
    }
}
