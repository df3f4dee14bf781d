use super::{EMAIL, PASSWORD};
use crate::error::SchemaError;
use crate::session::{Session, SessionStore, UserProfile};
use crate::submission::{Endpoint, FormFlow};
use crate::ui::Notice;
use crate::validation::{FieldRule, FormInput, Schema};
use anyhow::Context;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn signin_schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .field(
            FieldRule::new(EMAIL)
                .required("Email is required")
                .email("Enter a valid email address"),
        )
        .field(FieldRule::new(PASSWORD).required("Password is required"))
        .build()
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    user: UserProfile,
    token: String,
}

/// Starts a session. This is the one flow that replaces the stored profile
/// wholesale, since it begins a new session rather than editing one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignInFlow;

impl FormFlow for SignInFlow {
    type Payload = SignInPayload;

    fn name(&self) -> &'static str {
        "signin"
    }

    fn schema(&self) -> Result<Schema, SchemaError> {
        signin_schema()
    }

    fn build_payload(&self, input: &FormInput) -> SignInPayload {
        SignInPayload {
            email: input.get(EMAIL).to_string(),
            password: input.get(PASSWORD).to_string(),
        }
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::POST, "/sessions")
    }

    fn commit(&self, response: Value, session: &dyn SessionStore) -> anyhow::Result<()> {
        let SignInResponse { user, token } =
            serde_json::from_value(response).context("sign-in response lacks user or token")?;
        session.begin(Session::new(user, token))
    }

    fn success_notice(&self) -> Notice {
        Notice::success("Signed in", "Welcome back.")
    }

    fn failure_notice(&self) -> Notice {
        Notice::failure(
            "Sign-in failed",
            "Could not sign you in. Check your email and password.",
        )
    }
}
