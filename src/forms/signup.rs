use super::{EMAIL, MIN_PASSWORD_LEN, NAME, PASSWORD};
use crate::error::SchemaError;
use crate::session::SessionStore;
use crate::submission::{Endpoint, FormFlow};
use crate::ui::Notice;
use crate::validation::{FieldRule, FormInput, Schema};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

pub fn signup_schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .field(FieldRule::new(NAME).required("Name is required"))
        .field(
            FieldRule::new(EMAIL)
                .required("Email is required")
                .email("Enter a valid email address"),
        )
        .field(
            FieldRule::new(PASSWORD)
                .required("Password is required")
                .min_length(
                    MIN_PASSWORD_LEN,
                    format!("Use at least {MIN_PASSWORD_LEN} characters"),
                ),
        )
        .build()
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account creation. A new account is not signed in, so a successful
/// submission leaves the session untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignUpFlow;

impl FormFlow for SignUpFlow {
    type Payload = SignUpPayload;

    fn name(&self) -> &'static str {
        "signup"
    }

    fn schema(&self) -> Result<Schema, SchemaError> {
        signup_schema()
    }

    fn build_payload(&self, input: &FormInput) -> SignUpPayload {
        SignUpPayload {
            name: input.get(NAME).to_string(),
            email: input.get(EMAIL).to_string(),
            password: input.get(PASSWORD).to_string(),
        }
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::POST, "/users")
    }

    fn commit(&self, _response: Value, _session: &dyn SessionStore) -> anyhow::Result<()> {
        Ok(())
    }

    fn success_notice(&self) -> Notice {
        Notice::success(
            "Account created",
            "Your account is ready. You can sign in now.",
        )
    }

    fn failure_notice(&self) -> Notice {
        Notice::failure(
            "Sign-up failed",
            "Something went wrong while creating your account. Please try again.",
        )
    }
}
