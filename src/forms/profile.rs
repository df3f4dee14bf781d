//! Profile editing. `old_password` is the trigger of the password-change
//! group: the new password and its confirmation are only required, and only
//! sent, when it is filled.

use super::{EMAIL, MIN_PASSWORD_LEN, NAME, OLD_PASSWORD, PASSWORD, PASSWORD_CONFIRMATION};
use crate::error::SchemaError;
use crate::session::{AccountFields, ProfileUpdate, SessionStore, UserProfile};
use crate::submission::{Endpoint, FormFlow};
use crate::ui::Notice;
use crate::validation::{FieldRule, FormInput, Rule, Schema};
use anyhow::Context;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

pub fn profile_schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .field(FieldRule::new(NAME).required("Name is required"))
        .field(
            FieldRule::new(EMAIL)
                .required("Email is required")
                .email("Enter a valid email address"),
        )
        .field(FieldRule::new(OLD_PASSWORD))
        .field(FieldRule::new(PASSWORD).when_filled(
            OLD_PASSWORD,
            vec![
                Rule::required("New password is required"),
                Rule::min_length(
                    MIN_PASSWORD_LEN,
                    format!("Use at least {MIN_PASSWORD_LEN} characters"),
                ),
            ],
        ))
        .field(FieldRule::new(PASSWORD_CONFIRMATION).when_filled(
            OLD_PASSWORD,
            vec![
                Rule::required("Confirm the new password"),
                Rule::equals_field(PASSWORD, "Passwords do not match"),
            ],
        ))
        .build()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body of `PUT /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePayload {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub password_change: Option<PasswordChange>,
}

/// Build the profile body from validated input.
///
/// The password group is included only when `old_password` is non-empty,
/// checked here again rather than trusted from validation.
pub fn build_profile_payload(input: &FormInput) -> ProfilePayload {
    let password_change = input.is_filled(OLD_PASSWORD).then(|| PasswordChange {
        old_password: input.get(OLD_PASSWORD).to_string(),
        password: input.get(PASSWORD).to_string(),
        password_confirmation: input.get(PASSWORD_CONFIRMATION).to_string(),
    });

    ProfilePayload {
        name: input.get(NAME).to_string(),
        email: input.get(EMAIL).to_string(),
        password_change,
    }
}

/// Prefill for the profile form from the signed-in user.
pub fn prefill(user: &UserProfile) -> FormInput {
    FormInput::new()
        .with(NAME, user.name.as_str())
        .with(EMAIL, user.email.as_str())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileUpdateFlow;

impl FormFlow for ProfileUpdateFlow {
    type Payload = ProfilePayload;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn schema(&self) -> Result<Schema, SchemaError> {
        profile_schema()
    }

    fn build_payload(&self, input: &FormInput) -> ProfilePayload {
        build_profile_payload(input)
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::PUT, "/profile")
    }

    fn commit(&self, response: Value, session: &dyn SessionStore) -> anyhow::Result<()> {
        let user: UserProfile =
            serde_json::from_value(response).context("profile response is not a user")?;
        session.commit(ProfileUpdate::Account(AccountFields::from(&user)))?;
        Ok(())
    }

    fn success_notice(&self) -> Notice {
        Notice::success("Profile updated", "Your profile information was saved.")
    }

    fn failure_notice(&self) -> Notice {
        Notice::failure(
            "Profile update failed",
            "Something went wrong while updating your profile. Please try again.",
        )
    }
}
