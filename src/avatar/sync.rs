use super::detection::extension_for;
use super::{AssetPicker, PickOutcome, PickedAsset};
use crate::api::{ApiClient, FilePart, UploadForm};
use crate::session::{ProfileUpdate, SessionStore, UserProfile};
use crate::ui::{Notice, Notifier};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const AVATAR_PATH: &str = "/users/avatar";
const AVATAR_FIELD: &str = "avatar";
const FAILURE_TITLE: &str = "Avatar update failed";

/// How one avatar sync ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarOutcome {
    /// The new avatar reference was committed (`None` if the server cleared it).
    Updated(Option<String>),
    /// The pick was cancelled; nothing happened.
    Cancelled,
    /// A failure was reported to the user and the profile was left alone.
    Failed { reason: String },
}

/// Multipart body for an avatar upload, tagged with the user's id.
pub fn avatar_form(user: &UserProfile, asset: PickedAsset) -> UploadForm {
    let file_name = format!("{}.{}", user.id, extension_for(&asset.mime_type));
    UploadForm::new(FilePart {
        field: AVATAR_FIELD.to_string(),
        file_name,
        mime_type: asset.mime_type,
        bytes: asset.bytes,
    })
    .text("user_id", user.id.as_str())
}

/// Pick → upload → commit the avatar field.
///
/// Runs independently of any form submission. It only ever writes
/// [`ProfileUpdate::Avatar`], so it can finish before or after a concurrent
/// profile submission without either losing its fields.
pub struct AvatarSync {
    picker: Arc<dyn AssetPicker>,
    api: Arc<dyn ApiClient>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl AvatarSync {
    pub fn new(
        picker: Arc<dyn AssetPicker>,
        api: Arc<dyn ApiClient>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            picker,
            api,
            session,
            notifier,
        }
    }

    pub async fn run(&self) -> AvatarOutcome {
        let Some(user) = self.session.current_user() else {
            return self.fail("Sign in before changing your avatar.", "no signed-in user");
        };

        let asset = match self.picker.pick().await {
            Ok(PickOutcome::Picked(asset)) => asset,
            Ok(PickOutcome::Cancelled) => {
                debug!(user = %user.id, "avatar pick cancelled");
                return AvatarOutcome::Cancelled;
            }
            Err(error) => {
                return self.fail(
                    "The selected image could not be used.",
                    &error.to_string(),
                );
            }
        };

        let response = match self
            .api
            .upload(Method::PATCH, AVATAR_PATH, avatar_form(&user, asset))
            .await
        {
            Ok(response) => response,
            Err(error) => {
                return self.fail(
                    "Uploading your avatar failed. Please try again.",
                    &error.to_string(),
                );
            }
        };

        let avatar_url = match response.get("avatar_url") {
            Some(Value::String(url)) => Some(url.clone()),
            Some(Value::Null) => None,
            _ => {
                return self.fail(
                    "Uploading your avatar failed. Please try again.",
                    "upload response has no avatar_url",
                );
            }
        };

        if let Err(error) = self
            .session
            .commit(ProfileUpdate::Avatar(avatar_url.clone()))
        {
            return self.fail(
                "Your avatar was uploaded but could not be saved locally.",
                &format!("{error:#}"),
            );
        }

        info!(user = %user.id, "avatar updated");
        self.notifier.notify(&Notice::success(
            "Avatar updated",
            "Your new avatar is in place.",
        ));
        AvatarOutcome::Updated(avatar_url)
    }

    fn fail(&self, message: &str, reason: &str) -> AvatarOutcome {
        warn!(reason, "avatar sync failed");
        self.notifier.notify(&Notice::failure(FAILURE_TITLE, message));
        AvatarOutcome::Failed {
            reason: reason.to_string(),
        }
    }
}
