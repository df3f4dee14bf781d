use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user as the server last described them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// The account section of a profile: everything the form submission owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&UserProfile> for AccountFields {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A field-level write to the stored profile.
///
/// Each variant names the fields one flow owns; applying it leaves every
/// other field as it was, so two flows committing around the same time both
/// keep their writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// Written by profile submissions.
    Account(AccountFields),
    /// Written by the avatar upload.
    Avatar(Option<String>),
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        match update {
            ProfileUpdate::Account(account) => {
                self.id = account.id;
                self.name = account.name;
                self.email = account.email;
            }
            ProfileUpdate::Avatar(avatar_url) => {
                self.avatar_url = avatar_url;
            }
        }
    }
}

/// A signed-in session: the user plus the bearer token for API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: UserProfile, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
            started_at: Utc::now(),
        }
    }
}
