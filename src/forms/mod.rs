//! The client's forms: their schemas, payload transforms, and the flows that
//! tie them to endpoints and session updates.

pub mod profile;
pub mod signin;
pub mod signup;

pub use profile::{PasswordChange, ProfilePayload, ProfileUpdateFlow};
pub use signin::{SignInFlow, SignInPayload};
pub use signup::{SignUpFlow, SignUpPayload};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const OLD_PASSWORD: &str = "old_password";
pub const PASSWORD_CONFIRMATION: &str = "password_confirmation";

pub const MIN_PASSWORD_LEN: usize = 6;
