//! Avatar upload: a best-effort flow, separate from form submission, that
//! writes only the avatar field of the stored profile.

pub mod detection;
pub mod picker;
pub mod sync;

pub use picker::FilePicker;
pub use sync::{AVATAR_PATH, AvatarOutcome, AvatarSync, avatar_form};

use crate::error::AssetError;
use std::future::Future;
use std::pin::Pin;

/// An image chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PickedAsset),
    /// The user backed out. Not an error.
    Cancelled,
}

/// Source of avatar images (gallery, camera, filesystem...).
pub trait AssetPicker: Send + Sync {
    fn pick(&self) -> Pin<Box<dyn Future<Output = Result<PickOutcome, AssetError>> + Send + '_>>;
}
