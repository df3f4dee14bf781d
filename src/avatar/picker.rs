use super::detection::{detect_image_mime, is_image};
use super::{AssetPicker, PickOutcome, PickedAsset};
use crate::error::AssetError;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Picks an image from the local filesystem.
///
/// With no path configured it asks for one on the terminal; an empty answer
/// cancels the pick.
#[derive(Debug, Clone)]
pub struct FilePicker {
    path: Option<PathBuf>,
    max_bytes: usize,
}

impl FilePicker {
    pub fn new(path: Option<PathBuf>, max_bytes: usize) -> Self {
        Self { path, max_bytes }
    }

    async fn prompt_for_path() -> Result<Option<PathBuf>, AssetError> {
        let answer = tokio::task::spawn_blocking(|| {
            dialoguer::Input::<String>::new()
                .with_prompt("Avatar image path (leave empty to cancel)")
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|error| AssetError::Pick(format!("prompt task failed: {error}")))?
        .map_err(|error| AssetError::Pick(format!("prompt failed: {error}")))?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(shellexpand::tilde(answer).into_owned())))
    }

    async fn read(&self, path: PathBuf) -> Result<PickedAsset, AssetError> {
        let pick_error =
            |error: std::io::Error| AssetError::Pick(format!("{}: {error}", path.display()));

        let metadata = tokio::fs::metadata(&path).await.map_err(pick_error)?;
        let declared = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if declared > self.max_bytes {
            return Err(AssetError::TooLarge {
                size: declared,
                limit: self.max_bytes,
            });
        }

        // Special files report a length of zero, so the read itself is capped
        // one byte past the limit.
        let file = tokio::fs::File::open(&path).await.map_err(pick_error)?;
        let cap = u64::try_from(self.max_bytes).unwrap_or(u64::MAX).saturating_add(1);
        let mut bytes = Vec::with_capacity(declared.min(self.max_bytes));
        file.take(cap)
            .read_to_end(&mut bytes)
            .await
            .map_err(pick_error)?;

        if bytes.len() > self.max_bytes {
            return Err(AssetError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mime_type = detect_image_mime(&bytes, file_name.as_deref());
        if !is_image(&mime_type) {
            return Err(AssetError::Unsupported { mime_type });
        }

        debug!(path = %path.display(), %mime_type, size = bytes.len(), "picked avatar image");
        Ok(PickedAsset { mime_type, bytes })
    }
}

impl AssetPicker for FilePicker {
    fn pick(&self) -> Pin<Box<dyn Future<Output = Result<PickOutcome, AssetError>> + Send + '_>> {
        Box::pin(async move {
            let path = match &self.path {
                Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()),
                None => match Self::prompt_for_path().await? {
                    Some(path) => path,
                    None => return Ok(PickOutcome::Cancelled),
                },
            };
            self.read(path).await.map(PickOutcome::Picked)
        })
    }
}
