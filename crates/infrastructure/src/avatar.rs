use std::path::PathBuf;

use async_trait::async_trait;
use domain::{AvatarStore, AvatarUpload, DomainError, ALLOWED_AVATAR_EXTENSIONS};
use rand::Rng;

/// Bounding box for stored avatars; aspect ratio is preserved.
const THUMBNAIL_SIZE: u32 = 125;

/// Thumbnails uploads into the static avatar directory under a random
/// hex filename, keeping the upload's extension.
pub struct FsAvatarStore {
    directory: PathBuf,
}

impl FsAvatarStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl AvatarStore for FsAvatarStore {
    async fn store(&self, upload: &AvatarUpload) -> Result<String, DomainError> {
        // The form already vetoes other extensions; re-check here since
        // the store is also the last line before disk.
        let extension = upload
            .extension()
            .filter(|ext| ALLOWED_AVATAR_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| DomainError::UnsupportedImage(upload.filename.clone()))?;

        let token: [u8; 8] = rand::thread_rng().gen();
        let filename = format!("{}.{}", hex::encode(token), extension);

        let bytes = upload.bytes.clone();
        let directory = self.directory.clone();
        let path = directory.join(&filename);

        let written = tokio::task::spawn_blocking(move || -> Result<(), DomainError> {
            let image = image::load_from_memory(&bytes)
                .map_err(|e| DomainError::UnsupportedImage(e.to_string()))?;
            let thumbnail = image.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE);

            std::fs::create_dir_all(&directory)
                .map_err(|e| DomainError::Repository(e.to_string()))?;
            thumbnail
                .save(&path)
                .map_err(|e| DomainError::Repository(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;
        written?;

        Ok(filename)
    }
}
