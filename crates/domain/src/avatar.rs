use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::errors::DomainError;

/// Extensions the account form accepts for profile pictures.
pub const ALLOWED_AVATAR_EXTENSIONS: &[&str] = &["jpg", "png"];

/// An uploaded image pending processing.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Port to the static asset area - this is what the account workflow
/// needs from image storage. Implementations thumbnail the upload and
/// return the generated filename for the user record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn store(&self, upload: &AvatarUpload) -> Result<String, DomainError>;
}
