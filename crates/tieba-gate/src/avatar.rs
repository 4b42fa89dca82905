use serde::{Deserialize, Serialize};

use crate::error::AvatarError;

/// A file picked for upload as the profile avatar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarFile {
    pub name: String,
    /// MIME type reported by the picker, e.g. `image/png`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Accept `file` if it is an image no larger than `max_bytes`.
///
/// The type check runs first, so an oversized non-image reports
/// [`AvatarError::NotAnImage`].
pub fn check_avatar(file: &AvatarFile, max_bytes: u64) -> Result<(), AvatarError> {
    if !file.mime_type.starts_with("image/") {
        return Err(AvatarError::NotAnImage(file.mime_type.clone()));
    }
    if file.size() > max_bytes {
        return Err(AvatarError::TooLarge {
            size: file.size(),
            limit: max_bytes,
        });
    }
    Ok(())
}
