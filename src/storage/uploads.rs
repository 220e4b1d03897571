use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unusable upload file name: {0:?}")]
    InvalidName(String),

    #[error("could not write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk store for uploaded photos.
///
/// One directory, one file per upload. Names are reduced to their final
/// path component before writing, so client-supplied names cannot
/// escape the upload directory. Re-uploading the same name overwrites.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    /// Create the upload directory if it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating upload dir {}", self.dir.display()))?;
        info!(dir = %self.dir.display(), "Upload store ready");
        Ok(())
    }

    /// Persist one upload and return the stored file name.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let Some(name) = sanitized_name(filename) else {
            return Err(UploadError::InvalidName(filename.to_string()));
        };

        let path = self.dir.join(&name);
        std::fs::write(&path, bytes)?;

        Ok(name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Strip any directory components; `None` when nothing usable remains.
fn sanitized_name(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_str()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(sanitized_name("pizza.jpg"), Some("pizza.jpg".to_string()));
        assert_eq!(sanitized_name("dinner photo.png"), Some("dinner photo.png".to_string()));
    }

    #[test]
    fn directory_components_are_stripped() {
        assert_eq!(sanitized_name("a/b/c.jpg"), Some("c.jpg".to_string()));
        assert_eq!(sanitized_name("/etc/passwd"), Some("passwd".to_string()));
        assert_eq!(sanitized_name("../../up.jpg"), Some("up.jpg".to_string()));
    }

    #[test]
    fn degenerate_names_are_rejected() {
        assert_eq!(sanitized_name(""), None);
        assert_eq!(sanitized_name("/"), None);
        assert_eq!(sanitized_name(".."), None);
        assert_eq!(sanitized_name("   "), None);
    }

    #[test]
    fn save_writes_into_the_store_dir() {
        let dir = std::env::temp_dir().join("food-lens-upload-test");
        let store = UploadStore::new(&dir);
        store.initialize().unwrap();

        let name = store.save("sub/dir/meal.jpg", b"not really a jpeg").unwrap();
        assert_eq!(name, "meal.jpg");

        let stored = std::fs::read(dir.join(&name)).unwrap();
        assert_eq!(stored, b"not really a jpeg");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_rejects_traversal_only_names() {
        let dir = std::env::temp_dir().join("food-lens-upload-reject-test");
        let store = UploadStore::new(&dir);
        store.initialize().unwrap();

        assert!(store.save("..", b"x").is_err());
        assert!(store.save("", b"x").is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
