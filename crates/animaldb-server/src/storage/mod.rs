//! Image intake
//!
//! Uploaded images are written to a single directory under a fresh random name:
//! 16 bytes from the operating system RNG, hex encoded, followed by the extension
//! of the uploaded file's original name (`photo.PNG` -> `<32 hex chars>.PNG`).
//! The caller stores only the returned file name.

use rand::{rngs::OsRng, TryRngCore};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Number of random bytes in a generated file name
pub const RANDOM_NAME_BYTES: usize = 16;

#[derive(Debug, Error)]
pub enum ImageIntakeError {
    #[error("Failed to generate a random file name: {0}")]
    Random(String),

    #[error("Failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file received from a multipart request, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Local directory that receives uploaded images
#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the storage, creating the directory if needed
    pub async fn init(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let storage = Self::new(dir);
        tokio::fs::create_dir_all(&storage.dir).await?;
        info!(dir = %storage.dir.display(), "Image storage ready");
        Ok(storage)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the upload under a new random name and return that name
    #[instrument(skip(self, image), fields(original = %image.original_name, size = image.bytes.len()))]
    pub async fn store(&self, image: UploadedImage) -> Result<String, ImageIntakeError> {
        let filename = generate_filename(&image.original_name)?;
        let path = self.dir.join(&filename);

        debug!(path = %path.display(), "Writing uploaded image");

        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|source| ImageIntakeError::Write {
                path: path.clone(),
                source,
            })?;

        info!(filename = %filename, "Stored uploaded image");
        Ok(filename)
    }
}

/// Random hex name carrying over the original extension
pub fn generate_filename(original_name: &str) -> Result<String, ImageIntakeError> {
    let mut raw = [0u8; RANDOM_NAME_BYTES];
    OsRng
        .try_fill_bytes(&mut raw)
        .map_err(|e| ImageIntakeError::Random(e.to_string()))?;

    Ok(format!("{}{}", hex::encode(raw), extension_of(original_name)))
}

/// Extension of the last path component including the dot, or `""`
///
/// A name made only of a leading dot and text (`.bashrc`) has no extension.
pub fn extension_of(original_name: &str) -> &str {
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name);

    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &base[idx..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_random_name(name: &str, ext: &str) -> bool {
        let Some(stem) = name.strip_suffix(ext) else {
            return false;
        };
        stem.len() == RANDOM_NAME_BYTES * 2
            && stem.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.PNG"), ".PNG");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("dir.d/file"), "");
        assert_eq!(extension_of("C:\\pics\\cat.jpeg"), ".jpeg");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_generate_filename_keeps_extension_case() {
        let name = generate_filename("photo.PNG").unwrap();
        assert!(is_random_name(&name, ".PNG"), "unexpected name {name}");
    }

    #[test]
    fn test_generate_filename_is_unique() {
        let a = generate_filename("a.jpg").unwrap();
        let b = generate_filename("a.jpg").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_store_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::init(dir.path().join("img")).await.unwrap();

        let name = storage
            .store(UploadedImage {
                original_name: "lion.jpg".to_string(),
                bytes: vec![0xff, 0xd8, 0xff],
            })
            .await
            .unwrap();

        assert!(is_random_name(&name, ".jpg"));
        let written = std::fs::read(storage.dir().join(&name)).unwrap();
        assert_eq!(written, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_store_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path().join("does-not-exist"));

        let result = storage
            .store(UploadedImage {
                original_name: "x.png".to_string(),
                bytes: vec![1],
            })
            .await;

        assert!(matches!(result, Err(ImageIntakeError::Write { .. })));
    }
}
