//! Image object store
//!
//! Uploaded images are written under a generated key and served back via a
//! public base URL. The backend is a plain directory; the key scheme
//! (`mechanics/{uuid}.{ext}`) keeps it compatible with bucket-style storage.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into();
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Round-trip write/read/delete at startup to catch permission or mount
    /// problems before the first upload does.
    pub async fn validate(&self) -> Result<()> {
        let probe_dir = self.root.join(".health-check");
        let probe = probe_dir.join("probe.bin");

        fs::create_dir_all(&probe_dir)
            .await
            .with_context(|| format!("create_dir_all({:?})", probe_dir))?;

        let data = b"storage-health-check";
        fs::write(&probe, data)
            .await
            .with_context(|| format!("write({:?})", probe))?;

        let read_back = fs::read(&probe)
            .await
            .with_context(|| format!("read({:?})", probe))?;
        if read_back != data {
            anyhow::bail!("storage read-back mismatch");
        }

        fs::remove_file(&probe)
            .await
            .with_context(|| format!("remove_file({:?})", probe))?;
        let _ = fs::remove_dir(&probe_dir).await;

        Ok(())
    }

    /// Generate a key for an uploaded image from its file extension
    pub fn generate_key(extension: &str) -> String {
        format!("mechanics/{}.{}", Uuid::new_v4(), extension)
    }

    /// Write the bytes under `key` and return the public URL
    pub async fn store(&self, key: &str, data: &[u8]) -> Result<String> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create_dir_all({:?})", parent))?;
        }

        fs::write(&path, data)
            .await
            .with_context(|| format!("write({:?})", path))?;

        tracing::debug!(key = %key, size = data.len(), "Stored uploaded image");

        Ok(self.public_url(key))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_base_and_key() {
        let store = ImageStore::new("/tmp/uploads", "https://cdn.example.com/uploads/");
        assert_eq!(
            store.public_url("mechanics/abc.png"),
            "https://cdn.example.com/uploads/mechanics/abc.png"
        );
    }

    #[test]
    fn generated_keys_are_unique_and_keep_extension() {
        let a = ImageStore::generate_key("webp");
        let b = ImageStore::generate_key("webp");
        assert_ne!(a, b);
        assert!(a.starts_with("mechanics/"));
        assert!(a.ends_with(".webp"));
    }
}
