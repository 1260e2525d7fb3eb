//! Filesystem persistence for fetched strips.
//!
//! A strip's file existing under its date name is the one and only
//! idempotency signal; there is no sidecar metadata. Writes go through a
//! `.part` file and a rename, so an interrupted run can't leave a truncated
//! file that would satisfy the existence check on the next run.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::{Error, Result};

pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Roots the store at `dir`, expanded to an absolute path. The directory
    /// itself is only created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let root = std::path::absolute(&dir).map_err(|err| Error::OutputDir(dir, err))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether an artifact was already persisted under `name`.
    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.path_for(name)).await.unwrap_or(false)
    }

    /// Writes the full byte content under `name`, creating the directory
    /// tree first. Callers must have checked [`ArtifactStore::exists`]; the
    /// store itself happily overwrites.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        let staging = self.root.join(format!("{name}.part"));
        let mut file = File::create(&staging).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        fs::rename(&staging, self.path_for(name)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        assert!(!store.exists("2020-01-01").await);
        store.write("2020-01-01", b"gif bytes").await.unwrap();
        assert!(store.exists("2020-01-01").await);

        let saved = fs::read(store.path_for("2020-01-01")).await.unwrap();
        assert_eq!(saved, b"gif bytes");
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("calvin/strips")).unwrap();

        store.write("2020-01-01", b"x").await.unwrap();
        assert!(store.exists("2020-01-01").await);
    }

    #[tokio::test]
    async fn leaves_no_staging_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        store.write("2020-01-01", b"x").await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().into_string().unwrap());
        }
        assert_eq!(names, vec!["2020-01-01".to_owned()]);
    }

    #[tokio::test]
    async fn store_root_is_absolute() {
        let store = ArtifactStore::new("some/relative/dir").unwrap();
        assert!(store.root().is_absolute());
    }
}
