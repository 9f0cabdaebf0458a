use async_trait::async_trait;
use lis_core::{Result, SnapshotStore};
use std::path::PathBuf;
use tracing::info;

/// Writes snapshots into a directory on disk.
pub struct LocalStore {
    output_dir: PathBuf,
}

impl LocalStore {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

#[async_trait]
impl SnapshotStore for LocalStore {
    async fn put_snapshot(&self, name: &str, _content_type: &str, bytes: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        info!("Snapshot written to {}", path.display());
        Ok(path.display().to_string())
    }

    async fn list_snapshots(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(names),
        };
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());

        let location = store
            .put_snapshot("bob_2.csv", "text/csv", b"content")
            .await
            .unwrap();
        assert!(location.ends_with("bob_2.csv"));
        assert_eq!(std::fs::read(dir.path().join("bob_2.csv")).unwrap(), b"content");

        let names = store.list_snapshots().await.unwrap();
        assert_eq!(names, vec!["bob_2.csv"]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("never-created"));
        assert!(store.list_snapshots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("snapshots");
        let store = LocalStore::new(nested.clone());

        store.put_snapshot("c.csv", "text/csv", b"x").await.unwrap();
        assert!(nested.join("c.csv").exists());
    }
}
