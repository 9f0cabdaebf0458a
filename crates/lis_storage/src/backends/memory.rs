use async_trait::async_trait;
use lis_core::{Result, SnapshotStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn put_snapshot(&self, name: &str, _content_type: &str, bytes: &[u8]) -> Result<String> {
        let mut objects = self.objects.write().await;
        if let Some(existing) = objects.iter_mut().find(|(n, _)| n == name) {
            existing.1 = bytes.to_vec();
        } else {
            objects.push((name.to_string(), bytes.to_vec()));
        }
        Ok(format!("memory://{}", name))
    }

    async fn list_snapshots(&self) -> Result<Vec<String>> {
        Ok(self
            .objects
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_list() {
        let store = MemoryStore::new();
        let location = store
            .put_snapshot("alice_3.csv", "text/csv", b"header\nrow")
            .await
            .unwrap();
        assert_eq!(location, "memory://alice_3.csv");

        let names = store.list_snapshots().await.unwrap();
        assert_eq!(names, vec!["alice_3.csv"]);
        assert_eq!(store.get("alice_3.csv").await.unwrap(), b"header\nrow");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put_snapshot("a.csv", "text/csv", b"one").await.unwrap();
        store.put_snapshot("a.csv", "text/csv", b"two").await.unwrap();

        assert_eq!(store.list_snapshots().await.unwrap().len(), 1);
        assert_eq!(store.get("a.csv").await.unwrap(), b"two");
    }
}
