use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Store a serialized snapshot under `name`, returning its final location.
    async fn put_snapshot(&self, name: &str, content_type: &str, bytes: &[u8]) -> Result<String>;

    /// List the snapshot names currently held by the backend.
    async fn list_snapshots(&self) -> Result<Vec<String>>;
}
