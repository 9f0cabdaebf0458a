use lis_core::{Config, Error, Result, SnapshotStore};
use std::sync::Arc;

pub mod backends;
pub mod snapshot;

pub use backends::*;

/// Instantiate the snapshot store selected on the command line.
pub async fn create_store(kind: &str, config: &Config) -> Result<Arc<dyn SnapshotStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "local" => Ok(Arc::new(LocalStore::new(config.output_dir.clone()))),
        #[cfg(feature = "gcs")]
        "gcs" => {
            let bucket = config.bucket_name.clone().ok_or_else(|| {
                Error::Config("BUCKET_NAME is required for the gcs store".to_string())
            })?;
            let token = config.gcs_access_token.clone().ok_or_else(|| {
                Error::Config("GCS_ACCESS_TOKEN is required for the gcs store".to_string())
            })?;
            Ok(Arc::new(GcsStore::new(bucket, token)?))
        }
        other => Err(Error::Storage(format!("Unknown store backend: {}", other))),
    }
}
