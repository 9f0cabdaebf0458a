use async_trait::async_trait;
use lis_core::{Error, Result, SnapshotStore};
use serde::Deserialize;
use std::time::Duration;

const GCS_BASE_URL: &str = "https://storage.googleapis.com";

/// Thin client for the Google Cloud Storage JSON API, authenticated with a
/// caller-supplied OAuth bearer token.
pub struct GcsStore {
    client: reqwest::Client,
    bucket: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectEntry>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntry {
    name: String,
}

impl GcsStore {
    pub fn new(bucket: String, token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            bucket,
            token,
        })
    }
}

#[async_trait]
impl SnapshotStore for GcsStore {
    async fn put_snapshot(&self, name: &str, content_type: &str, bytes: &[u8]) -> Result<String> {
        let endpoint = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            GCS_BASE_URL, self.bucket, name
        );

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.token)
            .header("Content-Type", content_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "GCS upload failed ({}): {}",
                status.as_u16(),
                message
            )));
        }

        Ok(format!("gs://{}/{}", self.bucket, name))
    }

    async fn list_snapshots(&self) -> Result<Vec<String>> {
        let endpoint = format!("{}/storage/v1/b/{}/o", GCS_BASE_URL, self.bucket);

        let resp = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "GCS list failed ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let list: ObjectList = resp.json().await?;
        Ok(list.items.into_iter().map(|entry| entry.name).collect())
    }
}
