use crate::{Error, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Application configuration loaded from environment variables once at
/// startup and passed explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    // LinkedIn credentials
    pub linkedin_email: String,
    pub linkedin_password: String,

    // Target profile; the CLI accepts a flag override
    pub profile_url: Option<String>,

    // Cloud storage (gcs backend only)
    pub bucket_name: Option<String>,
    pub gcs_access_token: Option<String>,

    // WebDriver endpoint
    pub webdriver_url: String,

    // Local backend output directory
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let profile_url = match env::var("PROFILE_URL").ok().filter(|s| !s.is_empty()) {
            Some(raw) => {
                url::Url::parse(&raw)
                    .map_err(|e| Error::Config(format!("PROFILE_URL is not a valid URL: {}", e)))?;
                Some(raw)
            }
            None => None,
        };

        Ok(Self {
            linkedin_email: required_env("LINKEDIN_EMAIL")?,
            linkedin_password: required_env("LINKEDIN_PASSWORD")?,
            profile_url,
            bucket_name: env::var("BUCKET_NAME").ok().filter(|s| !s.is_empty()),
            gcs_access_token: env::var("GCS_ACCESS_TOKEN").ok().filter(|s| !s.is_empty()),
            webdriver_url: env::var("WEBDRIVER_URL")
                .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string()),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Config(format!("{} environment variable is required", key)))
}
