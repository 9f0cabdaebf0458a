use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use lis_core::{config::DEFAULT_WEBDRIVER_URL, Error, Result};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};
use webdriver::capabilities::Capabilities;

const LOGIN_URL: &str = "https://www.linkedin.com/login";
const FEED_ITEM_SELECTOR: &str = "li.profile-creator-shared-feed-update__container";
const LAST_FEED_ITEM_SELECTOR: &str = "li.profile-creator-shared-feed-update__container:last-child";
const SCROLL_COMMAND: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_HEIGHT_COMMAND: &str = "return document.body.scrollHeight;";

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub scroll_pause: Duration,
    /// Consecutive scrolls with an unchanged page height before we treat the
    /// feed as fully loaded.
    pub max_stale_scrolls: u32,
    pub element_wait: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            scroll_pause: Duration::from_millis(500),
            max_stale_scrolls: 5,
            element_wait: Duration::from_secs(10),
        }
    }
}

pub(crate) fn build_chrome_args(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--window-size=1920,1080".to_string(),
        "--disable-extensions".to_string(),
    ];
    if headless {
        args.push("--headless=new".to_string());
    }
    args
}

/// Thin wrapper around a `fantoccini` WebDriver client that drives one
/// LinkedIn session: login, activity-page navigation, scrolling and fragment
/// collection.
pub struct Session {
    client: Client,
    config: BrowserConfig,
}

impl Session {
    /// Connect to a running WebDriver service (chromedriver by default).
    pub async fn connect(config: BrowserConfig) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();
        chrome_opts.insert("args".to_string(), json!(build_chrome_args(config.headless)));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| Error::Browser(format!("Failed to connect to WebDriver: {}", e)))?;

        if config.headless {
            info!("Headless Chrome session started");
        } else {
            info!("Chrome session started");
        }

        Ok(Self { client, config })
    }

    /// Fill and submit the login form.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.client.goto(LOGIN_URL).await.map_err(browser_err)?;

        let username_field = self.wait_for("#username").await?;
        username_field.send_keys(email).await.map_err(browser_err)?;

        let password_field = self.wait_for("#password").await?;
        password_field.send_keys(password).await.map_err(browser_err)?;

        let submit = self.wait_for("button[type='submit']").await?;
        submit.click().await.map_err(browser_err)?;

        info!("Logged in successfully");
        Ok(())
    }

    /// Navigate to the profile's recent-activity view.
    pub async fn open_activity_page(&self, profile_url: &str) -> Result<()> {
        let activity_url = format!("{}/recent-activity/all/", profile_url.trim_end_matches('/'));
        info!("Loading profile activity page: {}", activity_url);
        self.client.goto(&activity_url).await.map_err(browser_err)?;
        Ok(())
    }

    /// Scroll until the page height stops growing for
    /// `max_stale_scrolls` consecutive attempts.
    pub async fn scroll_to_end(&self) -> Result<()> {
        let mut last_height = self.scroll_height().await?;
        let mut scrolls = 0u32;
        let mut stale = 0u32;

        while stale < self.config.max_stale_scrolls {
            self.client
                .execute(SCROLL_COMMAND, vec![])
                .await
                .map_err(browser_err)?;
            sleep(self.config.scroll_pause).await;
            self.wait_for_feed_growth().await;

            let height = self.scroll_height().await?;
            if height == last_height {
                stale += 1;
            } else {
                stale = 0;
            }
            last_height = height;
            scrolls += 1;
            debug!("Scroll attempt {}, current height {}", scrolls, height);
        }

        info!("Reached the bottom of the page after {} scrolls", scrolls);
        Ok(())
    }

    /// Outer HTML of every feed item container, in DOM order.
    pub async fn collect_fragments(&self) -> Result<Vec<String>> {
        let containers = self
            .client
            .find_all(Locator::Css(FEED_ITEM_SELECTOR))
            .await
            .map_err(browser_err)?;
        info!("Total post containers found: {}", containers.len());

        let mut fragments = Vec::with_capacity(containers.len());
        for container in containers {
            fragments.push(container.html(false).await.map_err(browser_err)?);
        }
        Ok(fragments)
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.map_err(browser_err)?;
        info!("WebDriver session closed");
        Ok(())
    }

    async fn wait_for(&self, selector: &str) -> Result<Element> {
        self.client
            .wait()
            .at_most(self.config.element_wait)
            .for_element(Locator::Css(selector))
            .await
            .map_err(|e| Error::Browser(format!("Timed out waiting for {}: {}", selector, e)))
    }

    async fn wait_for_feed_growth(&self) {
        if let Err(e) = self
            .client
            .wait()
            .at_most(self.config.element_wait)
            .for_element(Locator::Css(LAST_FEED_ITEM_SELECTOR))
            .await
        {
            debug!("No feed item appeared after scroll: {}", e);
        }
    }

    async fn scroll_height(&self) -> Result<i64> {
        let value = self
            .client
            .execute(SCROLL_HEIGHT_COMMAND, vec![])
            .await
            .map_err(browser_err)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .ok_or_else(|| Error::Browser(format!("Unexpected scroll height value: {}", value)))
    }
}

fn browser_err(e: fantoccini::error::CmdError) -> Error {
    Error::Browser(e.to_string())
}
