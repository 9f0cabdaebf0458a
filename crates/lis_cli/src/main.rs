use chrono::{DateTime, Utc};
use clap::Parser;
use lis_browser::{BrowserConfig, Session};
use lis_core::{Config, Error, Result, SnapshotStore};
use lis_extract::collect_posts;
use lis_storage::snapshot;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "LinkedIn profile activity snapshot tool", long_about = None)]
struct Cli {
    /// Snapshot store backend: memory, local or gcs
    #[arg(long, default_value = "local")]
    store: String,
    /// WebDriver endpoint (overrides WEBDRIVER_URL)
    #[arg(long)]
    webdriver_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Scrape a profile's activity feed and upload the snapshot
    Scrape {
        /// Profile URL (overrides PROFILE_URL)
        #[arg(long)]
        profile_url: Option<String>,
        /// Run the browser with a visible window
        #[arg(long)]
        no_headless: bool,
    },
    /// Verify that the configured snapshot store is reachable
    CheckStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.webdriver_url {
        config.webdriver_url = url;
    }

    let store = lis_storage::create_store(&cli.store, &config).await?;
    info!("💾 Snapshot store initialized (using {})", cli.store);

    match cli.command {
        Commands::Scrape {
            profile_url,
            no_headless,
        } => {
            let profile_url = profile_url
                .or_else(|| config.profile_url.clone())
                .ok_or_else(|| {
                    Error::Config(
                        "Profile URL is required (set PROFILE_URL or pass --profile-url)"
                            .to_string(),
                    )
                })?;

            let browser_config = BrowserConfig {
                webdriver_url: config.webdriver_url.clone(),
                headless: !no_headless,
                ..BrowserConfig::default()
            };

            info!("🌐 Starting browser session");
            let session = Session::connect(browser_config).await?;

            // Always tear the session down, even when the run fails.
            let run = collect_feed(&session, &config, &profile_url).await;
            let close_result = session.close().await;
            let (scrape_time, fragments) = run?;
            close_result?;

            let posts = collect_posts(&fragments, scrape_time).await;
            info!(
                "📋 Extracted {} posts from {} fragments",
                posts.len(),
                fragments.len()
            );

            let author = snapshot::author_slug(&profile_url);
            let csv_bytes = snapshot::build_csv(&profile_url, &author, &posts)?;
            let object = snapshot::object_name(&author, posts.len());
            let location = store.put_snapshot(&object, "text/csv", &csv_bytes).await?;
            info!("✅ Snapshot saved to {}", location);
        }
        Commands::CheckStore => {
            check_store(store.as_ref(), &cli.store).await?;
        }
    }

    Ok(())
}

/// Drive the browser through login, navigation and scrolling, returning the
/// shared capture timestamp and one fragment per feed item.
async fn collect_feed(
    session: &Session,
    config: &Config,
    profile_url: &str,
) -> Result<(DateTime<Utc>, Vec<String>)> {
    session
        .login(&config.linkedin_email, &config.linkedin_password)
        .await?;
    session.open_activity_page(profile_url).await?;
    session.scroll_to_end().await?;

    // One shared reference time for every relative token in this run.
    let scrape_time = Utc::now();
    let fragments = session.collect_fragments().await?;
    Ok((scrape_time, fragments))
}

async fn check_store(store: &dyn SnapshotStore, kind: &str) -> Result<()> {
    store
        .put_snapshot("lis_probe.csv", "text/csv", b"probe")
        .await?;
    let names = store.list_snapshots().await?;
    if !names.iter().any(|name| name == "lis_probe.csv") {
        return Err(Error::Storage(
            "Probe snapshot not visible after write".to_string(),
        ));
    }
    info!("🏦 Snapshot store is healthy (using {})", kind);
    Ok(())
}
