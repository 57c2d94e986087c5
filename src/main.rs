use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

mod app;
mod ui;

use app::App;
use studynav::config::{Config, API_URL_ENV};
use studynav::nav::NavEvent;
use studynav::taxonomy::TaxonomyClient;

/// Get the config directory path (~/.config/studynav/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("studynav"))
}

#[derive(Parser, Debug)]
#[command(
    name = "studynav",
    about = "Browse a study-materials catalogue from the terminal"
)]
struct Args {
    /// Config file (default: ~/.config/studynav/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Taxonomy service base URL (overrides config and STUDYNAV_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Sign in as this user for the session
    #[arg(long, value_name = "NAME")]
    user: Option<String>,

    /// Email shown in the account menu
    #[arg(long, value_name = "EMAIL")]
    email: Option<String>,

    /// Start with content locked (shows the Upgrade badge)
    #[arg(long)]
    locked: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.api_url {
            config.api_base_url = url;
        }
        if let Some(user) = self.user {
            config.user_name = Some(user);
        }
        if let Some(email) = self.email {
            config.user_email = Some(email);
        }
        if self.locked {
            config.content_locked = true;
        }
    }
}

/// The terminal belongs to the UI, so logs go to a file next to the config.
fn init_tracing(config_dir: &Path) -> Result<()> {
    let log_path = config_dir.join("studynav.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }
    init_tracing(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    config.apply_env(std::env::var(API_URL_ENV).ok());
    args.apply(&mut config);
    tracing::debug!(?config, "Effective configuration");

    let http = app::build_http_client(config.request_timeout())
        .context("Failed to build HTTP client")?;
    let client = TaxonomyClient::new(http, &config.api_base_url, config.request_timeout())
        .with_context(|| format!("Invalid API base URL '{}'", config.api_base_url))?;

    let (event_tx, event_rx) = mpsc::channel::<NavEvent>(32);
    let mut app = App::new(&config, client, event_tx);

    ui::run(&mut app, event_rx).await?;

    tracing::info!("Exited cleanly");
    Ok(())
}
