use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use url::Url;

use bulletin::api::ApiClient;
use bulletin::app::{App, AppEvent};
use bulletin::config::Config;
use bulletin::store::Location;
use bulletin::ui;

/// Get the config directory path (~/.config/bulletin/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("bulletin"))
}

#[derive(Parser, Debug)]
#[command(
    name = "bulletin",
    about = "Browse a posts & categories service from the terminal."
)]
struct Args {
    /// API base URL (overrides BULLETIN_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Launch location, e.g. "/posts?category=abc". The category query
    /// parameter hydrates the initial selection. Defaults to the config
    /// file's default_link, or "/posts".
    #[arg(long, value_name = "LINK")]
    link: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load configuration")?;

    let base_url = config.resolve_base_url(args.api_url.as_deref());
    let base = Url::parse(&base_url)
        .with_context(|| format!("Invalid API base URL: {}", base_url))?;
    tracing::info!(base_url = %base, "Using API base URL");

    let api = ApiClient::new(reqwest::Client::new(), base)
        .context("Failed to create API client")?;

    let link = args.link.as_deref().unwrap_or(&config.default_link);
    let location = Location::parse(link);
    let mut app = App::new(api, location);
    app.show_sidebar = config.show_sidebar;

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Exactly one category list fetch at startup; a link-hydrated selection
    // kicks off its post fetch immediately as well.
    app.spawn_categories_fetch(&event_tx);
    if let Some(id) = app.store.selected_id().map(str::to_string) {
        app.spawn_posts_fetch(id, &event_tx);
    }

    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
