//! Court calendar generator
//!
//! Runs the portal search for the configured week, collects the attorney's
//! hearings and writes them to a printable HTML calendar.

use anyhow::Context;
use clap::Parser;
use court_calendar::{BrowserSession, CalendarConfig, ConnectionOptions, LaunchOptions, Navigator, PageCache,
                     calendar};
use std::{path::{Path, PathBuf},
          process::Command};

#[derive(Parser)]
#[command(name = "court-calendar")]
#[command(version)]
#[command(about = "Build a printable hearing calendar from the court-records portal", long_about = None)]
struct Cli {
    /// Run configuration (attorney, startDate, endDate, portal overrides)
    #[arg(long, short = 'c', value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Page load and element wait timeout
    #[arg(long, value_name = "MS", default_value = "30000")]
    timeout_ms: u64,

    /// Page snapshot directory (used when USE_HTML_CACHE=true)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Where the calendar is written
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not open the calendar after writing it
    #[arg(long)]
    no_open: bool,
}

fn install_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = CalendarConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let cache = PageCache::from_env(cli.cache_dir.clone().unwrap_or_else(|| install_dir().join("html-cache")));
    if cache.is_enabled() {
        log::info!("HTML cache enabled ({})", cache.dir().display());
    } else {
        log::info!("HTML cache disabled");
    }

    let session = match cli.ws_endpoint {
        Some(ref endpoint) => {
            log::info!("Connecting to browser at {}", endpoint);
            BrowserSession::connect(ConnectionOptions::new(endpoint.clone()).timeout(cli.timeout_ms))?
        }
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed).timeout_ms(cli.timeout_ms);
            if let Some(ref path) = cli.chrome_path {
                options = options.chrome_path(path.clone());
            }
            log::info!("Launching browser ({})", if options.headless { "headless" } else { "headed" });
            BrowserSession::launch(options)?
        }
    };

    let records = Navigator::new(&cache, &config)
        .scrape(&session, &session.main_page())
        .context("Scrape aborted")?;
    drop(session);

    log::info!("Collected {} cases", records.len());
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("{}", serde_json::to_string_pretty(&records)?);
    }

    let html = calendar::render_document(records, &config);
    let output_dir = cli.output_dir.unwrap_or_else(|| install_dir().join("output"));
    let path = calendar::save(&html, &output_dir, &config)?;
    println!("{}", path.display());

    if !cli.no_open {
        open_in_viewer(&path);
    }

    Ok(())
}

/// Best effort; a missing opener only warns
fn open_in_viewer(path: &Path) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).status()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).status()
    } else {
        Command::new("xdg-open").arg(path).status()
    };

    match result {
        Ok(status) if status.success() => log::debug!("Opened {}", path.display()),
        Ok(status) => log::warn!("Viewer exited with {} for {}", status, path.display()),
        Err(e) => log::warn!("Could not open {}: {}", path.display(), e),
    }
}
