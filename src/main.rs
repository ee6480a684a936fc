mod cli;
mod config;
mod gemini;
mod groups;
mod logging;
mod search;
mod tui;
mod utils;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigOverrides};
use crate::groups::Category;
use crate::logging::{DEFAULT_LOG_FILE, LogTarget, init_logging};
use crate::search::{GeminiFetcher, SearchCoordinator};
use crate::tui::{Theme, TuiApp};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wgf",
    version,
    about = "Find WhatsApp groups by topic and category (CLI/TUI)"
)]
struct Cli {
    /// Use plain CLI mode (disable TUI)
    #[arg(long, action = ArgAction::SetTrue)]
    no_tui: bool,

    /// Initial search text
    #[arg(long)]
    query: Option<String>,

    /// Initial category filter (label or slug, e.g. "Health & Fitness" or health)
    #[arg(long)]
    category: Option<Category>,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// Gemini API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// API key (set via env GEMINI_API_KEY recommended)
    #[arg(long)]
    api_key: Option<String>,

    /// TUI theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file used in TUI mode
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run the initial search, print the results as JSON and exit
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            theme: self.theme.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let use_tui = !cli.no_tui && !cli.json;
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let target = if use_tui {
        LogTarget::File(&log_file)
    } else {
        LogTarget::Stderr
    };
    init_logging(&cli.log_level, target)?;

    let cfg = AppConfig::load(&cli.overrides())?;
    info!(config = ?cfg, tui = use_tui, "starting whatsgroup-finder");

    let fetcher = GeminiFetcher::from_config(&cfg)?;
    let credentials_missing = !fetcher.has_credentials();
    let model = fetcher.model().to_string();
    let mut coordinator = SearchCoordinator::new(Arc::new(fetcher));
    if let Some(q) = cli.query.as_deref() {
        coordinator.set_query(q.trim());
    }
    coordinator.set_category(cli.category);

    if cli.json {
        if let Some(req) = coordinator.mount() {
            coordinator.run(req).await;
        }
        println!("{}", groups::groups_to_json(&coordinator.state().groups)?);
        return Ok(());
    }

    if !use_tui {
        return cli::run_cli_loop(&mut coordinator).await;
    }

    let theme = Theme::from_name(&cfg.theme).unwrap_or_else(|| {
        warn!(theme = %cfg.theme, "unknown theme; using dark");
        Theme::dark()
    });
    let mut app = TuiApp::new("WhatsGroup Finder", model, coordinator, theme)
        .with_credentials_missing(credentials_missing);
    app.run()
}
