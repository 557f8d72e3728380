use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use super::output::{ConsoleView, SearchOutcome, format_card, format_history_entry};
use crate::api::{SharedSource, StorefrontClient};
use crate::catalog::CatalogPage;
use crate::config::Config;
use crate::filters::parse_filter_args;
use crate::logging::{self, LogTarget};
use crate::models::{SearchHistoryEntry, StorefrontLayout};
use crate::parsers::load_layout;
use crate::search_history::SearchHistory;
use crate::tui;
use crate::utils::DatePattern;

#[derive(Parser)]
#[command(name = "petshop")]
#[command(version)]
#[command(about = "Pet shop storefront: quiz, catalog and search history", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides PETSHOP_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding the search history (overrides PETSHOP_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Quiz and catalog layout JSON (overrides PETSHOP_LAYOUT)
    #[arg(long, global = true, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Write logs of the interactive pages to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a few questions and browse matching products
    Quiz,
    /// Browse the catalog with filters and recent searches
    Catalog,
    /// Run one catalog search and print the results
    Search {
        /// Free-text query
        query: String,
        /// Filters such as species:1 brand:2 price_max:500
        filters: Vec<String>,
        /// Sort key, e.g. price_asc
        #[arg(long)]
        sort: Option<String>,
    },
    /// List recent searches, or re-run one of them
    History {
        /// Re-run entry N (1 = newest)
        #[arg(long, value_name = "N")]
        apply: Option<usize>,
        /// Date pattern such as %d.%m.%Y (overrides the profile setting)
        #[arg(long, value_name = "PATTERN")]
        date_format: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    // The interactive pages own the terminal
    let target = match command {
        Commands::Quiz | Commands::Catalog => {
            cli.log_file.clone().map_or(LogTarget::Disabled, LogTarget::File)
        }
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, target)?;

    let config = load_config(&cli)?;
    debug!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    match command {
        Commands::Quiz => {
            let layout = resolve_layout(&config)?;
            tui::run_quiz(layout.quiz, shared_client(&config)?)?;
        }
        Commands::Catalog => {
            let layout = resolve_layout(&config)?;
            let history = SearchHistory::load(Box::new(config.history_storage()));
            tui::run_catalog(&layout.catalog, history, shared_client(&config)?)?;
        }
        Commands::Search { query, filters, sort } => {
            search(&config, query, filters, sort.as_deref())?;
        }
        Commands::History { apply: Some(position), .. } => {
            apply_history(&config, *position)?;
        }
        Commands::History { apply: None, date_format } => {
            show_history(&config, date_format.as_deref())?;
        }
    }

    Ok(())
}

/// Environment first, then command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("Failed to read configuration")?;

    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url).context("Invalid --api-url")?;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(layout) = &cli.layout {
        config.layout_path = Some(layout.clone());
    }

    Ok(config)
}

fn resolve_layout(config: &Config) -> Result<StorefrontLayout> {
    match &config.layout_path {
        Some(path) => load_layout(path)
            .with_context(|| format!("Failed to load layout {}", path.display())),
        None => Ok(StorefrontLayout::default()),
    }
}

fn shared_client(config: &Config) -> Result<SharedSource> {
    let client = StorefrontClient::new(&config.api_url).context("Failed to build HTTP client")?;
    Ok(Arc::new(client))
}

fn search(config: &Config, query: &str, filters: &[String], sort: Option<&str>) -> Result<()> {
    let expr = parse_filter_args(filters)?;
    let layout = resolve_layout(config)?;
    let mut page = open_catalog(config, &layout);

    let skipped = page.form_mut().fill(query, &expr.to_selections(), sort.unwrap_or_default());
    if skipped > 0 {
        warn!(skipped, "Ignoring filters the catalog does not offer");
    }

    run_search(config, &mut page)
}

fn apply_history(config: &Config, position: usize) -> Result<()> {
    let layout = resolve_layout(config)?;
    let mut page = open_catalog(config, &layout);

    let entry: SearchHistoryEntry = position
        .checked_sub(1)
        .and_then(|index| page.history().get(index))
        .cloned()
        .with_context(|| {
            format!("No history entry {} ({} stored)", position, page.history().len())
        })?;

    info!(query = %entry.query, "Re-running search from history");
    let skipped = page.form_mut().apply_entry(&entry);
    if skipped > 0 {
        warn!(skipped, "Some stored selections no longer exist");
    }

    run_search(config, &mut page)
}

fn open_catalog(config: &Config, layout: &StorefrontLayout) -> CatalogPage<ConsoleView> {
    let history = SearchHistory::load(Box::new(config.history_storage()));
    CatalogPage::new(&layout.catalog, history, ConsoleView::default())
}

/// Record, fetch and print. A failed fetch is an error exit.
fn run_search(config: &Config, page: &mut CatalogPage<ConsoleView>) -> Result<()> {
    let client = StorefrontClient::new(&config.api_url).context("Failed to build HTTP client")?;
    let ticket = page.submit();
    page.run_fetch(ticket, &client);

    match page.view().outcome() {
        Some(SearchOutcome::Cards(cards)) => {
            println!("Found {} products", cards.len());
            for card in cards {
                println!("{}", format_card(card));
            }
        }
        Some(SearchOutcome::Empty) => println!("No products found"),
        Some(SearchOutcome::Error(message)) => bail!("Search failed: {}", message),
        None => bail!("Search finished without a result"),
    }

    Ok(())
}

fn show_history(config: &Config, date_format: Option<&str>) -> Result<()> {
    let history = SearchHistory::load(Box::new(config.history_storage()));
    if history.is_empty() {
        println!("No recent searches");
        return Ok(());
    }

    let pattern = resolve_date_pattern(config, date_format);
    println!("Recent searches");
    println!("===============");
    for (i, entry) in history.entries().iter().enumerate() {
        println!("{}", format_history_entry(i + 1, entry, pattern));
    }
    println!();
    println!("History file: {}", config.history_path().display());

    Ok(())
}

/// Flag, then environment, then profile, then the default
fn resolve_date_pattern(config: &Config, flag: Option<&str>) -> DatePattern {
    if let Some(pattern) = flag {
        return DatePattern::from_profile(pattern);
    }
    if let Some(pattern) = config.date_format {
        return pattern;
    }

    let settings = StorefrontClient::new(&config.api_url).and_then(|c| c.fetch_user_settings());
    match settings {
        Ok(settings) => settings
            .date_format
            .map(|pattern| DatePattern::from_profile(&pattern))
            .unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Failed to load profile settings, using the default date format");
            DatePattern::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_arguments() {
        let cli = Cli::try_parse_from([
            "petshop",
            "search",
            "bone",
            "species:1",
            "price_max:500",
            "--sort",
            "price_asc",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Search { query, filters, sort }) => {
                assert_eq!(query, "bone");
                assert_eq!(filters, vec!["species:1", "price_max:500"]);
                assert_eq!(sort.as_deref(), Some("price_asc"));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "petshop",
            "history",
            "--apply",
            "2",
            "--data-dir",
            "/tmp/shop",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/shop")));
        assert!(matches!(cli.command, Some(Commands::History { apply: Some(2), .. })));
    }

    #[test]
    fn test_date_pattern_flag_wins() {
        let config = Config::from_lookup(|name: &str| match name {
            "PETSHOP_DATA_DIR" => Some("/tmp/shop".to_string()),
            "PETSHOP_DATE_FORMAT" => Some("%m/%d/%Y".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(resolve_date_pattern(&config, Some("%Y.%m.%d")), DatePattern::YearMonthDay);
        assert_eq!(resolve_date_pattern(&config, None), DatePattern::MonthDayYear);
    }
}
