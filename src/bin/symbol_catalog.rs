//! Build the symbol catalog and print it, or a query over it, as JSON.
//!
//! Usage:
//!   symbol-catalog summary
//!   symbol-catalog --capability legacy categories --limit weather,maps
//!   symbol-catalog symbols --category weather
//!   symbol-catalog search cloud --category weather
//!
//! Logging goes to stderr and is controlled by `SYMBOL_CATALOG_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use symbol_catalog::{
    CapabilityLevel, Catalog, load_catalog, resolve_capability, resolve_data_dir, split_list,
};
use tracing_subscriber::EnvFilter;

const ENV_LOG_FILTER: &str = "SYMBOL_CATALOG_LOG";

#[derive(Parser, Debug)]
#[command(name = "symbol-catalog")]
#[command(about = "Build the filtered icon-symbol catalog and query it")]
struct Cli {
    /// Directory holding the catalog JSON documents.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Target capability level: legacy or current.
    #[arg(long, global = true)]
    capability: Option<CapabilityLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print category and symbol counts.
    Summary,
    /// Print categories, optionally limited to a comma-separated key list.
    Categories {
        #[arg(long)]
        limit: Option<String>,
    },
    /// Print symbols, optionally only those in one category.
    Symbols {
        #[arg(long)]
        category: Option<String>,
    },
    /// Print symbols whose name or search terms contain QUERY.
    Search {
        query: String,
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Serialize)]
struct Summary {
    capability: CapabilityLevel,
    data_dir: String,
    categories: usize,
    symbols: usize,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let capability = resolve_capability(cli.capability)?;
    let catalog = load_catalog(&data_dir, capability)
        .with_context(|| format!("building symbol catalog from {}", data_dir.display()))?;

    match cli.command {
        Command::Summary => print_json(&Summary {
            capability: catalog.capability(),
            data_dir: data_dir.display().to_string(),
            categories: catalog.categories().len(),
            symbols: catalog.symbols().len(),
        }),
        Command::Categories { limit } => {
            let keys = limit.as_deref().map(split_list).unwrap_or_default();
            print_json(&catalog.available_categories(&keys))
        }
        Command::Symbols { category } => {
            let symbols: Vec<_> = match category.as_deref() {
                Some(key) => {
                    require_category(&catalog, key)?;
                    catalog.symbols_in(key).collect()
                }
                None => catalog.symbols().iter().collect(),
            };
            print_json(&symbols)
        }
        Command::Search { query, category } => {
            if let Some(key) = category.as_deref() {
                require_category(&catalog, key)?;
            }
            print_json(&catalog.search(&query, category.as_deref()))
        }
    }
}

fn require_category(catalog: &Catalog, key: &str) -> Result<()> {
    if catalog.category(key).is_none() {
        anyhow::bail!(
            "unknown category '{key}' for capability {}",
            catalog.capability()
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
