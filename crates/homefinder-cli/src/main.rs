mod compare;
mod favorites;
mod listings;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use homefinder_core::PropertyId;
use homefinder_records::{ConfiguredStore, PropertyService, SearchSession, ServiceError};
use homefinder_store::{FavoritesLedger, FileStore};
use tracing_subscriber::EnvFilter;

use crate::favorites::FavoritesCommands;
use crate::listings::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "homefinder")]
#[command(about = "Browse, filter, favorite and compare property listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search listings
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one listing in full
    Show {
        /// Property id
        id: PropertyId,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Compare up to three listings side by side
    Compare {
        /// Property ids, in column order
        #[arg(required = true, num_args = 1..)]
        ids: Vec<PropertyId>,
    },
    /// List property types, statuses and sort orders
    Types,
    /// Search interactively, one query per input line
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = homefinder_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let store = ConfiguredStore::from_config(&config)?;
    let service = PropertyService::new(store);
    let ledger = FavoritesLedger::new(FileStore::new(config.data_dir.clone()));

    let result = match cli.command {
        Some(Commands::Search { filters, json }) => {
            listings::run_search(&service, &ledger, &filters, json).await
        }
        Some(Commands::Show { id, json }) => listings::run_show(&service, &ledger, id, json).await,
        Some(Commands::Favorites { command }) => match command {
            FavoritesCommands::List { sort, json } => {
                favorites::run_favorites_list(&service, &ledger, sort.as_deref(), json).await
            }
            FavoritesCommands::Toggle { id } => {
                favorites::run_favorites_toggle(&service, &ledger, id).await
            }
        },
        Some(Commands::Compare { ids }) => compare::run_compare(&service, &ids).await,
        Some(Commands::Types) => {
            listings::run_types(&service);
            Ok(())
        }
        Some(Commands::Browse { filters }) => {
            let session = SearchSession::new(Duration::from_millis(config.search_debounce_ms));
            listings::run_browse(
                Arc::new(service),
                Arc::new(ledger),
                &filters,
                Arc::new(session),
            )
            .await
        }
        None => {
            println!("homefinder: listing source {}", config.record_source);
            println!("run `homefinder --help` for commands");
            Ok(())
        }
    };

    if let Err(error) = &result {
        if error.downcast_ref::<ServiceError>().is_some() {
            eprintln!("Property data could not be loaded. Check the record source and try again.");
        }
    }
    result
}
