//! Hearthstone collection tracker CLI
//!
//! Loads the card catalog and the owned collection, applies one command,
//! and saves the collection only after the whole command succeeded.

use clap::{Parser, Subcommand};
use hs_collection::{
    deckstring, format_deck_report, hearthstonejson, read_cardlist, reconcile, AddOutcome,
    Catalog, Collection, CollectionError, Result,
};
use std::path::{Path, PathBuf};

/// Manage a Hearthstone card collection and check decks against it
#[derive(Parser, Debug)]
#[command(name = "hs_collection")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to cards.collectible.json
    #[arg(short = 'c', long, default_value_t = default_data_file("cards.collectible.json"))]
    collectible: String,

    /// Path to the owned-collection file
    #[arg(short = 'm', long, default_value_t = default_data_file("mycollection.json"))]
    mycollection: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add copies of a card by name
    Add {
        name: String,

        /// Number of copies: 1 or 2
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Add every card of a set
    AddSet {
        /// Set tag as it appears in the catalog (e.g. EXPERT1)
        set: String,

        #[arg(long, default_value_t = 2)]
        count: u32,
    },

    /// Add cards listed in a file: one "<count> <name>" per line
    AddList { file: String },

    /// Remove copies of a card by name
    Remove {
        name: String,

        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Check a deckstring against the collection
    Deck { deckstring: String },

    /// Print a catalog card as JSON
    Show { name: String },

    /// Clear the entire collection
    Reset,

    /// Download the latest collectible-card catalog
    Fetch,
}

/// Default location under the platform data directory,
/// e.g. ~/.local/share/hs_collection/mycollection.json
fn default_data_file(name: &str) -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hs_collection")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn ensure_parent(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}

fn persist(collection: &Collection, path: &str) -> Result<()> {
    ensure_parent(path)?;
    collection.save(path)
}

fn lookup<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a hs_collection::Card> {
    catalog
        .find_by_name(name)
        .ok_or_else(|| CollectionError::CardNotFound(name.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        collectible,
        mycollection,
        cmd,
    } = cli;

    match cmd {
        Commands::Add { name, count } => {
            let catalog = Catalog::load(&collectible)?;
            let mut collection = Collection::load(&mycollection)?;
            let card = lookup(&catalog, &name)?;
            match collection.add(card, count)? {
                AddOutcome::Added => println!("Added: {} ({})", card.name, count),
                AddOutcome::RaisedToCap => println!("Now at 2 copies: {}", card.name),
                AddOutcome::AlreadyAtCap => {
                    println!("Already in collection: {} (2)", card.name)
                }
            }
            persist(&collection, &mycollection)?;
        }

        Commands::AddSet { set, count } => {
            let catalog = Catalog::load(&collectible)?;
            let mut collection = Collection::load(&mycollection)?;
            let changed = collection.merge_set(&catalog, &set, count)?;
            println!("Added set {}: {} entries changed", set, changed);
            persist(&collection, &mycollection)?;
        }

        Commands::AddList { file } => {
            let catalog = Catalog::load(&collectible)?;
            let mut collection = Collection::load(&mycollection)?;
            let items = read_cardlist(&file)?;
            let outcomes = collection.add_many(&catalog, &items)?;
            for (name, outcome) in &outcomes {
                if *outcome == AddOutcome::AlreadyAtCap {
                    println!("Already in collection: {} (2)", name);
                }
            }
            println!("Applied {} lines from {}", outcomes.len(), file);
            persist(&collection, &mycollection)?;
        }

        Commands::Remove { name, count } => {
            let mut collection = Collection::load(&mycollection)?;
            let remaining = collection.remove(&name, count)?;
            if remaining == 0 {
                println!("Removed: {}", name);
            } else {
                println!("Removed {} of {}, {} remaining", count, name, remaining);
            }
            persist(&collection, &mycollection)?;
        }

        Commands::Deck { deckstring } => {
            let catalog = Catalog::load(&collectible)?;
            let collection = Collection::load(&mycollection)?;
            let required = deckstring::decode(&deckstring)?;
            let report = reconcile(&required, &collection, &catalog);
            print!("{}", format_deck_report(&report));
        }

        Commands::Show { name } => {
            let catalog = Catalog::load(&collectible)?;
            let card = lookup(&catalog, &name)?;
            println!("{}", serde_json::to_string_pretty(card)?);
        }

        Commands::Reset => {
            let mut collection = Collection::load(&mycollection)?;
            collection.reset();
            println!("Collection cleared");
            persist(&collection, &mycollection)?;
        }

        Commands::Fetch => {
            ensure_parent(&collectible)?;
            let count = hearthstonejson::fetch_catalog(&collectible)?;
            println!("Fetched {} cards to {}", count, collectible);
        }
    }

    Ok(())
}

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
