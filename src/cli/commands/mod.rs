//! CLI parser and command dispatch.
//!
//! Each subcommand's handler lives in its own module.

mod assets;
mod candidates;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use artsearch::config::Config;
use artsearch::models::AssetKind;
use artsearch::scrapers::{redact_url, StrategyKind};

#[derive(Parser)]
#[command(name = "artsearch")]
#[command(about = "Find game artwork and trailers through image search backends")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check for the verbose flag before the full parse, so logging can be set up first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Show the search candidate for a term
    Candidates {
        /// Game title to search for
        term: String,
        /// Platform label (used in cache keys)
        #[arg(short, long, default_value = "any")]
        platform: String,
        /// Image backend (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyKind>,
    },

    /// Fetch assets of one kind for a term
    Assets {
        /// Game title to search for
        term: String,
        /// Asset kind (title, snap, boxfront, boxback, 3dbox, cartridge, fanart,
        /// banner, clearlogo, flyer, map, manual, trailer)
        #[arg(short, long)]
        kind: AssetKind,
        /// Platform label (used in cache keys)
        #[arg(short, long, default_value = "any")]
        platform: String,
        /// Image backend (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyKind>,
        /// Skip the asset cache
        #[arg(long)]
        no_cache: bool,
        /// Print assets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a URL with its credentials masked
    Redact {
        url: String,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Redact { url } = &cli.command {
        println!("{}", redact_url(url));
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Candidates {
            term,
            platform,
            strategy,
        } => candidates::cmd_candidates(&config, &term, &platform, strategy),
        Commands::Assets {
            term,
            kind,
            platform,
            strategy,
            no_cache,
            json,
        } => {
            assets::cmd_assets(
                &config,
                &term,
                &platform,
                kind,
                strategy,
                !no_cache,
                json,
            )
            .await
        }
        Commands::Redact { .. } => Ok(()),
    }
}
