//! CLI interface for mediamuse.

pub mod handlers;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::init::AppContext;
use output::OutputMode;

/// mediamuse - LLM-assisted recommendations and library sync for media servers
#[derive(Parser)]
#[command(name = "mediamuse", version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.mediamuse/config.toml)
    #[arg(long, env = "MEDIAMUSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend new titles based on a watch history
    Recommend {
        /// Path to a JSON file with the watch history
        /// (array of {"title"/"name", "year"} objects)
        history: PathBuf,
        /// Maximum number of recommendations to ask for
        #[arg(long)]
        max: Option<usize>,
    },

    /// Interpret a natural-language search query into structured filters
    Interpret {
        /// The query, e.g. "slow korean thrillers from the 2010s"
        query: String,
        /// Extra context for the model
        #[arg(long)]
        context: Option<String>,
    },

    /// Sync owned items from the library server, grouped by kind
    Sync {
        /// Restrict to specific section ids (repeatable); default: all
        #[arg(long = "section")]
        sections: Vec<String>,
    },
}

pub async fn execute(command: &Commands, ctx: &AppContext, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Recommend { history, max } => {
            handlers::recommend::handle_recommend(ctx, history, *max, mode).await
        }
        Commands::Interpret { query, context } => {
            handlers::interpret::handle_interpret(ctx, query, context.as_deref(), mode).await
        }
        Commands::Sync { sections } => handlers::sync::handle_sync(ctx, sections, mode).await,
    }
}
