//! mediamuse - LLM-assisted recommendations and library sync for media servers
//!
//! Usage:
//!   mediamuse recommend history.json      Recommend unseen titles
//!   mediamuse interpret "korean thrillers from the 2010s"
//!   mediamuse sync                        Sync owned items from the library server
//!   mediamuse --help                      Show all commands

use anyhow::Result;
use clap::Parser;

use mediamuse::cli::output::OutputMode;
use mediamuse::cli::{execute, Cli};
use mediamuse::config::AppConfig;
use mediamuse::init::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediamuse=info".parse()?),
        )
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    let mode = OutputMode::from_json_flag(cli.json);
    execute(&cli.command, &ctx, mode).await
}
