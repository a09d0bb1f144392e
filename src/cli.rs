use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;

use crate::core::Engine;

#[derive(Parser)]
#[command(name = "testwarden")]
#[command(about = "Finds disabled tests and checks whether their tracking issues are already resolved")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Analyze repository branches for disabled tests
    Analyze {
        /// Repository owner (overrides config)
        #[arg(long)]
        owner: Option<String>,

        /// Repository name (overrides config)
        #[arg(long)]
        repo: Option<String>,

        /// Comma-separated branches to analyze (overrides config)
        #[arg(short, long)]
        branches: Option<String>,

        /// Output file for the JSON report (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn execute(self, mut engine: Engine) -> Result<()> {
        match self.command {
            Commands::Init { path } => {
                engine.init(path).await
            }
            Commands::Analyze { owner, repo, branches, output } => {
                engine.analyze(owner, repo, branches, output).await
            }
        }
    }
}
