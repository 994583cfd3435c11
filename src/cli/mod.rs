pub mod commands;

use clap::{Parser, Subcommand};
use crate::config::Config;
use crate::error::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "page-extract")]
#[command(about = "Extract titles, images and readable content from web pages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PAGE_EXTRACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one or more pages and print the extraction response for each
    Extract {
        /// Page URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run a raw JSON request body through the extract endpoint
    Request {
        /// Request body, e.g. '{"url": "https://example.com"}' (read from stdin if omitted)
        #[arg(short, long)]
        body: Option<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Extract from a local HTML file without fetching
    Parse {
        /// HTML file
        file: PathBuf,

        /// URL the page was served from; relative links resolve against it
        #[arg(long)]
        base_url: String,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = match self.command {
            Commands::Init { .. } | Commands::Completions { .. } => Config::default(),
            _ => Config::resolve(self.config.as_deref())?,
        };

        // Keeps the non-blocking file writer alive until the command ends
        let _log_guard = commands::init_logging(self.debug, self.verbose, &config.logging)?;

        match self.command {
            Commands::Extract { urls, pretty } => {
                commands::extract(&urls, pretty, &config).await
            }
            Commands::Request { body, pretty } => {
                commands::request(body, pretty, &config).await
            }
            Commands::Parse { file, base_url, pretty } => {
                commands::parse_file(&file, &base_url, pretty)
            }
            Commands::Init { force } => {
                commands::init(self.config, force)
            }
            Commands::Completions { shell } => {
                commands::generate_completions(shell);
                Ok(())
            }
        }
    }
}
