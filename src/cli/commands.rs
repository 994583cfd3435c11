use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::fs;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use url::Url;

use crate::api::{handle_request, ApiResponse};
use crate::cli::Cli;
use crate::config::{Config, LoggingConfig};
use crate::content::PageExtractor;
use crate::error::{Error, Result};
use crate::page::PageDocument;
use crate::service::ExtractionService;

/// Fetch and extract every URL concurrently, printing one response per URL.
pub async fn extract(urls: &[String], pretty: bool, config: &Config) -> Result<()> {
    let service = ExtractionService::from_config(config)?;

    for (url, outcome) in service.extract_many(urls).await {
        let response = ApiResponse::from_outcome(outcome);
        if !response.is_success() {
            warn!("Extraction of {} failed with status {}", url, response.status);
        }
        print_json(&response.body, pretty)?;
    }

    Ok(())
}

/// Feed a raw request body through the extract endpoint mapping.
pub async fn request(body: Option<String>, pretty: bool, config: &Config) -> Result<()> {
    let body = match body {
        Some(body) => body,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let service = ExtractionService::from_config(config)?;
    let response = handle_request(&service, body.as_bytes()).await;

    eprintln!("HTTP {}", response.status);
    print_json(&response.body, pretty)
}

/// Extract from an HTML file on disk, resolving links against `base_url`.
pub fn parse_file(file: &Path, base_url: &str, pretty: bool) -> Result<()> {
    let base = Url::parse(base_url)
        .map_err(|e| Error::Validation(format!("Invalid base URL '{}': {}", base_url, e)))?;

    let bytes = fs::read(file)?;
    debug!("Read {} bytes from {}", bytes.len(), file.display());

    let document = PageDocument::parse(&bytes, None);
    let result = PageExtractor::new().extract(&document, &base);

    let response = ApiResponse::success(&result)?;
    print_json(&response.body, pretty)
}

/// Write the default configuration to `config_path` (or the default location).
pub fn init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if path.exists() && !force {
        return Err(Error::AlreadyExists(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    info!("Wrote default configuration to {}", path.display());

    println!("✅ Configuration written to {}", path.display());
    Ok(())
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Initialize logging based on verbosity flags and the logging config.
///
/// Logs go to stderr (stdout carries the JSON output) or, when configured,
/// to a file through a non-blocking writer whose guard must be kept alive.
pub fn init_logging(debug: bool, verbose: bool, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&logging.level))
            .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", logging.level, e)))?
    };

    let (writer, guard) = if logging.log_to_file {
        let path = Path::new(&logging.log_file);
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Config(format!("Invalid log file: {}", logging.log_file)))?;
        let directory = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(directory)?;

        let appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        (BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (BoxMakeWriter::new(io::stderr), None)
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if logging.json_format {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(debug)
                    .with_line_number(debug)
                    .with_writer(writer),
            )
            .try_init()
    };
    installed.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized");
    Ok(guard)
}
