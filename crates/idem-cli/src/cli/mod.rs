//! CLI for the idem tool.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use idem_core::checksum::HashAlgorithm;
use idem_core::config;
use idem_core::encoding::TextEncoding;
use std::path::PathBuf;

use commands::{run_checksum, run_fetch, run_write};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "idem")]
#[command(about = "Idempotent file writes and retrying idempotent HTTP requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Write content to a file only if it differs from what is on disk.
    Write {
        /// Target file.
        path: PathBuf,

        /// Text content (encoded with --encoding).
        #[arg(long, conflicts_with = "from", required_unless_present = "from")]
        text: Option<String>,

        /// Copy raw bytes from this file instead.
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        /// Digest used for comparison (sha256, sha512, md5). Defaults to config.
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,

        /// Encoding for --text (utf-8, utf16le, latin1, ascii, hex, base64). Defaults to config.
        #[arg(long)]
        encoding: Option<TextEncoding>,
    },

    /// Send an HTTP request with an Idempotency-Key, retrying transient failures.
    Fetch {
        /// Target URL.
        url: String,

        /// Idempotency key sent on every attempt.
        #[arg(long)]
        key: String,

        /// HTTP method.
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Extra header, `Name: value`. May be repeated.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Request body.
        #[arg(long)]
        data: Option<String>,

        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Print the digest of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,

        /// Digest algorithm (sha256, sha512, md5). Defaults to config.
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,
    },
}

/// Retry flags; unset flags fall back to config, then built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct RetryArgs {
    /// Retries after the first attempt.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Backoff multiplier.
    #[arg(long)]
    pub factor: Option<f64>,

    /// First backoff delay in milliseconds.
    #[arg(long, value_name = "MS")]
    pub min_timeout_ms: Option<u64>,

    /// Maximum backoff delay in milliseconds.
    #[arg(long, value_name = "MS")]
    pub max_timeout_ms: Option<u64>,

    /// Disable random jitter.
    #[arg(long)]
    pub no_jitter: bool,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Write {
                path,
                text,
                from,
                algorithm,
                encoding,
            } => {
                let mut options = cfg.write_options();
                if let Some(a) = algorithm {
                    options.algorithm = a;
                }
                if let Some(e) = encoding {
                    options.encoding = e;
                }
                run_write(&path, text, from.as_deref(), &options).await?;
            }
            CliCommand::Fetch {
                url,
                key,
                method,
                headers,
                data,
                retry,
            } => run_fetch(&cfg, &url, &key, &method, &headers, data, &retry).await?,
            CliCommand::Checksum { path, algorithm } => {
                run_checksum(&path, algorithm.unwrap_or(cfg.algorithm)).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
