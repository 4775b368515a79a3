//! `idem fetch <url> --key <key>` – retrying idempotent request.

use anyhow::{Context, Result};
use idem_core::config::IdemConfig;
use idem_core::fetch::{FetchOptions, IdempotentClient};
use idem_core::retry::{RetryOverrides, TokioSleeper};
use std::sync::Arc;

use crate::cli::RetryArgs;

pub async fn run_fetch(
    cfg: &IdemConfig,
    url: &str,
    key: &str,
    method: &str,
    headers: &[String],
    data: Option<String>,
    retry: &RetryArgs,
) -> Result<()> {
    let mut options = FetchOptions::new(key)
        .method(method)
        .retry(retry_overrides(retry));
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        options = options.header(name, value);
    }
    if let Some(body) = data {
        options = options.body(body);
    }

    let client = IdempotentClient::new(Arc::new(cfg.transport()), Arc::new(TokioSleeper))
        .with_retry_defaults(cfg.retry.unwrap_or_default());
    let response = client.fetch(url, options).await?;

    println!("HTTP {}", response.status);
    print!("{}", response.text());
    if !response.is_success() {
        tracing::info!("{} returned non-success status {}", url, response.status);
    }
    Ok(())
}

pub(crate) fn retry_overrides(args: &RetryArgs) -> RetryOverrides {
    RetryOverrides {
        retries: args.retries,
        factor: args.factor,
        min_timeout_ms: args.min_timeout_ms,
        max_timeout_ms: args.max_timeout_ms,
        randomize: args.no_jitter.then_some(false),
    }
}

/// Split `Name: value`.
pub(crate) fn parse_header(raw: &str) -> Result<(&str, &str)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("invalid header (expected `Name: value`): {raw}"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("invalid header (empty name): {raw}");
    }
    Ok((name, value.trim()))
}
