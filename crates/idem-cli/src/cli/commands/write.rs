//! `idem write <path>` – idempotent file write.

use anyhow::{Context, Result};
use idem_core::write::{idempotent_write, WriteData, WriteOptions};
use std::path::Path;

pub async fn run_write(
    path: &Path,
    text: Option<String>,
    from: Option<&Path>,
    options: &WriteOptions,
) -> Result<()> {
    let data = match (text, from) {
        (Some(text), _) => WriteData::Text(text),
        (None, Some(src)) => WriteData::Bytes(
            tokio::fs::read(src)
                .await
                .with_context(|| format!("read {}", src.display()))?,
        ),
        (None, None) => anyhow::bail!("either --text or --from is required"),
    };

    let result = idempotent_write(path, data, options).await?;
    println!("{}  {}", result.operation, result.path.display());
    Ok(())
}
