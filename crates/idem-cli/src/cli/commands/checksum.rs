//! `idem checksum <path>` – print a file digest.

use anyhow::Result;
use idem_core::checksum::{self, HashAlgorithm};
use std::path::Path;

pub async fn run_checksum(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let owned = path.to_path_buf();
    let digest =
        tokio::task::spawn_blocking(move || checksum::hash_path(algorithm, &owned)).await??;
    println!("{}  {}", digest, path.display());
    Ok(())
}
