//! Temp file naming for atomic replace.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix of every temp file created next to a target.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Temp path in the same directory as `final_path`:
/// `.{unix millis}-{random base36}.tmp` (hidden, so globbing tools skip it).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let name = format!(".{}-{}{}", millis, base36(rand::random::<u64>()), TEMP_SUFFIX);
    match final_path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
