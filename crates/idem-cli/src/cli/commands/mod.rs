//! CLI command handlers, one per file.

mod checksum;
mod fetch;
mod write;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use write::run_write;
