//! Atomic file replacement.
//!
//! New content is written to a sibling temp file in the target's directory
//! and then renamed over the target, so readers only ever see the old or the
//! new complete file.

mod atomic;
mod temp;

pub use atomic::{atomic_write, FILE_MODE};
pub use temp::{temp_path, TEMP_SUFFIX};
