//! Rewrite files in place, converting CR and CRLF line endings to LF.

pub mod cli;
pub mod error;
pub mod normalize;
pub mod pattern;
pub mod report;
pub mod rewrite;

pub use cli::{display_path, run, run_to, Args};
pub use error::{FatalError, Result};
pub use normalize::{is_normalized, normalize, normalize_into};
pub use pattern::expand_pattern;
pub use report::Reporter;
pub use rewrite::{rewrite_file, FileOutcome};
