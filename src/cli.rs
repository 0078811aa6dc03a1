//! CLI: args, path display, and run logic.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing::debug;

use crate::error::{FatalError, Result};
use crate::pattern::expand_pattern;
use crate::report::Reporter;
use crate::rewrite::rewrite_file;

const USAGE: &str = "Usage: convertlf <pattern>...
  Example: convertlf *.c *.h
  Example: convertlf src/**/*.rs";

#[derive(Parser)]
#[command(name = "convertlf")]
#[command(about = "Rewrite files in place, converting CR and CRLF line endings to LF.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Glob pattern naming files to convert; repeatable (e.g. *.c, src/**/*.h)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Only print files that couldn't be opened
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose: -v = log each file's sizes, -vv = also log reads and pattern expansion
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter for the verbosity flag; `RUST_LOG` takes precedence in `main`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Format path for user-facing output: strip Windows extended path prefix `\\?\` so it displays as a normal path.
pub fn display_path(path: &Path) -> std::borrow::Cow<'_, str> {
    let s = path.to_string_lossy();
    #[cfg(windows)]
    {
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return std::borrow::Cow::Owned(stripped.to_string());
        }
    }
    s
}

fn convert_all<W: Write>(patterns: &[String], reporter: &mut Reporter<W>) -> Result<()> {
    for pattern in patterns {
        let files = expand_pattern(pattern)?;
        debug!(pattern = %pattern, files = files.len(), "processing pattern");
        for path in &files {
            let outcome = rewrite_file(path)?;
            reporter.report(&outcome)?;
        }
    }
    Ok(())
}

fn fatal(e: &FatalError) -> i32 {
    debug!(error = ?e, "aborting");
    eprintln!("Error: {e}. Exiting...");
    1
}

/// Run against `out` as the report sink. Returns the process exit code.
pub fn run_to<W: Write>(args: Args, out: W) -> i32 {
    let mut reporter = Reporter::new(out).quiet(args.quiet);
    if args.patterns.is_empty() {
        if let Err(e) = reporter.line(USAGE) {
            return fatal(&FatalError::Output(e));
        }
        if let Err(e) = reporter.finish() {
            return fatal(&FatalError::Output(e));
        }
        return 1;
    }
    if let Err(e) = convert_all(&args.patterns, &mut reporter) {
        // Lines already reported go out before the diagnostic.
        drop(reporter);
        return fatal(&e);
    }
    match reporter.finish() {
        Ok(_) => 0,
        Err(e) => fatal(&FatalError::Output(e)),
    }
}

pub fn run(args: Args) -> i32 {
    run_to(args, std::io::stdout().lock())
}
