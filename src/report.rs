//! Buffered per-file report: one line per file on the output sink.

use std::io::{BufWriter, Write};

use crate::rewrite::FileOutcome;

/// Owns the buffered output. Flushed by [`Reporter::finish`], or on drop when a
/// run is cut short by a fatal error.
pub struct Reporter<W: Write> {
    out: Option<BufWriter<W>>,
    quiet: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(BufWriter::new(out)),
            quiet: false,
        }
    }

    /// Suppress the lines for successfully converted files. Failures are always reported.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn report(&mut self, outcome: &FileOutcome) -> std::io::Result<()> {
        if self.quiet && outcome.is_success() {
            return Ok(());
        }
        match self.out.as_mut() {
            Some(out) => writeln!(out, "{outcome}"),
            None => Ok(()),
        }
    }

    /// Write a free-form line (usage text and the like).
    pub fn line(&mut self, text: &str) -> std::io::Result<()> {
        match self.out.as_mut() {
            Some(out) => writeln!(out, "{text}"),
            None => Ok(()),
        }
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        match self.out.take() {
            Some(out) => out.into_inner().map_err(|e| e.into_error()),
            None => Err(std::io::Error::other("reporter already finished")),
        }
    }
}

impl<W: Write> Drop for Reporter<W> {
    fn drop(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = out.flush();
        }
    }
}
