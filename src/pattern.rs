//! Expand shell-style glob patterns into the regular files they name.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::{trace, warn};

use crate::cli::display_path;
use crate::error::{FatalError, Result};

fn has_glob_meta(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

/// Use `/` as the only separator. Backslashes are separators on Windows and escapes elsewhere.
fn normalize_separators(pattern: &str) -> String {
    if cfg!(windows) {
        pattern.replace('\\', "/")
    } else {
        pattern.to_string()
    }
}

/// A pattern split at its first component containing a glob metacharacter.
#[derive(Debug, PartialEq, Eq)]
enum Split {
    /// No metacharacters: the pattern names one path.
    Literal(PathBuf),
    /// `base` is `None` when the glob starts at the current directory.
    Glob { base: Option<PathBuf>, glob: String },
}

fn split_pattern(pattern: &str) -> Split {
    let normalized = normalize_separators(pattern);
    let parts: Vec<&str> = normalized.split('/').collect();
    let Some(i) = parts.iter().position(|p| has_glob_meta(p)) else {
        return Split::Literal(PathBuf::from(pattern));
    };
    let base = if i == 0 {
        None
    } else {
        let joined = parts[..i].join("/");
        Some(PathBuf::from(if joined.is_empty() { "/".to_string() } else { joined }))
    };
    Split::Glob {
        base,
        glob: parts[i..].join("/"),
    }
}

struct Walk<'a> {
    matcher: &'a GlobMatcher,
    recursive: bool,
    files: Vec<PathBuf>,
    matched_any: bool,
}

impl Walk<'_> {
    /// `rel` is the directory relative to the walk base, `/`-separated ("" for the base itself).
    fn visit(&mut self, dir: &Path, rel: &str) {
        let read_dir = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                trace!(dir = %display_path(dir), error = %e, "skipping unreadable directory");
                return;
            }
        };
        let mut dirs = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_rel = if rel.is_empty() {
                name
            } else {
                format!("{rel}/{name}")
            };
            let is_match = self.matcher.is_match(&child_rel);
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                self.matched_any |= is_match;
                dirs.push((path, child_rel));
            } else if file_type.is_symlink() {
                // Symlinked files are converted; symlinked directories are never entered.
                self.matched_any |= is_match;
                if is_match && path.is_file() {
                    self.files.push(path);
                }
            } else if file_type.is_file() && is_match {
                self.matched_any = true;
                self.files.push(path);
            }
        }
        if self.recursive {
            for (d, d_rel) in dirs {
                self.visit(&d, &d_rel);
            }
        }
    }
}

fn expand_glob(pattern: &str, base: Option<&Path>, glob: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|source| FatalError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();
    let mut walk = Walk {
        matcher: &matcher,
        recursive: glob.contains('/') || glob.contains("**"),
        files: Vec::new(),
        matched_any: false,
    };
    match base {
        Some(b) => walk.visit(b, ""),
        None => walk.visit(Path::new("."), ""),
    }
    if !walk.matched_any {
        return Err(FatalError::NoMatch {
            pattern: pattern.to_string(),
        });
    }
    // Entries under "." are reported without the "./" prefix.
    let mut files: Vec<PathBuf> = match base {
        Some(_) => walk.files,
        None => walk
            .files
            .into_iter()
            .map(|p| p.strip_prefix(".").map(Path::to_path_buf).unwrap_or(p))
            .collect(),
    };
    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    Ok(files)
}

/// Expand `pattern` into the regular files it matches, sorted case-insensitively.
///
/// `*` and `?` stay within one path component; `**` crosses directories.
/// Directories that match are skipped, and symlinked directories are not
/// walked into. A glob that matches nothing at all, not even a directory, is
/// fatal. A pattern without metacharacters is returned as is when it names a
/// regular file or nothing at all; anything else (directory, device, FIFO) is
/// skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = match split_pattern(pattern) {
        // A missing literal path is left to the rewriter, which reports it as unopenable.
        Split::Literal(path) if !path.exists() || path.is_file() => vec![path],
        Split::Literal(path) => {
            warn!(path = %display_path(&path), "not a regular file, skipping");
            Vec::new()
        }
        Split::Glob { base, glob } => {
            let files = expand_glob(pattern, base.as_deref(), &glob)?;
            if files.is_empty() {
                warn!(pattern, "pattern matched only directories");
            }
            files
        }
    };
    trace!(pattern, count = files.len(), "expanded pattern");
    Ok(files)
}
