//! In-place rewrite of a single file: read it whole, normalize, overwrite.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::cli::display_path;
use crate::error::{FatalError, Result};
use crate::normalize::{is_normalized, normalize_into};

/// What happened to one file. Open failures are recoverable; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success(PathBuf),
    OpenReadFailed(PathBuf),
    OpenWriteFailed(PathBuf),
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Success(p)
            | FileOutcome::OpenReadFailed(p)
            | FileOutcome::OpenWriteFailed(p) => p,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success(_))
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Success(p) => write!(f, "{}", display_path(p)),
            FileOutcome::OpenReadFailed(p) | FileOutcome::OpenWriteFailed(p) => {
                write!(f, "Couldn't open {}", display_path(p))
            }
        }
    }
}

/// Open options with no sharing: other processes can't open the file while we hold it.
fn exclusive(opts: &mut OpenOptions) -> &mut OpenOptions {
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        opts.share_mode(0);
    }
    opts
}

/// Allocate an empty buffer able to hold `size` bytes, or report the failure as fatal.
fn alloc_buffer(path: &Path, size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size).map_err(|_| FatalError::Allocation {
        path: path.to_path_buf(),
        size,
    })?;
    Ok(buf)
}

/// Load `len` bytes from `reader`. Fewer bytes than that is fatal.
fn read_all<R: Read>(path: &Path, reader: R, len: u64) -> Result<Vec<u8>> {
    let read_err = |source| FatalError::Read {
        path: path.to_path_buf(),
        source,
    };
    let size = usize::try_from(len).map_err(|_| FatalError::Allocation {
        path: path.to_path_buf(),
        size: usize::MAX,
    })?;
    let mut raw = alloc_buffer(path, size)?;
    let actual = reader.take(len).read_to_end(&mut raw).map_err(read_err)?;
    if actual != size {
        return Err(FatalError::ShortRead {
            path: path.to_path_buf(),
            expected: size,
            actual,
        });
    }
    trace!(path = %display_path(path), bytes = size, "read file");
    Ok(raw)
}

/// Overwrite `path` with `contents` and cut the file to exactly that length.
fn write_all(path: &Path, mut file: File, contents: &[u8]) -> Result<()> {
    let write_err = |source| FatalError::Write {
        path: path.to_path_buf(),
        source,
    };
    file.write_all(contents).map_err(write_err)?;
    file.set_len(contents.len() as u64).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(())
}

/// Rewrite one file in place with all line endings converted to LF.
///
/// The read handle is closed before the file is reopened for writing. If the
/// second open fails the file is left untouched; once writing has started the
/// rewrite is not atomic.
pub fn rewrite_file(path: &Path) -> Result<FileOutcome> {
    let raw = {
        let file = match exclusive(OpenOptions::new().read(true)).open(path) {
            Ok(f) => f,
            Err(e) => {
                debug!(path = %display_path(path), error = %e, "open for read failed");
                return Ok(FileOutcome::OpenReadFailed(path.to_path_buf()));
            }
        };
        let len = file
            .metadata()
            .map_err(|source| FatalError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        read_all(path, file, len)?
    };

    if is_normalized(&raw) {
        debug!(path = %display_path(path), "no CR bytes, content unchanged");
    }
    let mut normalized = alloc_buffer(path, raw.len())?;
    normalize_into(&raw, &mut normalized);
    debug!(
        path = %display_path(path),
        before = raw.len(),
        after = normalized.len(),
        "normalized"
    );
    drop(raw);

    let file = match exclusive(OpenOptions::new().write(true).truncate(true)).open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %display_path(path), error = %e, "open for write failed");
            return Ok(FileOutcome::OpenWriteFailed(path.to_path_buf()));
        }
    };
    write_all(path, file, &normalized)?;
    Ok(FileOutcome::Success(path.to_path_buf()))
}
