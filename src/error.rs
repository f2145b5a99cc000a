//! Error taxonomy for the filesystem tools.
//!
//! Errors never cross the tool boundary as protocol faults; the dispatch
//! layer renders them to `Error: ...` text. The kinds exist so internal
//! code and tests can tell outcomes apart before that flattening happens.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure modes of the sandboxed filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    /// The resolved path lies outside the base directory.
    #[error("Path traversal attempt detected: '{path}' is outside the base directory")]
    Containment { path: String },
    /// `editFile` was pointed at a file that is not there.
    #[error("File '{path}' does not exist. Use createFile to create new files.")]
    NotFound { path: String },
    /// `createFile` refused to clobber an existing file.
    #[error("File '{path}' already exists. Use editFile to modify existing files.")]
    AlreadyExists { path: String },
    /// OS-level failure (permissions, disk, missing target on read/delete),
    /// tagged with the operation that hit it.
    #[error("{op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: String,
        source: io::Error,
    },
}

impl FsError {
    pub(crate) fn io(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
