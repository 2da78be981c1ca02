use super::Error;
use std::path::{Path, PathBuf};

/// Error when creating an output directory or writing a generated file fails.
#[derive(Debug)]
pub(super) struct IoError {
    path: Option<PathBuf>,
    inner: std::io::Error,
}

impl IoError {
    pub(super) fn new(path: Option<PathBuf>, inner: std::io::Error) -> IoError {
        IoError { path, inner }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "i/o error at `{}`: {}", path.display(), self.inner),
            None => write!(f, "i/o error: {}", self.inner),
        }
    }
}

impl Error {
    /// Creates an i/o error for the given path.
    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Error {
        Error::from(super::ErrorKind::Io(IoError::new(
            Some(path.as_ref().to_path_buf()),
            err,
        )))
    }

    /// Returns `true` if this error is an i/o error.
    pub fn is_io(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Io(_)))
    }
}
