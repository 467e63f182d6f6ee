//! CLI error types.

use std::path::PathBuf;

use tabsmith_config::ConfigError;
use tabsmith_filter::FilterError;

/// CLI error type.
///
/// Messages name only their own context; causes are reached through
/// [`std::error::Error::source`] and joined by [`Output::error`](crate::output::Output::error).
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A filter failed on one input file.
    #[error("{}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: FilterError,
    },

    /// Reading or writing one file failed.
    #[error("{}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Wrap an I/O error with the path it concerns.
    pub(crate) fn file_io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::FileIo { path, source }
    }
}
