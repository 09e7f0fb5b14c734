use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures of the CSV load and export boundary.
///
/// The index itself never fails; these only come from reading or writing
/// contact files. A load that fails inserts nothing.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or created.
    #[error("cannot open `{}`", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data is not CSV, a row is malformed, or a `name`/`phone` column is missing.
    #[error("invalid contact data")]
    Csv(#[from] csv::Error),

    /// Writing or flushing the output failed.
    #[error("failed to write contacts")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }
}
