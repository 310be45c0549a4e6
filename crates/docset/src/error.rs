//! CLI error types.

use docset_config::ConfigError;
use docset_site::{LoadError, LookupError, ValidationErrors};
use docset_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Storage(e) => Self::Storage(e),
            LoadError::Validation(e) => Self::Validation(e),
        }
    }
}
