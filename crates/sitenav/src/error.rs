//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Check(String),

    #[error("{0}")]
    Export(String),
}
