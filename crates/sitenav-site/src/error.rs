//! Site configuration error types.

use std::path::PathBuf;

use crate::validate::ValidationIssue;

/// Error loading, serializing, or validating a site configuration.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error reading or writing a configuration file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File extension is not a supported format.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnknownFormat(PathBuf),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// JSON parse or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parse or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Schema validation failed.
    #[error("{} validation issue(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
