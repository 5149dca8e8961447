//! Reading and writing site configuration files.
//!
//! The same value can be stored as TOML, JSON, or YAML. The format is picked
//! from the file extension when loading from disk.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::SiteError;
use crate::model::SiteConfig;

/// Serialization format of a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl Format {
    /// Detect format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

impl SiteConfig {
    /// Parse a configuration from text.
    ///
    /// Only structural checks run here; call [`SiteConfig::validate`] for the rest.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the text does not match the schema.
    pub fn from_str_format(text: &str, format: Format) -> Result<Self, SiteError> {
        let config = match format {
            Format::Toml => toml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(config)
    }

    /// Serialize the configuration.
    ///
    /// `pretty` only affects JSON; TOML and YAML are always multi-line.
    ///
    /// # Errors
    ///
    /// Returns a serialization error from the underlying format crate.
    pub fn to_string_format(&self, format: Format, pretty: bool) -> Result<String, SiteError> {
        let text = match format {
            Format::Toml => toml::to_string_pretty(self)?,
            Format::Json if pretty => serde_json::to_string_pretty(self)?,
            Format::Json => serde_json::to_string(self)?,
            Format::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(text)
    }

    /// Read and parse a configuration file without running [`SiteConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its extension is not a
    /// supported format, or parsing fails.
    pub fn read(path: &Path) -> Result<Self, SiteError> {
        let format =
            Format::from_path(path).ok_or_else(|| SiteError::UnknownFormat(path.to_path_buf()))?;
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str_format(&text, format)?;

        tracing::debug!(
            path = %path.display(),
            %format,
            nav = config.theme_config.nav.len(),
            "Loaded site configuration"
        );
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if [`SiteConfig::read`] fails or validation reports issues.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize and write the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write(&self, path: &Path, format: Format, pretty: bool) -> Result<(), SiteError> {
        let text = self.to_string_format(format, pretty)?;
        let io_err = |source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, text).map_err(io_err)?;

        tracing::debug!(path = %path.display(), %format, "Wrote site configuration");
        Ok(())
    }
}
