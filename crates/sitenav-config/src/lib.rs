//! Project settings for sitenav.
//!
//! Parses `sitenav.toml` settings files with serde and provides
//! auto-discovery of settings files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! The path settings (`site.config`, `docs.source_dir`, `export.out_file`)
//! are expanded before they are resolved against the settings directory:
//! `${VAR}` must be set, `${VAR:-fallback}` falls back when it is not, and a
//! leading `~` becomes the home directory.

use std::borrow::Cow;
use std::env::{self, VarError};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override settings file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site configuration file.
    pub site_config: Option<PathBuf>,
    /// Override the content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the export target file.
    pub out_file: Option<PathBuf>,
}

/// Settings filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Extensions accepted for the export target.
const EXPORT_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

/// Project settings.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Site configuration location (relative string from TOML).
    site: SiteSettingsRaw,
    /// Content tree location (relative string from TOML).
    docs: DocsSettingsRaw,
    /// Export settings (relative string from TOML).
    export: ExportSettingsRaw,

    /// Resolved site settings (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteSettings,
    /// Resolved docs settings (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsSettings,
    /// Resolved export settings (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportSettings,
    /// Path to the settings file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteSettingsRaw {
    config: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsSettingsRaw {
    source_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportSettingsRaw {
    out_file: Option<String>,
    pretty: Option<bool>,
}

/// Resolved site settings with absolute paths.
#[derive(Debug, Default)]
pub struct SiteSettings {
    /// File holding the site navigation configuration.
    pub config_file: PathBuf,
}

/// Resolved docs settings with absolute paths.
#[derive(Debug, Default)]
pub struct DocsSettings {
    /// Root of the markdown content tree.
    pub source_dir: PathBuf,
}

/// Resolved export settings with absolute paths.
#[derive(Debug)]
pub struct ExportSettings {
    /// Where `sitenav export` writes the configuration object.
    pub out_file: PathBuf,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            out_file: PathBuf::new(),
            pretty: true,
        }
    }
}

impl ExportSettings {
    /// Lowercased extension of the export target, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.out_file
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Settings error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Settings error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Settings field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "`DOCS_DIR` is not set").
        message: String,
    },
}

/// Require a path to be non-empty.
fn require_non_empty(value: &Path, field: &str) -> Result<(), ConfigError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load settings from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over settings file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final settings are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site_config) = &settings.site_config {
            self.site_resolved.config_file.clone_from(site_config);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(out_file) = &settings.out_file {
            self.export_resolved.out_file.clone_from(out_file);
        }
    }

    /// Search for settings file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        discover_from(&cwd)
    }

    /// Create default settings with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default settings with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site_resolved: SiteSettings {
                config_file: base.join("site.toml"),
            },
            docs_resolved: DocsSettings {
                source_dir: base.join("docs"),
            },
            export_resolved: ExportSettings {
                out_file: base.join(".vitepress/config.json"),
                pretty: true,
            },
            ..Self::default()
        }
    }

    /// Load settings from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(config)
    }

    /// Validate settings values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.config_file, "site.config")?;
        require_non_empty(&self.docs_resolved.source_dir, "docs.source_dir")?;
        require_non_empty(&self.export_resolved.out_file, "export.out_file")?;

        match self.export_resolved.extension() {
            Some(ext) if EXPORT_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(ConfigError::Validation(format!(
                "export.out_file must end with one of: {}",
                EXPORT_EXTENSIONS.join(", ")
            ))),
        }
    }

    /// Expand environment variable references in settings strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (field, slot) in [
            ("site.config", &mut self.site.config),
            ("docs.source_dir", &mut self.docs.source_dir),
            ("export.out_file", &mut self.export.out_file),
        ] {
            if let Some(value) = slot.as_deref() {
                *slot = Some(expand_path_setting(value, field)?.into_owned());
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on settings directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteSettings {
            config_file: resolve(self.site.config.as_deref(), "site.toml"),
        };
        self.docs_resolved = DocsSettings {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
        };
        self.export_resolved = ExportSettings {
            out_file: resolve(self.export.out_file.as_deref(), ".vitepress/config.json"),
            pretty: self.export.pretty.unwrap_or(true),
        };
    }
}

/// Expand `${VAR}`, `${VAR:-fallback}` and a leading `~` in a path setting.
fn expand_path_setting<'a>(value: &'a str, field: &str) -> Result<Cow<'a, str>, ConfigError> {
    if !value.contains("${") && !value.starts_with('~') {
        return Ok(Cow::Borrowed(value));
    }

    shellexpand::full_with_context(value, || env::var("HOME").ok(), |var| env::var(var).map(Some))
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("{} is not set", e.var_name),
                VarError::NotUnicode(_) => format!("{} is not valid unicode", e.var_name),
            },
        })
}

/// Walk from `start` up to the filesystem root looking for `sitenav.toml`.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.site_resolved.config_file,
            PathBuf::from("/test/site.toml")
        );
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.export_resolved.out_file,
            PathBuf::from("/test/.vitepress/config.json")
        );
        assert!(config.export_resolved.pretty);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.site.config.is_none());
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
config = "config/site.yaml"

[docs]
source_dir = "content"

[export]
out_file = "dist/site.json"
pretty = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.config_file,
            PathBuf::from("/project/config/site.yaml")
        );
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.export_resolved.out_file,
            PathBuf::from("/project/dist/site.json")
        );
        assert!(!config.export_resolved.pretty);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.config_file,
            PathBuf::from("/project/site.toml")
        );
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/docs"));
        assert!(config.export_resolved.pretty);
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.site_resolved.config_file,
            PathBuf::from("/test/site.toml")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            site_config: Some(PathBuf::from("/other/site.json")),
            out_file: Some(PathBuf::from("/out/config.yaml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.site_resolved.config_file,
            PathBuf::from("/other/site.json")
        );
        assert_eq!(
            config.export_resolved.out_file,
            PathBuf::from("/out/config.yaml")
        );
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_TEST_DOCS", "zh-docs");
        }

        let toml = r#"
[docs]
source_dir = "${SITENAV_TEST_DOCS}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.docs.source_dir.as_deref(), Some("zh-docs"));

        unsafe {
            std::env::remove_var("SITENAV_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_TEST_MISSING_SITE");
        }

        let toml = r#"
[site]
config = "${SITENAV_TEST_MISSING_SITE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("site.config"));
    }

    #[test]
    fn test_expand_path_setting_fallback_and_embedding() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_TEST_UNSET_OUT");
            std::env::set_var("SITENAV_TEST_DIST", "dist");
        }

        let fallback =
            expand_path_setting("${SITENAV_TEST_UNSET_OUT:-.vitepress}/config.json", "export.out_file")
                .unwrap();
        let embedded = expand_path_setting("${SITENAV_TEST_DIST}/site.yaml", "export.out_file").unwrap();

        assert_eq!(fallback, ".vitepress/config.json");
        assert_eq!(embedded, "dist/site.yaml");

        unsafe {
            std::env::remove_var("SITENAV_TEST_DIST");
        }
    }

    #[test]
    fn test_expand_path_setting_tilde() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };

        let expanded = expand_path_setting("~/go-docs/site.toml", "site.config").unwrap();

        assert_eq!(expanded, format!("{home}/go-docs/site.toml"));
    }

    #[test]
    fn test_expand_path_setting_leaves_plain_paths() {
        let value = expand_path_setting("docs/$literal", "docs.source_dir").unwrap();
        assert!(matches!(value, Cow::Borrowed("docs/$literal")));
    }

    #[test]
    fn test_expand_path_setting_names_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_TEST_NO_DOCS");
        }

        let err = expand_path_setting("${SITENAV_TEST_NO_DOCS}", "docs.source_dir").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in docs.source_dir: SITENAV_TEST_NO_DOCS is not set"
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.source_dir = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_validate_export_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.export_resolved.out_file = PathBuf::from("/test/config.mts");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("export.out_file"));

        config.export_resolved.out_file = PathBuf::from("/test/config.YAML");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/sitenav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs]\nsource_dir = \"content\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.site_resolved.config_file, dir.path().join("site.toml"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_discover_from_finds_parent_settings() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/go-standard-library");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = discover_from(&nested).unwrap();

        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }
}
