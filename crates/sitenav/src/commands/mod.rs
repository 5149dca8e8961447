//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod show;
pub(crate) mod sidebar;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use show::ShowArgs;
pub(crate) use sidebar::SidebarArgs;

/// Settings file arguments shared by every command.
#[derive(Args)]
pub(crate) struct SettingsArgs {
    /// Path to settings file (default: auto-discover sitenav.toml).
    #[arg(short, long, env = "SITENAV_CONFIG")]
    config: Option<PathBuf>,

    /// Site configuration file (overrides settings).
    #[arg(long)]
    site: Option<PathBuf>,

    /// Documentation source directory (overrides settings).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl SettingsArgs {
    /// Load settings with these arguments applied on top.
    pub(crate) fn load(self, out_file: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            site_config: self.site,
            source_dir: self.source_dir,
            out_file,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
