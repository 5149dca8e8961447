//! `sitenav export` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use sitenav_site::{Format, SiteConfig};

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Output format for export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Json,
    Yaml,
    Toml,
}

impl From<ExportFormat> for Format {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Yaml => Self::Yaml,
            ExportFormat::Toml => Self::Toml,
        }
    }
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Output format (default: from the output file extension).
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output file (overrides settings).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write to stdout instead of a file.
    #[arg(long, conflicts_with = "out")]
    stdout: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site configuration is invalid or cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.settings.load(self.out)?;
        let site = SiteConfig::load(&config.site_resolved.config_file)?;

        let export = &config.export_resolved;
        let extension = export.extension();
        let target = (!self.stdout).then_some(extension.as_deref()).flatten();
        let format = resolve_format(self.format, extension.as_deref(), target)?;

        if self.stdout {
            output.data(site.to_string_format(format, export.pretty)?.trim_end());
            return Ok(());
        }

        site.write(&export.out_file, format, export.pretty)?;
        output.success(&format!(
            "Exported {} to {}",
            config.site_resolved.config_file.display(),
            export.out_file.display()
        ));
        Ok(())
    }
}

/// Pick the export format: explicit flag, then file extension, then JSON.
///
/// `target` is the extension of the file being written, if any. A flag that
/// names a different format than that extension is an error, since the file
/// would be read back with the wrong parser.
fn resolve_format(
    flag: Option<ExportFormat>,
    extension: Option<&str>,
    target: Option<&str>,
) -> Result<Format, CliError> {
    let from_extension = extension.and_then(|ext| ext.parse::<Format>().ok());
    let Some(flag) = flag.map(Format::from) else {
        return Ok(from_extension.unwrap_or(Format::Json));
    };

    match target.and_then(|ext| ext.parse::<Format>().ok()) {
        Some(file_format) if file_format != flag => Err(CliError::Export(format!(
            "--format {flag} does not match the .{} output file; pass --out with a matching extension or use --stdout",
            target.unwrap_or_default()
        ))),
        _ => Ok(flag),
    }
}
