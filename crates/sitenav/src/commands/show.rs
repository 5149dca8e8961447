//! `sitenav show` command implementation.

use clap::Args;
use sitenav_site::SiteConfig;

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    settings: SettingsArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.settings.load(None)?;
        let site = SiteConfig::load(&config.site_resolved.config_file)?;
        let theme = &site.theme_config;

        output.highlight(&site.title);
        if !site.description.is_empty() {
            output.detail(&site.description);
        }

        let search = theme.search.as_ref().map_or("none", |s| s.provider());
        output.data(&format!("search: {search}"));
        if let Some(outline) = &theme.outline {
            output.data(&format!("outline: {} {}", outline.label, outline.level));
        }

        output.data(&format!("nav ({}):", theme.nav.len()));
        for item in &theme.nav {
            output.data(&format!("    {} -> {}", item.text, item.link));
        }

        output.data("sidebar:");
        for (prefix, groups) in theme.sidebar.scopes() {
            let items: usize = groups.iter().map(|g| g.items.len()).sum();
            output.data(&format!(
                "    {}: {} group(s), {items} item(s)",
                prefix.unwrap_or("*"),
                groups.len()
            ));
        }

        for social in &theme.social_links {
            output.data(&format!("social: {} -> {}", social.icon, social.link));
        }
        Ok(())
    }
}
