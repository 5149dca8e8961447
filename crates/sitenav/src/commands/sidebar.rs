//! `sitenav sidebar` command implementation.

use clap::Args;
use sitenav_site::{SidebarGroup, SiteConfig};

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Page URL path (e.g., /go-standard-library/os).
    page: String,

    #[command(flatten)]
    settings: SettingsArgs,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.settings.load(None)?;
        let site = SiteConfig::load(&config.site_resolved.config_file)?;

        let Some(resolved) = site.theme_config.sidebar.resolve(&self.page) else {
            output.warning(&format!("No sidebar applies to {}", self.page));
            return Ok(());
        };

        match resolved.prefix {
            Some(prefix) => output.highlight(&format!("{} (scope {prefix})", self.page)),
            None => output.highlight(&format!("{} (site-wide sidebar)", self.page)),
        }
        for line in render_groups(resolved.groups) {
            output.data(&line);
        }
        Ok(())
    }
}

/// Render groups as an indented outline, one line per group and item.
fn render_groups(groups: &[SidebarGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        let marker = if group.collapsed { "+" } else { "-" };
        lines.push(format!("{marker} {}", group.text));
        for item in &group.items {
            lines.push(format!("    {} -> {}", item.text, item.link));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sitenav_site::NavItem;

    #[test]
    fn test_render_groups_marks_collapsed() {
        let groups = vec![
            SidebarGroup {
                text: "标准库".to_owned(),
                collapsed: false,
                items: vec![NavItem::new("os", "/go-standard-library/os")],
            },
            SidebarGroup {
                text: "进阶".to_owned(),
                collapsed: true,
                items: Vec::new(),
            },
        ];

        assert_eq!(
            render_groups(&groups),
            vec![
                "- 标准库".to_owned(),
                "    os -> /go-standard-library/os".to_owned(),
                "+ 进阶".to_owned(),
            ]
        );
    }
}
