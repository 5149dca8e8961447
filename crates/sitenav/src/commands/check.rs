//! `sitenav check` command implementation.

use clap::Args;
use sitenav_content::{BrokenLink, ContentTree, check_links};
use sitenav_site::{SiteConfig, ValidationIssue};

use super::SettingsArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Skip checking links against the content tree.
    #[arg(long)]
    no_links: bool,
}

/// Problems found by a check run.
#[derive(Debug, Default)]
struct CheckReport {
    issues: Vec<ValidationIssue>,
    broken_links: Vec<BrokenLink>,
}

impl CheckReport {
    fn is_ok(&self) -> bool {
        self.issues.is_empty() && self.broken_links.is_empty()
    }

    fn summary(&self) -> String {
        format!(
            "{} schema issue(s), {} broken link(s)",
            self.issues.len(),
            self.broken_links.len()
        )
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any problem is found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.settings.load(None)?;
        let site_path = &config.site_resolved.config_file;
        output.info(&format!("Site config: {}", site_path.display()));

        let site = SiteConfig::read(site_path)?;

        let tree = if self.no_links {
            output.info("Link check: skipped");
            None
        } else {
            let source_dir = &config.docs_resolved.source_dir;
            let tree = ContentTree::scan(source_dir);
            output.info(&format!(
                "Source directory: {} ({} documents)",
                source_dir.display(),
                tree.len()
            ));
            if tree.is_empty() {
                output.warning("No markdown documents found; every internal link will be reported");
            }
            Some(tree)
        };

        let report = run_check(&site, tree.as_ref());
        for issue in &report.issues {
            output.error(&issue.to_string());
        }
        for broken in &report.broken_links {
            output.error(&broken.to_string());
        }

        if report.is_ok() {
            output.success("Configuration OK");
            Ok(())
        } else {
            Err(CliError::Check(report.summary()))
        }
    }
}

/// Validate `site` and, when a content tree is given, check its links.
fn run_check(site: &SiteConfig, tree: Option<&ContentTree>) -> CheckReport {
    CheckReport {
        issues: site.issues(),
        broken_links: tree.map(|t| check_links(site, t)).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitenav_site::Format;

    const SITE: &str = r#"
title = ""

[themeConfig]
nav = [
    { text = "首页", link = "/" },
    { text = "标准库", link = "/go-standard-library/" },
]
"#;

    #[test]
    fn test_run_check_collects_issues_and_links() {
        let site = SiteConfig::from_str_format(SITE, Format::Toml).unwrap();
        let tree = ContentTree::from_files(["index.md"]);

        let report = run_check(&site, Some(&tree));

        assert!(!report.is_ok());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.broken_links.len(), 1);
        assert_eq!(report.summary(), "1 schema issue(s), 1 broken link(s)");
    }

    #[test]
    fn test_run_check_without_tree_skips_links() {
        let site = SiteConfig::from_str_format(SITE, Format::Toml).unwrap();

        let report = run_check(&site, None);

        assert!(report.broken_links.is_empty());
        assert_eq!(report.issues.len(), 1);
    }
}
