//! Schema checks beyond what deserialization enforces.
//!
//! Outline level pairs and search providers are rejected while parsing; this
//! module covers the rules serde cannot express, and reports every problem
//! instead of stopping at the first.

use std::fmt;

use crate::error::SiteError;
use crate::links::is_external;
use crate::model::{NavItem, SearchConfig, SiteConfig};

/// A single schema problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path into the configuration (e.g., `themeConfig.nav[2].link`).
    pub location: String,
    /// What is wrong.
    pub message: String,
}

impl ValidationIssue {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl SiteConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Invalid` carrying every issue found.
    pub fn validate(&self) -> Result<(), SiteError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SiteError::Invalid(issues))
        }
    }

    /// Collect all schema issues, in declaration order.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        require_text(&mut issues, "title", &self.title);
        if let Some(lang) = &self.lang {
            require_text(&mut issues, "lang", lang);
        }
        if let Some(base) = &self.base
            && !(base.starts_with('/') && base.ends_with('/'))
        {
            issues.push(ValidationIssue::new(
                "base",
                "must start and end with '/'",
            ));
        }

        let theme = &self.theme_config;

        if let Some(SearchConfig::Algolia { options }) = &theme.search {
            require_text(&mut issues, "themeConfig.search.options.appId", &options.app_id);
            require_text(&mut issues, "themeConfig.search.options.apiKey", &options.api_key);
            require_text(
                &mut issues,
                "themeConfig.search.options.indexName",
                &options.index_name,
            );
        }

        check_items(&mut issues, "themeConfig.nav", &theme.nav);

        if let Some(outline) = &theme.outline {
            require_text(&mut issues, "themeConfig.outline.label", &outline.label);
        }

        for (prefix, groups) in theme.sidebar.scopes() {
            let scope = match prefix {
                Some(prefix) => {
                    let scope = format!("themeConfig.sidebar[{prefix:?}]");
                    if !(prefix.starts_with('/') && prefix.ends_with('/')) {
                        issues.push(ValidationIssue::new(
                            scope.clone(),
                            "path prefix must start and end with '/'",
                        ));
                    }
                    scope
                }
                None => "themeConfig.sidebar".to_owned(),
            };
            for (idx, group) in groups.iter().enumerate() {
                let location = format!("{scope}[{idx}]");
                require_text(&mut issues, &format!("{location}.text"), &group.text);
                check_items(&mut issues, &format!("{location}.items"), &group.items);
            }
        }

        for (idx, social) in theme.social_links.iter().enumerate() {
            let location = format!("themeConfig.socialLinks[{idx}]");
            require_text(&mut issues, &format!("{location}.icon"), &social.icon);
            if !(social.link.starts_with("https://") || social.link.starts_with("http://")) {
                issues.push(ValidationIssue::new(
                    format!("{location}.link"),
                    "must be an http:// or https:// URL",
                ));
            }
        }

        issues
    }
}

fn require_text(issues: &mut Vec<ValidationIssue>, location: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(location, "cannot be empty"));
    }
}

fn check_items(issues: &mut Vec<ValidationIssue>, base: &str, items: &[NavItem]) {
    for (idx, item) in items.iter().enumerate() {
        let location = format!("{base}[{idx}]");
        require_text(issues, &format!("{location}.text"), &item.text);

        let link = item.link.trim();
        if link.is_empty() {
            issues.push(ValidationIssue::new(
                format!("{location}.link"),
                "cannot be empty",
            ));
        } else if link.len() != item.link.len() {
            issues.push(ValidationIssue::new(
                format!("{location}.link"),
                "has leading or trailing whitespace",
            ));
        } else if !is_external(link) && !link.starts_with('/') {
            issues.push(ValidationIssue::new(
                format!("{location}.link"),
                format!("internal link {link:?} must start with '/'"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AlgoliaOptions, Outline, OutlineLevel, Sidebar, SidebarGroup, SocialLink, ThemeConfig,
    };

    fn valid_config() -> SiteConfig {
        SiteConfig {
            title: "Go 标准库".to_owned(),
            description: "Go 标准库中文参考".to_owned(),
            lang: Some("zh-CN".to_owned()),
            base: None,
            theme_config: ThemeConfig {
                search: Some(SearchConfig::Local {}),
                nav: vec![
                    NavItem::new("首页", "/"),
                    NavItem::new("标准库", "/go-standard-library/"),
                ],
                outline: Some(Outline {
                    label: "页面导航".to_owned(),
                    level: OutlineLevel::default(),
                }),
                sidebar: Sidebar::Scoped(
                    [(
                        "/go-standard-library/".to_owned(),
                        vec![SidebarGroup {
                            text: "标准库".to_owned(),
                            collapsed: false,
                            items: vec![NavItem::new("os", "/go-standard-library/os")],
                        }],
                    )]
                    .into_iter()
                    .collect(),
                ),
                social_links: vec![SocialLink {
                    icon: "github".to_owned(),
                    link: "https://github.com/golang/go".to_owned(),
                }],
            },
        }
    }

    fn assert_issue(config: &SiteConfig, location: &str, fragment: &str) {
        let issues = config.issues();
        assert!(
            issues
                .iter()
                .any(|i| i.location == location && i.message.contains(fragment)),
            "Expected issue at {location} containing '{fragment}', got: {issues:?}"
        );
    }

    #[test]
    fn test_validate_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title() {
        let config = SiteConfig {
            title: "  ".to_owned(),
            ..valid_config()
        };
        assert_issue(&config, "title", "empty");
    }

    #[test]
    fn test_validate_base_needs_slashes() {
        let config = SiteConfig {
            base: Some("docs".to_owned()),
            ..valid_config()
        };
        assert_issue(&config, "base", "'/'");
    }

    #[test]
    fn test_validate_nav_relative_link() {
        let mut config = valid_config();
        config.theme_config.nav.push(NavItem::new("fmt", "fmt.md"));
        assert_issue(&config, "themeConfig.nav[2].link", "must start with '/'");
    }

    #[test]
    fn test_validate_nav_external_link_allowed() {
        let mut config = valid_config();
        config
            .theme_config
            .nav
            .push(NavItem::new("pkg.go.dev", "https://pkg.go.dev/std"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_link_whitespace() {
        let mut config = valid_config();
        config.theme_config.nav[0].link = " /".to_owned();
        assert_issue(&config, "themeConfig.nav[0].link", "whitespace");
    }

    #[test]
    fn test_validate_sidebar_prefix_slashes() {
        let mut config = valid_config();
        config.theme_config.sidebar = Sidebar::Scoped(
            [("go-standard-library".to_owned(), Vec::new())]
                .into_iter()
                .collect(),
        );
        assert_issue(
            &config,
            "themeConfig.sidebar[\"go-standard-library\"]",
            "prefix",
        );
    }

    #[test]
    fn test_validate_sidebar_item_empty_link() {
        let mut config = valid_config();
        if let Sidebar::Scoped(scopes) = &mut config.theme_config.sidebar {
            scopes["/go-standard-library/"][0]
                .items
                .push(NavItem::new("fmt", ""));
        }
        assert_issue(
            &config,
            "themeConfig.sidebar[\"/go-standard-library/\"][0].items[1].link",
            "empty",
        );
    }

    #[test]
    fn test_validate_social_link_requires_url() {
        let mut config = valid_config();
        config.theme_config.social_links[0].link = "github.com/golang/go".to_owned();
        assert_issue(&config, "themeConfig.socialLinks[0].link", "https://");
    }

    #[test]
    fn test_validate_algolia_options_required() {
        let mut config = valid_config();
        config.theme_config.search = Some(SearchConfig::Algolia {
            options: AlgoliaOptions {
                app_id: "APP".to_owned(),
                api_key: String::new(),
                index_name: "go-std".to_owned(),
            },
        });
        assert_issue(&config, "themeConfig.search.options.apiKey", "empty");
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let mut config = valid_config();
        config.title = String::new();
        config.theme_config.outline = Some(Outline {
            label: String::new(),
            level: OutlineLevel::default(),
        });

        let err = config.validate().unwrap_err();

        let SiteError::Invalid(issues) = err else {
            panic!("Expected SiteError::Invalid");
        };
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].location, "title");
        assert_eq!(issues[1].location, "themeConfig.outline.label");
    }
}
