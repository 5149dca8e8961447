//! Link enumeration across the navigation structure.

use crate::model::{NavItem, SiteConfig};

/// Part of the configuration a link was declared in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkSource {
    /// Top navigation bar.
    Nav,
    /// Sidebar group item.
    Sidebar,
    /// Social link icon.
    Social,
}

/// A link value together with where it was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRef<'a> {
    /// Path into the configuration (e.g., `nav[0]`, `socialLinks[1]`).
    pub location: String,
    /// Declaring section.
    pub source: LinkSource,
    /// Link as written.
    pub link: &'a str,
}

/// True for links that leave the site (`https://`, `mailto:`, protocol-relative).
pub fn is_external(link: &str) -> bool {
    const SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:", "//"];
    SCHEMES.iter().any(|scheme| link.starts_with(scheme))
}

impl SiteConfig {
    /// Every link in declaration order: nav, then sidebar, then social links.
    pub fn links(&self) -> Vec<LinkRef<'_>> {
        let theme = &self.theme_config;
        let mut links = Vec::new();

        push_items(&mut links, "nav", LinkSource::Nav, &theme.nav);

        for (prefix, groups) in theme.sidebar.scopes() {
            let scope = match prefix {
                Some(prefix) => format!("sidebar[{prefix:?}]"),
                None => "sidebar".to_owned(),
            };
            for (group_idx, group) in groups.iter().enumerate() {
                let base = format!("{scope}[{group_idx}].items");
                push_items(&mut links, &base, LinkSource::Sidebar, &group.items);
            }
        }

        for (idx, social) in theme.social_links.iter().enumerate() {
            links.push(LinkRef {
                location: format!("socialLinks[{idx}]"),
                source: LinkSource::Social,
                link: &social.link,
            });
        }

        links
    }
}

fn push_items<'a>(
    links: &mut Vec<LinkRef<'a>>,
    base: &str,
    source: LinkSource,
    items: &'a [NavItem],
) {
    links.extend(items.iter().enumerate().map(|(idx, item)| LinkRef {
        location: format!("{base}[{idx}]"),
        source,
        link: &item.link,
    }));
}
