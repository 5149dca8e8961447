//! Site navigation configuration data model.
//!
//! Field names serialize in camelCase so the exported value matches the
//! object the site generator's `defineConfig` entry point expects
//! (`themeConfig`, `socialLinks`, ...).
//!
//! The whole structure is built once at load time and never mutated.

use std::fmt;

use indexmap::IndexMap;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Site display name.
    pub title: String,
    /// Site meta description.
    #[serde(default)]
    pub description: String,
    /// Document language (e.g., `zh-CN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// URL base the site is deployed under (e.g., `/docs/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Configuration consumed by the theme.
    #[serde(default)]
    pub theme_config: ThemeConfig,
}

/// Theme configuration: navigation bar, sidebar, outline, search and social links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    /// Search backend selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
    /// Top navigation bar entries, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<NavItem>,
    /// In-page outline widget settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    /// Sidebar, either site-wide or keyed by URL path prefix.
    #[serde(default, skip_serializing_if = "Sidebar::is_unset")]
    pub sidebar: Sidebar,
    /// Social link icons, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
}

/// A single navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    /// Display text.
    pub text: String,
    /// Link target (URL path or absolute URL).
    pub link: String,
}

impl NavItem {
    /// Create a navigation item.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// Labeled, collapsible cluster of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Whether the group starts collapsed.
    #[serde(default)]
    pub collapsed: bool,
    /// Links in the group, in display order.
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Sidebar layout.
///
/// The flat form applies the same groups to every page. The scoped form maps
/// URL path prefixes (e.g., `/go-standard-library/`) to the groups shown for
/// pages under that prefix; declaration order of prefixes is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sidebar {
    /// One list of groups for the whole site.
    Flat(Vec<SidebarGroup>),
    /// Groups per URL path prefix.
    Scoped(IndexMap<String, Vec<SidebarGroup>>),
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::Scoped(IndexMap::new())
    }
}

/// Branches on the input shape so errors inside a group keep their message.
impl<'de> Deserialize<'de> for Sidebar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarVisitor;

        impl<'de> Visitor<'de> for SidebarVisitor {
            type Value = Sidebar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of sidebar groups or a map from path prefix to groups")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Sidebar, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(Sidebar::Flat)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Sidebar, A::Error> {
                IndexMap::deserialize(MapAccessDeserializer::new(map)).map(Sidebar::Scoped)
            }
        }

        deserializer.deserialize_any(SidebarVisitor)
    }
}

/// Sidebar selected for a page.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedSidebar<'a> {
    /// Matching prefix; `None` for a flat sidebar.
    pub prefix: Option<&'a str>,
    /// Groups shown for the page.
    pub groups: &'a [SidebarGroup],
}

impl Sidebar {
    /// True if no groups are declared at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(groups) => groups.is_empty(),
            Self::Scoped(scopes) => scopes.is_empty(),
        }
    }

    /// True only for the default (absent) sidebar, which is left out when serializing.
    /// An explicit empty list stays flat.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Scoped(scopes) if scopes.is_empty())
    }

    /// Iterate `(prefix, groups)` pairs. The flat form yields a single `None` prefix.
    pub fn scopes(&self) -> Box<dyn Iterator<Item = (Option<&str>, &[SidebarGroup])> + '_> {
        match self {
            Self::Flat(groups) => Box::new(std::iter::once((None, groups.as_slice()))),
            Self::Scoped(scopes) => Box::new(
                scopes
                    .iter()
                    .map(|(prefix, groups)| (Some(prefix.as_str()), groups.as_slice())),
            ),
        }
    }

    /// Select the sidebar shown for `page_path`.
    ///
    /// A flat sidebar applies everywhere. For the scoped form the longest
    /// prefix that the page path falls under wins; `/guide` falls under
    /// `/guide/`.
    pub fn resolve(&self, page_path: &str) -> Option<ResolvedSidebar<'_>> {
        match self {
            Self::Flat(groups) if groups.is_empty() => None,
            Self::Flat(groups) => Some(ResolvedSidebar {
                prefix: None,
                groups,
            }),
            Self::Scoped(scopes) => {
                let path = normalize_page_path(page_path);
                scopes
                    .iter()
                    .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
                    .max_by_key(|(prefix, _)| prefix.len())
                    .map(|(prefix, groups)| ResolvedSidebar {
                        prefix: Some(prefix.as_str()),
                        groups,
                    })
            }
        }
    }

    /// Groups shown for `page_path`, empty if none apply.
    pub fn groups_for(&self, page_path: &str) -> &[SidebarGroup] {
        match self.resolve(page_path) {
            Some(resolved) => resolved.groups,
            None => &[],
        }
    }
}

/// Give a page path a leading and trailing slash so it compares against prefixes.
fn normalize_page_path(page_path: &str) -> String {
    let trimmed = page_path.trim();
    let mut path = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('/') {
        path.push('/');
    }
    path.push_str(trimmed);
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Social link icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon name (e.g., `github`).
    pub icon: String,
    /// Absolute URL.
    pub link: String,
}

/// Search backend selection, tagged by `provider`.
///
/// `Local` is an empty struct variant so stray keys next to
/// `provider = "local"` are rejected instead of dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase", deny_unknown_fields)]
pub enum SearchConfig {
    /// Built-in local search index.
    Local {},
    /// Hosted Algolia `DocSearch`.
    Algolia {
        /// Credentials and index name.
        options: AlgoliaOptions,
    },
}

impl SearchConfig {
    /// Provider name as written in configuration.
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Local {} => "local",
            Self::Algolia { .. } => "algolia",
        }
    }
}

/// Algolia `DocSearch` options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AlgoliaOptions {
    /// Application ID.
    pub app_id: String,
    /// Search-only API key.
    pub api_key: String,
    /// Index to query.
    pub index_name: String,
}

/// In-page outline ("on this page") widget settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outline {
    /// Widget heading.
    pub label: String,
    /// Heading depths shown.
    #[serde(default)]
    pub level: OutlineLevel,
}

/// Inclusive range of heading depths shown in the outline, written `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "[u8; 2]")]
pub struct OutlineLevel {
    min: u8,
    max: u8,
}

/// Error constructing an [`OutlineLevel`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutlineLevelError {
    /// Not exactly two elements.
    #[error("outline level must be a [min, max] pair, got {0} element(s)")]
    Length(usize),
    /// Heading depth outside 1..=6.
    #[error("outline level {0} is outside heading depths 1..=6")]
    OutOfRange(u8),
    /// Pair is descending.
    #[error("outline level [{min}, {max}] must be ascending")]
    Descending {
        /// First element.
        min: u8,
        /// Second element.
        max: u8,
    },
}

impl OutlineLevel {
    /// Deepest heading level HTML has.
    const MAX_DEPTH: u8 = 6;

    /// Create a level range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is outside 1..=6 or `min > max`.
    pub fn new(min: u8, max: u8) -> Result<Self, OutlineLevelError> {
        for depth in [min, max] {
            if !(1..=Self::MAX_DEPTH).contains(&depth) {
                return Err(OutlineLevelError::OutOfRange(depth));
            }
        }
        if min > max {
            return Err(OutlineLevelError::Descending { min, max });
        }
        Ok(Self { min, max })
    }

    /// Shallowest heading depth shown.
    pub fn min(self) -> u8 {
        self.min
    }

    /// Deepest heading depth shown.
    pub fn max(self) -> u8 {
        self.max
    }
}

impl Default for OutlineLevel {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

impl TryFrom<Vec<u8>> for OutlineLevel {
    type Error = OutlineLevelError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            &[min, max] => Self::new(min, max),
            other => Err(OutlineLevelError::Length(other.len())),
        }
    }
}

impl From<OutlineLevel> for [u8; 2] {
    fn from(level: OutlineLevel) -> Self {
        [level.min, level.max]
    }
}

impl fmt::Display for OutlineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
