//! Site navigation configuration for sitenav.
//!
//! [`SiteConfig`] is a typed model of the configuration object handed to the
//! static site generator: site title and description plus a [`ThemeConfig`]
//! with the top navigation bar, sidebar, outline widget, search provider and
//! social links.
//!
//! # Sidebar scoping
//!
//! A [`Sidebar`] is either one flat list applied to every page, or a mapping
//! from URL path prefix to groups. [`Sidebar::resolve`] picks the groups for a
//! page using the longest matching prefix.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sitenav_site::SiteConfig;
//!
//! let config = SiteConfig::load(Path::new("site.toml"))?;
//! for group in config.theme_config.sidebar.groups_for("/go-standard-library/os") {
//!     println!("{}", group.text);
//! }
//! ```

mod error;
mod format;
mod links;
mod model;
mod validate;

pub use error::SiteError;
pub use format::Format;
pub use links::{LinkRef, LinkSource, is_external};
pub use model::{
    AlgoliaOptions, NavItem, Outline, OutlineLevel, OutlineLevelError, ResolvedSidebar,
    SearchConfig, Sidebar, SidebarGroup, SiteConfig, SocialLink, ThemeConfig,
};
pub use validate::ValidationIssue;
