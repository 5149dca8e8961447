//! Content tree scanning and link checking for sitenav.
//!
//! [`ContentTree::scan`] walks the markdown source directory and records the
//! URL path of every document. [`check_links`] then verifies that each
//! internal link in a [`SiteConfig`] points at a document or static asset.
//!
//! # URL Path Convention
//!
//! Documents are addressed the way the site generator routes them:
//! - `index.md` - `/`
//! - `go-standard-library/index.md` - `/go-standard-library/`
//! - `go-standard-library/os.md` - `/go-standard-library/os`
//!
//! A trailing slash only matches a directory's `index.md`; a path without
//! one only matches a page file. Links may also carry a `.md` or `.html`
//! suffix, a `#fragment`, or a `?query`; the suffix picks the file directly
//! and the rest is ignored.

mod scanner;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use sitenav_site::{LinkSource, SiteConfig, is_external};

use crate::scanner::{ScanResult, Scanner};

/// Documents and assets found under a content directory.
#[derive(Debug, Default)]
pub struct ContentTree {
    pages: BTreeSet<String>,
    indexes: BTreeSet<String>,
    assets: BTreeSet<String>,
}

impl ContentTree {
    /// Scan `source_dir`. A missing directory yields an empty tree.
    pub fn scan(source_dir: &Path) -> Self {
        let result = Scanner::new(source_dir.to_path_buf()).scan();
        tracing::debug!(
            source_dir = %source_dir.display(),
            pages = result.pages.len(),
            indexes = result.indexes.len(),
            assets = result.assets.len(),
            "Content scan completed"
        );
        Self::from(result)
    }

    /// Build a tree from markdown file paths relative to the content root
    /// (e.g., `index.md`, `go-standard-library/os.md`).
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ScanResult::default();
        for file in files {
            result.add_markdown(file.as_ref());
        }
        Self::from(result)
    }

    /// Number of markdown documents.
    pub fn len(&self) -> usize {
        self.pages.len() + self.indexes.len()
    }

    /// True if no markdown documents were found.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.indexes.is_empty()
    }

    /// Check whether an internal link resolves to a document or asset.
    ///
    /// `base` is the site's URL base (e.g., `/docs/`); links written with it
    /// are resolved relative to the content root.
    pub fn resolve(&self, link: &str, base: Option<&str>) -> bool {
        let path = strip_base(strip_suffixes(link), base);
        let path = path.trim_start_matches('/');

        if self.assets.contains(path) {
            return true;
        }

        if path.is_empty() || path.ends_with('/') {
            return self.indexes.contains(path.trim_end_matches('/'));
        }

        let path = path
            .strip_suffix(".md")
            .or_else(|| path.strip_suffix(".html"))
            .unwrap_or(path);
        if path == "index" {
            self.indexes.contains("")
        } else if let Some(dir) = path.strip_suffix("/index") {
            self.indexes.contains(dir)
        } else {
            self.pages.contains(path)
        }
    }
}

impl From<ScanResult> for ContentTree {
    fn from(result: ScanResult) -> Self {
        Self {
            pages: result.pages,
            indexes: result.indexes,
            assets: result.assets,
        }
    }
}

/// Drop `#fragment` and `?query` parts.
fn strip_suffixes(link: &str) -> &str {
    link.split(['#', '?']).next().unwrap_or(link)
}

fn strip_base<'a>(link: &'a str, base: Option<&str>) -> &'a str {
    match base {
        Some(base) if base != "/" => link
            .strip_prefix(base.trim_end_matches('/'))
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(link),
        _ => link,
    }
}

/// An internal link with no matching document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenLink {
    /// Path into the configuration (e.g., `nav[1]`).
    pub location: String,
    /// Link as written.
    pub link: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} does not resolve to a document", self.location, self.link)
    }
}

/// Report every nav and sidebar link that does not resolve in `tree`.
///
/// External links, same-page anchors, and social links are not checked.
pub fn check_links(config: &SiteConfig, tree: &ContentTree) -> Vec<BrokenLink> {
    let base = config.base.as_deref();
    let mut checked = 0usize;

    let broken: Vec<_> = config
        .links()
        .into_iter()
        .filter(|l| l.source != LinkSource::Social)
        .filter(|l| !is_external(l.link) && !l.link.starts_with('#'))
        .inspect(|_| checked += 1)
        .filter(|l| !tree.resolve(l.link, base))
        .map(|l| BrokenLink {
            location: l.location,
            link: l.link.to_owned(),
        })
        .collect();

    tracing::debug!(checked, broken = broken.len(), "Link check completed");
    broken
}
