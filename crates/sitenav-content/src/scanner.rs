//! Document discovery by filesystem walking.
//!
//! Markdown files become routes: `index.md` is the directory route (served
//! with a trailing slash), any other `.md` file is a page route. Every other
//! file is recorded as a static asset so links to downloads and images can be
//! checked too.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory whose contents are served from the site root.
const PUBLIC_DIR: &str = "public";

/// Routes found in a content tree. All paths are relative, without leading slash.
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    /// Page routes from `name.md` files (e.g., `go-standard-library/os`).
    pub pages: BTreeSet<String>,
    /// Directories holding an `index.md` (`""` for the root).
    pub indexes: BTreeSet<String>,
    /// Non-markdown files, with `public/` mapped to the site root.
    pub assets: BTreeSet<String>,
}

impl ScanResult {
    /// Record a markdown file by its path relative to the source root.
    pub fn add_markdown(&mut self, rel_path: &str) {
        match markdown_route(rel_path) {
            Route::Index(dir) => self.indexes.insert(dir),
            Route::Page(page) => self.pages.insert(page),
        };
    }
}

/// Where a markdown file is served.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Route {
    /// `dir/index.md` -> `/dir/`
    Index(String),
    /// `dir/name.md` -> `/dir/name`
    Page(String),
}

/// Map a relative markdown path to its route.
///
/// - `index.md` -> `Index("")`
/// - `go-standard-library/index.md` -> `Index("go-standard-library")`
/// - `go-standard-library/os.md` -> `Page("go-standard-library/os")`
pub(crate) fn markdown_route(rel_path: &str) -> Route {
    let without_ext = rel_path.strip_suffix(".md").unwrap_or(rel_path);
    if without_ext == "index" {
        Route::Index(String::new())
    } else if let Some(dir) = without_ext.strip_suffix("/index") {
        Route::Index(dir.to_owned())
    } else {
        Route::Page(without_ext.to_owned())
    }
}

/// Walks a markdown source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a scanner rooted at `source_dir`.
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the filesystem.
    ///
    /// Returns an empty result if the source directory doesn't exist.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        if self.source_dir.exists() {
            scan_directory(&self.source_dir, "", false, &mut result);
        }
        result
    }
}

/// Walk `dir_path`, whose contents live under `rel_prefix`.
///
/// Inside `public/` everything is an asset, markdown included.
fn scan_directory(dir_path: &Path, rel_prefix: &str, in_public: bool, result: &mut ScanResult) {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory, skipping");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs (including .vitepress)
        if name.starts_with('.') {
            continue;
        }

        let rel_path = if rel_prefix.is_empty() {
            name.clone()
        } else {
            format!("{rel_prefix}/{name}")
        };

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            if rel_prefix.is_empty() && !in_public && name == PUBLIC_DIR {
                scan_directory(&entry.path(), "", true, result);
            } else {
                scan_directory(&entry.path(), &rel_path, in_public, result);
            }
        } else if !in_public && Path::new(&name).extension().is_some_and(|e| e == "md") {
            result.add_markdown(&rel_path);
        } else {
            result.assets.insert(rel_path);
        }
    }
}
