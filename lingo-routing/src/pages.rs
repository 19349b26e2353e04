// Page route tree and page analysis

use lingo_log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

/// Localization settings attached to a page component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageI18n {
    /// `false` leaves the page unlocalized
    Enabled(bool),
    Custom {
        /// Locales the page exists in; all configured locales when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locales: Option<Vec<String>>,
        /// Custom path per locale, in file-route syntax
        #[serde(default)]
        paths: BTreeMap<String, String>,
    },
}

/// A route of the page table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    /// Absolute path of the page component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Locale of a localized route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n: Option<PageI18n>,
}

impl PageRoute {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_children(mut self, children: Vec<PageRoute>) -> Self {
        self.children = children;
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn with_i18n(mut self, i18n: PageI18n) -> Self {
        self.i18n = Some(i18n);
        self
    }
}

/// What page analysis learned about one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedPage {
    /// Top-level page (not a child route)
    pub in_root: bool,
    /// Key of the page in the `pages` option, e.g. `blog/[id]`
    pub path: String,
}

/// Analysis results keyed by page file.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedPages {
    pages: HashMap<String, AnalyzedPage>,
}

impl AnalyzedPages {
    pub fn get(&self, route: &PageRoute) -> Option<&AnalyzedPage> {
        route.file.as_ref().and_then(|f| self.pages.get(f))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Compute the `pages` option key of every page under `<src_dir>/<pages_dir>`.
///
/// Pages whose file lies outside the pages directory are skipped together
/// with their children.
pub fn analyze_pages(src_dir: &Path, pages_dir: &str, pages: &[PageRoute]) -> AnalyzedPages {
    let pages_path = src_dir.join(pages_dir);
    let mut analyzed = AnalyzedPages::default();
    analyze_into(&pages_path, pages, true, &mut analyzed);
    debug!("analyzed {} pages under {}", analyzed.len(), pages_path.display());
    analyzed
}

fn analyze_into(pages_path: &Path, pages: &[PageRoute], in_root: bool, out: &mut AnalyzedPages) {
    for page in pages {
        let Some(file) = &page.file else {
            continue;
        };
        let Some(key) = page_key(pages_path, Path::new(file)) else {
            continue;
        };

        out.pages.insert(file.clone(), AnalyzedPage { in_root, path: key });

        if !page.children.is_empty() {
            analyze_into(pages_path, &page.children, false, out);
        }
    }
}

/// `<pages>/blog/[id].vue` becomes `blog/[id]`.
fn page_key(pages_path: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(pages_path).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let dir: PathBuf = relative.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut parts: Vec<&str> = dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    parts.push(stem);
    Some(parts.join("/"))
}
