//! Locale descriptors
//!
//! Locales are configured either as bare codes (`"en"`) or as objects carrying
//! the ISO tag, a domain and the message file(s). Everything downstream works
//! on the normalized object form.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    Auto,
}

/// A configured locale in object form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleObject {
    /// Unique identifier, e.g. `en` or `en-US`
    pub code: String,
    /// Matching tag for browser languages; falls back to `code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
    /// Host bound to this locale when `differentDomains` is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Message file relative to `langDir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Several message files relative to `langDir`, merged in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Resolved absolute path of `file`
    #[serde(skip)]
    pub path: Option<PathBuf>,
    /// Resolved absolute paths of `files`
    #[serde(skip)]
    pub paths: Vec<PathBuf>,
}

impl LocaleObject {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_iso(mut self, iso: impl Into<String>) -> Self {
        self.iso = Some(iso.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// ISO tag used for browser-language matching.
    pub fn iso_or_code(&self) -> &str {
        self.iso.as_deref().unwrap_or(&self.code)
    }

    /// Whether a message file reference is configured.
    pub fn has_file(&self) -> bool {
        self.file.is_some() || self.files.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// Resolved message file paths in load order.
    pub fn message_paths(&self) -> Vec<PathBuf> {
        match &self.path {
            Some(path) => vec![path.clone()],
            None => self.paths.clone(),
        }
    }
}

/// A locale as written in the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleEntry {
    Code(String),
    Object(LocaleObject),
}

impl LocaleEntry {
    pub fn code(&self) -> &str {
        match self {
            LocaleEntry::Code(code) => code,
            LocaleEntry::Object(obj) => &obj.code,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, LocaleEntry::Code(_))
    }
}

impl From<&str> for LocaleEntry {
    fn from(code: &str) -> Self {
        LocaleEntry::Code(code.to_string())
    }
}

impl From<LocaleObject> for LocaleEntry {
    fn from(obj: LocaleObject) -> Self {
        LocaleEntry::Object(obj)
    }
}

/// Turn every entry into object form. Bare codes get `iso == code`.
pub fn normalize_locales(locales: &[LocaleEntry]) -> Vec<LocaleObject> {
    locales
        .iter()
        .map(|entry| match entry {
            LocaleEntry::Code(code) => LocaleObject::new(code.clone()).with_iso(code.clone()),
            LocaleEntry::Object(obj) => obj.clone(),
        })
        .collect()
}

/// Codes of the configured locales, in configuration order.
pub fn locale_codes(locales: &[LocaleEntry]) -> Vec<String> {
    locales.iter().map(|l| l.code().to_string()).collect()
}
