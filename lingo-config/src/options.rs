//! Module options
//!
//! `I18nOptions` mirrors the option object of the i18n module, keys in
//! camelCase. Every field has the module's default so partial documents
//! deserialize.

use crate::locale::{Direction, LocaleEntry, LocaleObject, locale_codes, normalize_locales};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// How locale codes are put onto route paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Routes are never prefixed; the locale lives in the cookie only
    NoPrefix,
    /// Every locale except the default one is prefixed
    #[default]
    PrefixExceptDefault,
    /// Every locale is prefixed
    Prefix,
    /// Every locale is prefixed and the default locale also gets an unprefixed copy
    PrefixAndDefault,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NoPrefix => "no_prefix",
            Strategy::PrefixExceptDefault => "prefix_except_default",
            Strategy::Prefix => "prefix",
            Strategy::PrefixAndDefault => "prefix_and_default",
        }
    }
}

/// Which paths browser-language detection may redirect from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedirectOn {
    /// Only the root path `/`
    #[default]
    #[serde(rename = "root")]
    Root,
    /// Only paths without a locale prefix
    #[serde(rename = "no prefix")]
    NoPrefix,
    /// Any path
    #[serde(rename = "all")]
    All,
}

/// Where per-page custom paths come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomRoutes {
    /// Options attached to each page (`defineI18nRoute`)
    #[default]
    Page,
    /// The `pages` option
    Config,
}

/// Browser-language detection and locale cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectBrowserLanguageOptions {
    pub always_redirect: bool,
    pub cookie_cross_origin: bool,
    pub cookie_domain: Option<String>,
    pub cookie_key: String,
    pub cookie_secure: bool,
    /// Used when neither cookie nor browser language match; empty means none
    pub fallback_locale: String,
    pub redirect_on: RedirectOn,
    pub use_cookie: bool,
}

impl Default for DetectBrowserLanguageOptions {
    fn default() -> Self {
        Self {
            always_redirect: false,
            cookie_cross_origin: false,
            cookie_domain: None,
            cookie_key: "i18n_redirected".to_string(),
            cookie_secure: false,
            fallback_locale: String::new(),
            redirect_on: RedirectOn::Root,
            use_cookie: true,
        }
    }
}

/// A per-locale entry of the `pages` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalePathOption {
    /// `false` removes the locale from this page
    Enabled(bool),
    /// Custom path in file-route syntax, e.g. `/a-propos` or `/blog/[slug]`
    Path(String),
}

/// An entry of the `pages` option, keyed by page path (`about`, `blog/[id]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageOption {
    /// `false` disables localization of the page
    Enabled(bool),
    Paths(BTreeMap<String, LocalePathOption>),
}

/// The subset of the message library's options the module reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VueI18nOptions {
    pub locale: Option<String>,
    pub fallback_locale: Option<String>,
    pub legacy: bool,
}

/// Options of the i18n module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nOptions {
    pub vue_i18n: VueI18nOptions,
    pub locales: Vec<LocaleEntry>,
    pub default_locale: String,
    pub default_direction: Direction,
    pub routes_name_separator: String,
    pub trailing_slash: bool,
    pub default_locale_route_name_suffix: String,
    pub strategy: Strategy,
    pub lazy: bool,
    pub lang_dir: Option<String>,
    /// `false` disables detection entirely
    #[serde(deserialize_with = "deserialize_detect")]
    pub detect_browser_language: Option<DetectBrowserLanguageOptions>,
    pub different_domains: bool,
    pub custom_routes: CustomRoutes,
    pub pages: BTreeMap<String, PageOption>,
    pub skip_setting_locale_on_navigate: bool,
    pub debug: bool,
}

impl Default for I18nOptions {
    fn default() -> Self {
        Self {
            vue_i18n: VueI18nOptions::default(),
            locales: Vec::new(),
            default_locale: String::new(),
            default_direction: Direction::Ltr,
            routes_name_separator: "___".to_string(),
            trailing_slash: false,
            default_locale_route_name_suffix: "default".to_string(),
            strategy: Strategy::PrefixExceptDefault,
            lazy: false,
            lang_dir: None,
            detect_browser_language: Some(DetectBrowserLanguageOptions::default()),
            different_domains: false,
            custom_routes: CustomRoutes::Page,
            pages: BTreeMap::new(),
            skip_setting_locale_on_navigate: false,
            debug: false,
        }
    }
}

fn deserialize_detect<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DetectBrowserLanguageOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Options(DetectBrowserLanguageOptions),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Flag(false)) => None,
        Some(Raw::Flag(true)) => Some(DetectBrowserLanguageOptions::default()),
        Some(Raw::Options(options)) => Some(options),
    })
}

impl I18nOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LocaleEntry>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn with_lang_dir(mut self, dir: impl Into<String>) -> Self {
        self.lang_dir = Some(dir.into());
        self
    }

    pub fn with_detect_browser_language(
        mut self,
        detect: Option<DetectBrowserLanguageOptions>,
    ) -> Self {
        self.detect_browser_language = detect;
        self
    }

    pub fn with_custom_routes(mut self, custom_routes: CustomRoutes) -> Self {
        self.custom_routes = custom_routes;
        self
    }

    pub fn with_page(mut self, page: impl Into<String>, option: PageOption) -> Self {
        self.pages.insert(page.into(), option);
        self
    }

    pub fn normalized_locales(&self) -> Vec<LocaleObject> {
        normalize_locales(&self.locales)
    }

    pub fn locale_codes(&self) -> Vec<String> {
        locale_codes(&self.locales)
    }

    /// Locale the message library starts in when nothing else is known.
    pub fn initial_locale(&self) -> Option<&str> {
        self.vue_i18n
            .locale
            .as_deref()
            .or(Some(self.default_locale.as_str()))
            .filter(|l| !l.is_empty())
    }
}
