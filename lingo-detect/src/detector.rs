//! Browser language detection
//!
//! Decides on every navigation whether the visitor should be redirected to
//! another locale, and to which one. The decision only reads the request
//! context; writing the cookie and performing the redirect are left to the
//! caller.

use crate::browser::get_browser_locale;
use crate::context::RequestContext;
use crate::cookie::get_locale_cookie;
use lingo_config::{DetectBrowserLanguageOptions, I18nOptions, LocaleObject, RedirectOn, Strategy};
use lingo_log::{debug, warn};
use lingo_routing::locales_regex;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Why no redirect happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectReason {
    NotRedirectOnRoot,
    NotRedirectOnNoPrefix,
    NotFoundMatch,
    DetectIgnoreOnSsg,
}

impl DetectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectReason::NotRedirectOnRoot => "not_redirect_on_root",
            DetectReason::NotRedirectOnNoPrefix => "not_redirect_on_no_prefix",
            DetectReason::NotFoundMatch => "not_found_match",
            DetectReason::DetectIgnoreOnSsg => "detect_ignore_on_ssg",
        }
    }
}

impl fmt::Display for DetectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signal produced the detected locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleFrom {
    Cookie,
    NavigatorOrHeader,
    Fallback,
    #[default]
    Unknown,
}

impl LocaleFrom {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleFrom::Cookie => "cookie",
            LocaleFrom::NavigatorOrHeader => "navigator_or_header",
            LocaleFrom::Fallback => "fallback",
            LocaleFrom::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LocaleFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// Detected locale; empty when there is nothing to do
    pub locale: String,
    /// Whether the caller should act on `locale`
    pub stat: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DetectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<LocaleFrom>,
}

impl DetectionResult {
    pub fn redirect(locale: impl Into<String>, from: LocaleFrom) -> Self {
        Self {
            locale: locale.into(),
            stat: true,
            reason: None,
            from: Some(from),
        }
    }

    pub fn skip(reason: DetectReason) -> Self {
        Self {
            locale: String::new(),
            stat: false,
            reason: Some(reason),
            from: None,
        }
    }
}

/// Phase of static generation the detection runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectMode {
    #[default]
    Normal,
    /// Detection must not act on a statically generated page
    SsgIgnore,
    /// First client pass over a statically generated page
    SsgSetup,
}

/// Browser language detector for one application.
pub struct LanguageDetector {
    detect: Option<DetectBrowserLanguageOptions>,
    strategy: Strategy,
    locales: Vec<LocaleObject>,
    locale_codes: Vec<String>,
    vue_i18n_locale: Option<String>,
    locales_regex: Option<Regex>,
    ssg: bool,
}

impl LanguageDetector {
    pub fn new(options: &I18nOptions) -> Self {
        Self::with_locales(options, options.normalized_locales())
    }

    /// Detector over already normalized (and possibly resolved) locales.
    pub fn with_locales(options: &I18nOptions, locales: Vec<LocaleObject>) -> Self {
        let locale_codes: Vec<String> = locales.iter().map(|l| l.code.clone()).collect();

        let locales_regex = if locale_codes.is_empty() {
            None
        } else {
            match locales_regex(&locale_codes) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!("locale prefix pattern unavailable: {}", e);
                    None
                }
            }
        };

        Self {
            detect: options.detect_browser_language.clone(),
            strategy: options.strategy,
            locales,
            locale_codes,
            vue_i18n_locale: options.vue_i18n.locale.clone(),
            locales_regex,
            ssg: false,
        }
    }

    /// Mark the application as statically generated.
    pub fn with_ssg(mut self, ssg: bool) -> Self {
        self.ssg = ssg;
        self
    }

    pub fn locale_codes(&self) -> &[String] {
        &self.locale_codes
    }

    pub fn options(&self) -> Option<&DetectBrowserLanguageOptions> {
        self.detect.as_ref()
    }

    fn has_locale_prefix(&self, path: &str) -> bool {
        self.locales_regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(path))
    }

    /// Decide whether to redirect the navigation in `ctx` and where to.
    ///
    /// `current_locale` is the active locale; when empty the configured
    /// initial locale of the message library is used instead.
    pub fn detect_browser_language(
        &self,
        ctx: &RequestContext,
        current_locale: &str,
        mode: DetectMode,
    ) -> DetectionResult {
        let Some(detect) = &self.detect else {
            return DetectionResult::skip(DetectReason::NotFoundMatch);
        };

        if self.ssg
            && self.strategy == Strategy::NoPrefix
            && (ctx.is_server() || mode == DetectMode::SsgIgnore)
        {
            return DetectionResult::skip(DetectReason::DetectIgnoreOnSsg);
        }

        let path = ctx.path.as_str();
        debug!(
            "detect browser language: path={} strategy={} always_redirect={} redirect_on={:?} locale={}",
            path,
            self.strategy.as_str(),
            detect.always_redirect,
            detect.redirect_on,
            current_locale
        );

        if self.strategy != Strategy::NoPrefix {
            match detect.redirect_on {
                RedirectOn::Root if path != "/" => {
                    debug!("detect browser language: not root");
                    return DetectionResult::skip(DetectReason::NotRedirectOnRoot);
                }
                RedirectOn::NoPrefix if !detect.always_redirect && self.has_locale_prefix(path) => {
                    debug!("detect browser language: path already has a locale prefix");
                    return DetectionResult::skip(DetectReason::NotRedirectOnNoPrefix);
                }
                _ => {}
            }
        }

        let mut from = LocaleFrom::Unknown;
        let cookie_locale = if detect.use_cookie {
            get_locale_cookie(ctx, detect, &self.locale_codes)
        } else {
            None
        };

        let mut matched = cookie_locale.clone();
        if matched.is_some() {
            from = LocaleFrom::Cookie;
        } else if let Some(browser) = get_browser_locale(&self.locales, ctx) {
            from = LocaleFrom::NavigatorOrHeader;
            matched = Some(browser);
        }

        let final_locale = match matched {
            Some(locale) => locale,
            None if !detect.fallback_locale.is_empty() => {
                from = LocaleFrom::Fallback;
                detect.fallback_locale.clone()
            }
            None => String::new(),
        };
        debug!(
            "detect browser language: final={} cookie={:?} from={}",
            final_locale, cookie_locale, from
        );

        let active_locale = if current_locale.is_empty() {
            self.vue_i18n_locale.as_deref().unwrap_or("")
        } else {
            current_locale
        };

        if !final_locale.is_empty()
            && (!detect.use_cookie || detect.always_redirect || cookie_locale.is_none())
        {
            if self.strategy == Strategy::NoPrefix {
                return DetectionResult::redirect(final_locale, from);
            }
            if final_locale != active_locale {
                debug!("detect browser language: {} differs from {}", final_locale, active_locale);
                return DetectionResult::redirect(final_locale, from);
            }
            if detect.always_redirect && path == "/" {
                return DetectionResult::redirect(final_locale, from);
            }
        }

        if mode == DetectMode::SsgSetup && !final_locale.is_empty() {
            return DetectionResult::redirect(final_locale, from);
        }

        DetectionResult::skip(DetectReason::NotFoundMatch)
    }
}
