//! Locale detection for lingo
//!
//! Works out which locale a visitor wants from the locale cookie, the
//! browser's preferred languages and the request host, and decides whether a
//! navigation should be redirected.
//!
//! ```
//! use lingo_config::{I18nOptions, Strategy};
//! use lingo_detect::{DetectMode, LanguageDetector, LocaleFrom, RequestContext};
//!
//! let options = I18nOptions::new()
//!     .with_locales(["en", "fr"])
//!     .with_default_locale("en")
//!     .with_strategy(Strategy::NoPrefix);
//! let detector = LanguageDetector::new(&options);
//!
//! let ctx = RequestContext::server("/").with_header("accept-language", "fr-FR,fr;q=0.9");
//! let result = detector.detect_browser_language(&ctx, "en", DetectMode::Normal);
//!
//! assert!(result.stat);
//! assert_eq!(result.locale, "fr");
//! assert_eq!(result.from, Some(LocaleFrom::NavigatorOrHeader));
//! ```

pub mod accept_language;
pub mod browser;
pub mod context;
pub mod cookie;
pub mod detector;
pub mod domain;

pub use accept_language::parse_accept_language;
pub use browser::{
    MatchedLocale, find_browser_locale, get_browser_locale, match_browser_locales,
    use_browser_locale,
};
pub use context::{Location, RequestContext, Side};
pub use cookie::{
    COOKIE_LIFETIME_DAYS, LocaleCookie, SameSite, get_locale_cookie, parse_cookies,
    set_locale_cookie, use_cookie_locale,
};
pub use detector::{DetectMode, DetectReason, DetectionResult, LanguageDetector, LocaleFrom};
pub use domain::{get_domain_from_locale, get_host, get_locale_domain};
