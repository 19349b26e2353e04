// Locale cookie

use crate::context::{RequestContext, Side};
use chrono::{DateTime, Duration, Utc};
use lingo_config::DetectBrowserLanguageOptions;
use lingo_log::debug;
use std::collections::HashMap;

/// Days until the locale cookie expires
pub const COOKIE_LIFETIME_DAYS: i64 = 365;

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Parse a `Cookie` header (or `document.cookie`) into name/value pairs.
///
/// The first occurrence of a name wins. Values are percent-decoded and
/// surrounding quotes are removed.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || cookies.contains_key(name) {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        let decoded = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());

        cookies.insert(name.to_string(), decoded);
    }

    cookies
}

/// Locale stored in the cookie, if cookies are enabled and the stored code
/// is one of `locale_codes`.
pub fn get_locale_cookie<S: AsRef<str>>(
    ctx: &RequestContext,
    options: &DetectBrowserLanguageOptions,
    locale_codes: &[S],
) -> Option<String> {
    if !options.use_cookie {
        return None;
    }

    let source = ctx.cookie_source()?;
    let code = parse_cookies(source).remove(&options.cookie_key)?;
    debug!("locale cookie {}: {}", options.cookie_key, code);

    locale_codes
        .iter()
        .any(|c| c.as_ref() == code)
        .then_some(code)
}

/// Cookie locale for use in application code; empty when unset or unknown.
pub fn use_cookie_locale<S: AsRef<str>>(
    ctx: &RequestContext,
    options: &DetectBrowserLanguageOptions,
    locale_codes: &[S],
) -> String {
    get_locale_cookie(ctx, options, locale_codes).unwrap_or_default()
}

/// A serializable locale cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: String,
    pub expires: DateTime<Utc>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl LocaleCookie {
    /// Cookie for `locale` as configured, expiring a year after `now`.
    pub fn new(locale: &str, options: &DetectBrowserLanguageOptions, now: DateTime<Utc>) -> Self {
        Self {
            name: options.cookie_key.clone(),
            value: locale.to_string(),
            domain: options.cookie_domain.clone().filter(|d| !d.is_empty()),
            path: "/".to_string(),
            expires: now + Duration::days(COOKIE_LIFETIME_DAYS),
            secure: options.cookie_cross_origin || options.cookie_secure,
            same_site: if options.cookie_cross_origin {
                SameSite::None
            } else {
                SameSite::Lax
            },
        }
    }

    /// `Set-Cookie` header value.
    pub fn serialize(&self) -> String {
        let mut cookie = format!("{}={}", self.name, urlencoding::encode(&self.value));

        if let Some(ref domain) = self.domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }

        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!(
            "; Expires={}",
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ));

        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie
    }
}

/// Persist `locale` in the cookie.
///
/// On the server a `Set-Cookie` header is added to the response; on the
/// client the browser cookie string is updated. Returns the cookie written.
pub fn set_locale_cookie(
    locale: &str,
    ctx: &mut RequestContext,
    options: &DetectBrowserLanguageOptions,
) -> Option<LocaleCookie> {
    if !options.use_cookie {
        return None;
    }

    let cookie = LocaleCookie::new(locale, options, Utc::now());
    match ctx.side {
        Side::Server => ctx.push_set_cookie(cookie.serialize()),
        Side::Client => {
            ctx.store_document_cookie(&cookie.name, &urlencoding::encode(&cookie.value))
        }
    }
    debug!("set locale cookie {}={}", cookie.name, cookie.value);

    Some(cookie)
}
