// Browser locale matching

use crate::accept_language::parse_accept_language;
use crate::context::{RequestContext, Side};
use lingo_config::LocaleObject;
use lingo_log::debug;
use std::cmp::Ordering;

/// A configured locale matched against the browser's languages.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLocale {
    pub code: String,
    /// Higher is better; earlier browser languages score higher
    pub score: f64,
}

fn language_part(tag: &str) -> String {
    tag.split('-').next().unwrap_or(tag).to_lowercase()
}

/// Collect at most one exact ISO match and one language-only match.
///
/// An exact match for the browser language at index `i` of `n` scores
/// `1 - i/n`; a match on the language part alone scores `0.999 - i/n`.
pub fn match_browser_locales(locales: &[LocaleObject], browser_locales: &[String]) -> Vec<MatchedLocale> {
    let n = browser_locales.len() as f64;
    let mut matched = Vec::new();

    for (index, browser_code) in browser_locales.iter().enumerate() {
        let wanted = browser_code.to_lowercase();
        if let Some(locale) = locales
            .iter()
            .find(|l| l.iso_or_code().to_lowercase() == wanted)
        {
            matched.push(MatchedLocale {
                code: locale.code.clone(),
                score: 1.0 - index as f64 / n,
            });
            break;
        }
    }

    for (index, browser_code) in browser_locales.iter().enumerate() {
        let wanted = language_part(browser_code);
        if let Some(locale) = locales
            .iter()
            .find(|l| language_part(l.iso_or_code()) == wanted)
        {
            matched.push(MatchedLocale {
                code: locale.code.clone(),
                score: 0.999 - index as f64 / n,
            });
            break;
        }
    }

    matched
}

fn compare(a: &MatchedLocale, b: &MatchedLocale) -> Ordering {
    if a.score == b.score {
        b.code.len().cmp(&a.code.len())
    } else {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    }
}

/// Best configured locale for the browser's languages.
///
/// Ties on score prefer the longer (more specific) code.
pub fn find_browser_locale(locales: &[LocaleObject], browser_locales: &[String]) -> Option<String> {
    let mut matched = match_browser_locales(locales, browser_locales);
    matched.sort_by(compare);
    matched.into_iter().next().map(|m| m.code)
}

/// Browser locale from the navigator languages on the client or the
/// `Accept-Language` header on the server.
pub fn get_browser_locale(locales: &[LocaleObject], ctx: &RequestContext) -> Option<String> {
    let languages = match ctx.side {
        Side::Client => {
            let languages = ctx.navigator_languages()?.to_vec();
            debug!("navigator languages: {:?}", languages);
            languages
        }
        Side::Server => {
            let accept = ctx.header("accept-language").filter(|a| !a.is_empty())?;
            debug!("accept-language: {}", accept);
            parse_accept_language(accept)
        }
    };

    find_browser_locale(locales, &languages)
}

/// Browser locale for use in application code. A missing header or
/// navigator list yields `None`.
pub fn use_browser_locale(locales: &[LocaleObject], ctx: &RequestContext) -> Option<String> {
    get_browser_locale(locales, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Vec<LocaleObject> {
        vec![
            LocaleObject::new("en").with_iso("en-US"),
            LocaleObject::new("fr").with_iso("fr-FR"),
            LocaleObject::new("ja"),
        ]
    }

    fn langs(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_iso_match() {
        assert_eq!(
            find_browser_locale(&locales(), &langs(&["fr-FR", "en-US"])),
            Some("fr".to_string())
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(
            find_browser_locale(&locales(), &langs(&["EN-us"])),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_language_only_match() {
        assert_eq!(
            find_browser_locale(&locales(), &langs(&["fr-CA", "de"])),
            Some("fr".to_string())
        );
    }

    #[test]
    fn test_earlier_language_wins_over_exact_match() {
        // "fr" partial at index 0 beats exact "en-US" at index 1
        let matched = match_browser_locales(&locales(), &langs(&["fr-CA", "en-US"]));
        assert_eq!(matched.len(), 2);
        assert_eq!(
            find_browser_locale(&locales(), &langs(&["fr-CA", "en-US"])),
            Some("fr".to_string())
        );
    }

    #[test]
    fn test_tie_prefers_longer_code() {
        let locales = vec![LocaleObject::new("en"), LocaleObject::new("en-GB").with_iso("en")];
        let matched = vec![
            MatchedLocale { code: "en".to_string(), score: 1.0 },
            MatchedLocale { code: "en-GB".to_string(), score: 1.0 },
        ];
        let mut sorted = matched.clone();
        sorted.sort_by(compare);
        assert_eq!(sorted[0].code, "en-GB");
        assert_eq!(find_browser_locale(&locales, &langs(&["en"])), Some("en".to_string()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_browser_locale(&locales(), &langs(&["de", "it"])), None);
        assert_eq!(find_browser_locale(&locales(), &[]), None);
    }

    #[test]
    fn test_get_browser_locale_server() {
        let ctx = RequestContext::server("/").with_header("accept-language", "ja,en;q=0.5");
        assert_eq!(get_browser_locale(&locales(), &ctx), Some("ja".to_string()));

        let ctx = RequestContext::server("/");
        assert_eq!(get_browser_locale(&locales(), &ctx), None);
    }

    #[test]
    fn test_get_browser_locale_client() {
        let ctx = RequestContext::client("/").with_navigator_languages(["en-US", "fr"]);
        assert_eq!(use_browser_locale(&locales(), &ctx), Some("en".to_string()));

        let ctx = RequestContext::client("/").with_header("accept-language", "fr");
        assert_eq!(get_browser_locale(&locales(), &ctx), None);
    }
}
