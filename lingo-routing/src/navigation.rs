// Locale-aware path helpers

use crate::Result;
use crate::localize::{LocalizeOptions, adjust_trailing_slash};
use lingo_config::Strategy;
use regex::{Regex, RegexBuilder};

/// Regex matching a path that starts with one of `codes` as its first
/// segment, e.g. `^/(en|fr)(?:/|$)`. Matching ignores case.
pub fn locales_regex<S: AsRef<str>>(codes: &[S]) -> Result<Regex> {
    let alternatives: Vec<String> = codes.iter().map(|c| regex::escape(c.as_ref())).collect();
    let pattern = format!("^/({})(?:/|$)", alternatives.join("|"));
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// Locale code carried by the first segment of `path`, if any.
pub fn path_locale(path: &str, regex: &Regex) -> Option<String> {
    regex
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Strip the `<separator><locale>` suffix from a localized route name.
pub fn route_base_name<'a>(name: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return name;
    }
    name.split(separator).next().unwrap_or(name)
}

fn split_path(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

/// Path of `path` in `locale`.
///
/// The locale prefix follows the strategy; query and hash are kept.
pub fn locale_path(path: &str, locale: &str, options: &LocalizeOptions) -> String {
    let (pathname, suffix) = split_path(path);
    let pathname = if pathname.starts_with('/') {
        pathname.to_string()
    } else {
        format!("/{}", pathname)
    };

    let by_strategy = match options.strategy {
        Strategy::NoPrefix => false,
        Strategy::Prefix => true,
        Strategy::PrefixExceptDefault | Strategy::PrefixAndDefault => {
            locale != options.default_locale
        }
    };
    let prefixed = by_strategy && !options.different_domains;

    let localized = if prefixed {
        format!("/{}{}", locale, pathname)
    } else {
        pathname
    };

    format!(
        "{}{}",
        adjust_trailing_slash(&localized, options.trailing_slash, false),
        suffix
    )
}

/// Translate the current path into `locale`, replacing any locale prefix.
pub fn switch_locale_path(current_path: &str, locale: &str, options: &LocalizeOptions) -> Result<String> {
    let (pathname, suffix) = split_path(current_path);
    let regex = locales_regex(&options.locales)?;

    let unprefixed = match regex.find(pathname) {
        Some(m) => {
            let rest = &pathname[m.end()..];
            format!("/{}", rest.trim_start_matches('/'))
        }
        None => pathname.to_string(),
    };

    Ok(locale_path(&format!("{}{}", unprefixed, suffix), locale, options))
}
