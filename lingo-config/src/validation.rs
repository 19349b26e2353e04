// Option validation

use crate::locale::LocaleEntry;
use crate::options::{I18nOptions, Strategy};
use crate::resolve::is_locale_file;
use crate::{ConfigError, Result};
use lingo_log::{format_message, warn};
use std::collections::HashSet;

/// Trait for validating options
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for I18nOptions {
    fn validate(&self) -> Result<()> {
        check_options(self)
    }
}

/// Reject option combinations the module cannot work with.
pub fn check_options(options: &I18nOptions) -> Result<()> {
    if options.lazy && options.lang_dir.is_none() {
        return Err(ConfigError::LazyWithoutLangDir);
    }

    if options.lang_dir.is_some() {
        match options.locales.first() {
            None | Some(LocaleEntry::Code(_)) => {
                return Err(ConfigError::LangDirRequiresLocaleObjects);
            }
            Some(LocaleEntry::Object(_)) => {}
        }

        for locale in &options.locales {
            match locale {
                LocaleEntry::Object(obj) if obj.has_file() => {
                    let mut names = obj.file.iter().chain(obj.files.iter().flatten());
                    if let Some(file) = names.find(|f| !is_locale_file(f)) {
                        return Err(ConfigError::UnsupportedLocaleFile {
                            code: obj.code.clone(),
                            file: file.clone(),
                        });
                    }
                }
                other => {
                    let shown = serde_json::to_string_pretty(other)
                        .unwrap_or_else(|_| format!("\"{}\"", other.code()));
                    return Err(ConfigError::LocaleWithoutFile(shown));
                }
            }
        }
    }

    let mut seen = HashSet::new();
    for code in options.locale_codes() {
        if !seen.insert(code.clone()) {
            return Err(ConfigError::DuplicateLocaleCode(code));
        }
    }

    Ok(())
}

/// Non-fatal problems with the options. Each one is also logged.
pub fn compatibility_warnings(options: &I18nOptions) -> Vec<String> {
    let mut warnings = Vec::new();

    if options.strategy == Strategy::NoPrefix && options.different_domains {
        warnings.push(format_message(
            "The `differentDomains` option and `no_prefix` strategy are not compatible. Change strategy or disable `differentDomains` option.",
        ));
    }

    let codes = options.locale_codes();
    if !options.default_locale.is_empty() && !codes.iter().any(|c| c == &options.default_locale) {
        warnings.push(format_message(format!(
            "The default locale \"{}\" is not one of the configured locales.",
            options.default_locale
        )));
    }

    for message in &warnings {
        warn!("{}", message);
    }

    warnings
}
