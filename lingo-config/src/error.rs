// Error types for module options

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("[lingo]: When using the \"lazy\" option you must also set the \"langDir\" option.")]
    LazyWithoutLangDir,

    #[error("[lingo]: When using the \"langDir\" option the \"locales\" must be a list of objects.")]
    LangDirRequiresLocaleObjects,

    #[error(
        "[lingo]: All locales must be objects and have the \"file\" or \"files\" property set when using \"langDir\".\nFound none in:\n{0}."
    )]
    LocaleWithoutFile(String),

    #[error(
        "[lingo]: Locale file \"{file}\" of locale \"{code}\" cannot be read. Supported extensions are json, json5, yaml and yml."
    )]
    UnsupportedLocaleFile { code: String, file: String },

    #[error("[lingo]: Locale code \"{0}\" is configured more than once.")]
    DuplicateLocaleCode(String),

    #[error("Failed to load options: {0}")]
    LoadError(String),

    #[error("Failed to parse options: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
