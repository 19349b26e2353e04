//! Module options for lingo
//!
//! Holds the option model of the i18n module together with locale
//! descriptors, validation and the lookup of locale message files.
//!
//! ## Example
//!
//! ```
//! use lingo_config::{I18nOptions, Strategy, check_options};
//!
//! let options = I18nOptions::new()
//!     .with_locales(["en", "fr"])
//!     .with_default_locale("en")
//!     .with_strategy(Strategy::Prefix);
//!
//! check_options(&options).unwrap();
//! assert_eq!(options.locale_codes(), vec!["en", "fr"]);
//! ```

pub mod error;
pub mod loader;
pub mod locale;
pub mod options;
pub mod resolve;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{FileFormat, OptionsLoader, load_options};
pub use locale::{Direction, LocaleEntry, LocaleObject, locale_codes, normalize_locales};
pub use options::{
    CustomRoutes, DetectBrowserLanguageOptions, I18nOptions, LocalePathOption, PageOption,
    RedirectOn, Strategy, VueI18nOptions,
};
pub use resolve::{LOCALE_FILE_EXTENSIONS, is_locale_file, locale_files, resolve_locale_files};
pub use validation::{Validate, check_options, compatibility_warnings};
