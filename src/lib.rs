// Lingo - locale routing, browser-language detection and lazy message loading
//
// At build time the module localizes the page table and prepares message
// sources; at request time the runtime detects the visitor's locale and loads
// its messages on demand.

pub mod error;
pub mod module;
pub mod runtime;

pub use error::{LingoError, Result};
pub use module::{I18nModule, SetupContext};
pub use runtime::I18nRuntime;

// Re-export workspace crates
pub use lingo_config;
pub use lingo_detect;
pub use lingo_loader;
pub use lingo_log;
pub use lingo_routing;

/// Commonly used items.
pub mod prelude {
    pub use crate::{I18nModule, I18nRuntime, LingoError, SetupContext};
    pub use lingo_config::{
        DetectBrowserLanguageOptions, I18nOptions, LocaleEntry, LocaleObject, RedirectOn,
        Strategy,
    };
    pub use lingo_detect::{DetectMode, DetectReason, DetectionResult, LocaleFrom, RequestContext};
    pub use lingo_loader::{LoadContext, MessageCatalog, deep_merge};
    pub use lingo_routing::{PageRoute, get_route_path, parse_segment};
}
