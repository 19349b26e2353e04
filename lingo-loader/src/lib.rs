//! Lazy locale-message loading for lingo
//!
//! A [`SourceRegistry`] maps locale codes to ordered message sources. The
//! [`LocaleLoader`] fetches them on demand, caching payloads by source key and
//! deep-merging multi-file locales, and hands the result back to the caller,
//! typically to apply to a [`MessageCatalog`].
//!
//! ```
//! use lingo_loader::{LoadContext, LocaleLoader, MessageCatalog, SourceRegistry, StaticSource};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let mut registry = SourceRegistry::new();
//! registry
//!     .register("en", StaticSource::new("common.json", json!({"nav": {"home": "Home"}})))
//!     .register("en", StaticSource::new("en.json", json!({"nav": {"blog": "Blog"}})));
//!
//! let loader = LocaleLoader::new(Arc::new(registry));
//! let catalog = MessageCatalog::new();
//!
//! if let Some(messages) = loader.load_locale(&LoadContext::client(), "en").await {
//!     catalog.set("en", messages);
//! }
//! assert_eq!(catalog.t("en", "nav.blog"), "Blog");
//! # });
//! ```

pub mod catalog;
pub mod error;
pub mod loader;
pub mod merge;
pub mod registry;
pub mod source;

pub use catalog::MessageCatalog;
pub use error::{LoadError, Result};
pub use loader::{LoadContext, LoadState, LocaleLoader};
pub use merge::deep_merge;
pub use registry::SourceRegistry;
pub use source::{
    FileSource, FnSource, MessageFactory, MessageFormat, MessagePayload, MessageSource,
    StaticSource,
};
