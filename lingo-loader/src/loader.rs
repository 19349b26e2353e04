//! Locale loading
//!
//! [`LocaleLoader`] fetches a locale's messages from the registry, caching each
//! source's payload by key and remembering which locales are complete. On the
//! server and in development every call reloads.

use crate::merge::deep_merge;
use crate::registry::SourceRegistry;
use crate::source::MessageSource;
use lingo_log::{debug, error, format_message, warn};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Where and how a load runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadContext {
    /// Running during server rendering
    pub server: bool,
    /// Development mode
    pub dev: bool,
}

impl LoadContext {
    pub fn client() -> Self {
        Self::default()
    }

    pub fn server() -> Self {
        Self {
            server: true,
            dev: false,
        }
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Whether the loaded-locale bookkeeping is ignored.
    pub fn bypasses_cache(&self) -> bool {
        self.server || self.dev
    }
}

/// Loaded locales and cached payloads.
#[derive(Debug, Default, Clone)]
pub struct LoadState {
    loaded_locales: HashSet<String>,
    loaded_messages: HashMap<String, Value>,
    loaded_additional: HashSet<String>,
}

impl LoadState {
    pub fn is_loaded(&self, locale: &str) -> bool {
        self.loaded_locales.contains(locale)
    }

    pub fn is_additional_loaded(&self, locale: &str) -> bool {
        self.loaded_additional.contains(locale)
    }

    pub fn cached(&self, key: &str) -> Option<&Value> {
        self.loaded_messages.get(key)
    }
}

/// Loads locale messages on demand.
pub struct LocaleLoader {
    registry: Arc<SourceRegistry>,
    state: RwLock<LoadState>,
}

impl LocaleLoader {
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self {
            registry,
            state: RwLock::new(LoadState::default()),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Snapshot of the bookkeeping.
    pub fn state(&self) -> LoadState {
        self.state.read().clone()
    }

    pub fn is_loaded(&self, locale: &str) -> bool {
        self.state.read().is_loaded(locale)
    }

    /// Load the messages of `locale`.
    ///
    /// Returns `None` when the locale is already loaded (outside server and
    /// dev), has no registered sources, or its single source failed.
    pub async fn load_locale(&self, ctx: &LoadContext, locale: &str) -> Option<Value> {
        if !ctx.bypasses_cache() && self.is_loaded(locale) {
            debug!("locale {} already loaded", locale);
            return None;
        }

        let Some(sources) = self.registry.sources(locale) else {
            warn!(
                "{}",
                format_message(format!("Could not find {} locale code in localeMessages", locale))
            );
            return None;
        };

        match sources {
            [] => None,
            [source] => {
                let message = self.cached_message(ctx, source.as_ref(), locale).await?;
                self.mark_loaded(locale);
                Some(message)
            }
            sources => {
                let mut target = Value::Object(Map::new());
                for source in sources {
                    if let Some(message) = self.cached_message(ctx, source.as_ref(), locale).await {
                        deep_merge(&mut target, &message);
                    }
                }
                self.mark_loaded(locale);
                Some(target)
            }
        }
    }

    /// Load the additional contributions of `locale`, merged in order.
    ///
    /// Contributions are not cached by key; each call outside server and dev
    /// loads them at most once per locale.
    pub async fn load_additional_locale(&self, ctx: &LoadContext, locale: &str) -> Option<Value> {
        if !ctx.bypasses_cache() && self.state.read().is_additional_loaded(locale) {
            return None;
        }

        let mut merged: Option<Value> = None;
        for source in self.registry.additional_sources(locale) {
            if let Some(message) = fetch_message(ctx, source.as_ref(), locale).await {
                deep_merge(merged.get_or_insert_with(|| Value::Object(Map::new())), &message);
                self.state.write().loaded_additional.insert(locale.to_string());
            }
        }
        merged
    }

    async fn cached_message(
        &self,
        ctx: &LoadContext,
        source: &dyn MessageSource,
        locale: &str,
    ) -> Option<Value> {
        let cached = self.state.read().cached(source.key()).cloned();
        if cached.is_some() {
            return cached;
        }

        let message = fetch_message(ctx, source, locale).await?;
        self.state
            .write()
            .loaded_messages
            .insert(source.key().to_string(), message.clone());
        Some(message)
    }

    fn mark_loaded(&self, locale: &str) {
        self.state.write().loaded_locales.insert(locale.to_string());
    }
}

/// Load one source, logging failures. `null` counts as no message.
async fn fetch_message(ctx: &LoadContext, source: &dyn MessageSource, locale: &str) -> Option<Value> {
    match source.load().await {
        Ok(payload) => Some(payload.resolve(ctx, locale)).filter(|m| !m.is_null()),
        Err(e) => {
            error!("{}", format_message(format!("Failed locale loading: {}", e)));
            None
        }
    }
}
