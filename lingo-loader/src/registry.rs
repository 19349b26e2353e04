//! Message-source registry
//!
//! Maps each locale code to the ordered list of sources its messages are
//! built from, plus a separate list of additional contributions registered by
//! other modules.

use crate::source::{FileSource, MessageSource, StaticSource};
use crate::Result;
use lingo_config::LocaleObject;
use lingo_log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registered sources per locale.
#[derive(Default)]
pub struct SourceRegistry {
    locales: HashMap<String, Vec<Arc<dyn MessageSource>>>,
    additional: HashMap<String, Vec<Arc<dyn MessageSource>>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from locales whose files have been resolved.
    ///
    /// With `lazy` each file is read when its locale is first loaded.
    /// Otherwise every file is read now and kept in memory; a file shared
    /// by several locales is read once.
    pub async fn from_locales(locales: &[LocaleObject], lazy: bool) -> Result<Self> {
        let mut registry = Self::new();
        let mut eager: HashMap<String, Arc<dyn MessageSource>> = HashMap::new();

        for locale in locales {
            for path in locale.message_paths() {
                let file = FileSource::new(path);
                let source: Arc<dyn MessageSource> = if lazy {
                    Arc::new(file)
                } else if let Some(existing) = eager.get(file.key()) {
                    Arc::clone(existing)
                } else {
                    let messages = file.read().await?;
                    let source: Arc<dyn MessageSource> =
                        Arc::new(StaticSource::new(file.key(), messages));
                    eager.insert(file.key().to_string(), Arc::clone(&source));
                    source
                };
                registry.register_arc(&locale.code, source);
            }
            // Locales without files still get an (empty) entry.
            registry.locales.entry(locale.code.clone()).or_default();
        }

        debug!(
            "message registry built for {} locale(s), lazy: {}",
            registry.locales.len(),
            lazy
        );
        Ok(registry)
    }

    /// Append a source to the messages of `locale`.
    pub fn register<S>(&mut self, locale: impl Into<String>, source: S) -> &mut Self
    where
        S: MessageSource + 'static,
    {
        self.register_arc(locale, Arc::new(source))
    }

    pub fn register_arc(
        &mut self,
        locale: impl Into<String>,
        source: Arc<dyn MessageSource>,
    ) -> &mut Self {
        self.locales.entry(locale.into()).or_default().push(source);
        self
    }

    /// Append an additional contribution for `locale`.
    pub fn register_additional<S>(&mut self, locale: impl Into<String>, source: S) -> &mut Self
    where
        S: MessageSource + 'static,
    {
        self.additional
            .entry(locale.into())
            .or_default()
            .push(Arc::new(source));
        self
    }

    /// Register in-memory messages as an additional contribution.
    pub fn extend_messages(&mut self, locale: impl Into<String>, messages: Value) -> &mut Self {
        let locale = locale.into();
        let key = format!(
            "additional:{}:{}",
            locale,
            self.additional.get(&locale).map_or(0, Vec::len)
        );
        self.register_additional(locale, StaticSource::new(key, messages))
    }

    /// Sources of `locale`, `None` when the locale was never registered.
    pub fn sources(&self, locale: &str) -> Option<&[Arc<dyn MessageSource>]> {
        self.locales.get(locale).map(Vec::as_slice)
    }

    /// Additional sources of `locale`, possibly empty.
    pub fn additional_sources(&self, locale: &str) -> &[Arc<dyn MessageSource>] {
        self.additional
            .get(locale)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = |map: &HashMap<String, Vec<Arc<dyn MessageSource>>>| {
            map.iter()
                .map(|(locale, sources)| {
                    let keys: Vec<String> = sources.iter().map(|s| s.key().to_string()).collect();
                    (locale.clone(), keys)
                })
                .collect::<HashMap<_, _>>()
        };
        f.debug_struct("SourceRegistry")
            .field("locales", &keys(&self.locales))
            .field("additional", &keys(&self.additional))
            .finish()
    }
}
