//! Message catalog
//!
//! Holds the messages applied for each locale. Loaded locale payloads replace
//! the locale's messages; additional contributions are deep-merged on top.

use crate::merge::deep_merge;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe per-locale message store with a fallback locale.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: Arc<RwLock<HashMap<String, Value>>>,
    fallback_locale: Option<String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback locale.
    pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        self.fallback_locale = (!locale.is_empty()).then_some(locale);
        self
    }

    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    /// Replace the messages of `locale`.
    pub fn set(&self, locale: impl Into<String>, messages: Value) {
        self.messages.write().insert(locale.into(), messages);
    }

    /// Deep-merge `messages` into those of `locale`.
    pub fn merge(&self, locale: impl Into<String>, messages: &Value) {
        let mut store = self.messages.write();
        let target = store
            .entry(locale.into())
            .or_insert_with(|| Value::Object(Map::new()));
        deep_merge(target, messages);
    }

    /// Messages of `locale`.
    pub fn get(&self, locale: &str) -> Option<Value> {
        self.messages.read().get(locale).cloned()
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.messages.read().contains_key(locale)
    }

    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.messages.read().keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Look up a dotted key (`nav.home`) in `locale`.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let store = self.messages.read();
        let mut node = store.get(locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Translate a dotted key.
    ///
    /// Looks up `locale`, then the fallback locale, and returns the key itself
    /// when neither has it.
    pub fn t(&self, locale: &str, key: &str) -> String {
        if let Some(message) = self.lookup(locale, key) {
            return message;
        }

        if let Some(fallback) = self.fallback_locale.as_deref() {
            if let Some(message) = self.lookup(fallback, key) {
                return message;
            }
        }

        key.to_string()
    }

    /// Whether `locale` itself has a message for `key`.
    pub fn has(&self, locale: &str, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_replaces_messages() {
        let catalog = MessageCatalog::new();
        catalog.set("en", json!({"a": "A", "b": "B"}));
        catalog.set("en", json!({"a": "A2"}));
        assert_eq!(catalog.get("en"), Some(json!({"a": "A2"})));
    }

    #[test]
    fn test_merge_keeps_existing_keys() {
        let catalog = MessageCatalog::new();
        catalog.set("en", json!({"nav": {"home": "Home"}}));
        catalog.merge("en", &json!({"nav": {"blog": "Blog"}}));
        assert_eq!(
            catalog.get("en"),
            Some(json!({"nav": {"home": "Home", "blog": "Blog"}}))
        );

        catalog.merge("fr", &json!({"nav": {"home": "Accueil"}}));
        assert!(catalog.has_locale("fr"));
        assert_eq!(catalog.locales(), vec!["en", "fr"]);
    }

    #[test]
    fn test_dotted_lookup() {
        let catalog = MessageCatalog::new();
        catalog.set("en", json!({"nav": {"home": "Home"}, "count": 3, "list": ["x"]}));

        assert_eq!(catalog.lookup("en", "nav.home"), Some("Home".to_string()));
        assert_eq!(catalog.lookup("en", "count"), Some("3".to_string()));
        assert_eq!(catalog.lookup("en", "nav"), None);
        assert_eq!(catalog.lookup("en", "list"), None);
        assert_eq!(catalog.lookup("en", "nav.missing"), None);
        assert!(catalog.has("en", "nav.home"));
    }

    #[test]
    fn test_translate_with_fallback() {
        let catalog = MessageCatalog::new().with_fallback("en");
        catalog.set("en", json!({"hello": "Hello", "bye": "Bye"}));
        catalog.set("fr", json!({"hello": "Bonjour"}));

        assert_eq!(catalog.t("fr", "hello"), "Bonjour");
        assert_eq!(catalog.t("fr", "bye"), "Bye");
        assert_eq!(catalog.t("fr", "missing.key"), "missing.key");
        assert!(!catalog.has("fr", "bye"));
    }

    #[test]
    fn test_clones_share_messages() {
        let catalog = MessageCatalog::new();
        let other = catalog.clone();
        other.set("en", json!({"a": "A"}));
        assert_eq!(catalog.t("en", "a"), "A");
    }

    #[test]
    fn test_empty_fallback_is_ignored() {
        let catalog = MessageCatalog::new().with_fallback("");
        assert_eq!(catalog.fallback_locale(), None);
    }
}
