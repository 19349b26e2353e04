//! Message sources
//!
//! A message source produces the messages of one file or contribution. It
//! yields either a plain message object or a factory that builds the object
//! from the load context and locale.

use crate::loader::LoadContext;
use crate::{LoadError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds messages for a locale at load time.
pub type MessageFactory = Arc<dyn Fn(&LoadContext, &str) -> Value + Send + Sync>;

/// What a source yields.
#[derive(Clone)]
pub enum MessagePayload {
    Static(Value),
    Factory(MessageFactory),
}

impl MessagePayload {
    /// Produce the message object for `locale`.
    pub fn resolve(self, ctx: &LoadContext, locale: &str) -> Value {
        match self {
            MessagePayload::Static(value) => value,
            MessagePayload::Factory(factory) => factory(ctx, locale),
        }
    }
}

impl fmt::Debug for MessagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePayload::Static(value) => f.debug_tuple("Static").field(value).finish(),
            MessagePayload::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// A loadable unit of messages, identified by a key shared between locales
/// that reference the same source.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Cache key, the resolved file path for file sources
    fn key(&self) -> &str;

    /// Fetch the messages
    async fn load(&self) -> Result<MessagePayload>;
}

/// Message file formats that can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Json,
    Json5,
    Yaml,
}

impl MessageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(MessageFormat::Json),
            "json5" => Ok(MessageFormat::Json5),
            "yaml" | "yml" => Ok(MessageFormat::Yaml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        match self {
            MessageFormat::Json => Ok(serde_json::from_str(content)?),
            MessageFormat::Json5 => Ok(json5::from_str(content)?),
            MessageFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Reads a message file each time it is loaded.
#[derive(Debug, Clone)]
pub struct FileSource {
    key: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            key: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    pub async fn read(&self) -> Result<Value> {
        let format = MessageFormat::from_path(&self.path)?;
        let content = tokio::fs::read_to_string(&self.path).await?;
        format.parse(&content)
    }
}

#[async_trait]
impl MessageSource for FileSource {
    fn key(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<MessagePayload> {
        Ok(MessagePayload::Static(self.read().await?))
    }
}

/// Messages already in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    key: String,
    messages: Value,
}

impl StaticSource {
    pub fn new(key: impl Into<String>, messages: Value) -> Self {
        Self {
            key: key.into(),
            messages,
        }
    }
}

#[async_trait]
impl MessageSource for StaticSource {
    fn key(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<MessagePayload> {
        Ok(MessagePayload::Static(self.messages.clone()))
    }
}

/// Messages computed per locale by a factory.
#[derive(Clone)]
pub struct FnSource {
    key: String,
    factory: MessageFactory,
}

impl FnSource {
    pub fn new<F>(key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&LoadContext, &str) -> Value + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            factory: Arc::new(factory),
        }
    }
}

#[async_trait]
impl MessageSource for FnSource {
    fn key(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<MessagePayload> {
        Ok(MessagePayload::Factory(Arc::clone(&self.factory)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(MessageFormat::from_path(Path::new("en.json")).unwrap(), MessageFormat::Json);
        assert_eq!(MessageFormat::from_path(Path::new("en.YML")).unwrap(), MessageFormat::Yaml);
        assert_eq!(MessageFormat::from_path(Path::new("en.json5")).unwrap(), MessageFormat::Json5);
        assert!(matches!(
            MessageFormat::from_path(Path::new("en.ts")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{"hello": "Hello"}"#).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.key(), path.display().to_string());

        let payload = source.load().await.unwrap();
        let value = payload.resolve(&LoadContext::client(), "en");
        assert_eq!(value, json!({"hello": "Hello"}));
    }

    #[tokio::test]
    async fn test_file_source_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr.yaml");
        fs::write(&path, "nav:\n  home: Accueil\n").unwrap();

        let value = FileSource::new(&path).read().await.unwrap();
        assert_eq!(value, json!({"nav": {"home": "Accueil"}}));
    }

    #[tokio::test]
    async fn test_file_source_json5() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("de.json5");
        fs::write(&path, "// greetings\n{nav: {home: 'Startseite',},}\n").unwrap();

        let value = FileSource::new(&path).read().await.unwrap();
        assert_eq!(value, json!({"nav": {"home": "Startseite"}}));
    }

    #[tokio::test]
    async fn test_file_source_errors() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();

        assert!(matches!(
            FileSource::new(&broken).load().await,
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            FileSource::new(dir.path().join("missing.json")).load().await,
            Err(LoadError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_fn_source_uses_locale() {
        let source = FnSource::new("greeting", |_ctx, locale| json!({"locale": locale}));
        let payload = source.load().await.unwrap();
        assert_eq!(
            payload.resolve(&LoadContext::server(), "ja"),
            json!({"locale": "ja"})
        );
    }
}
