// Options file loaders

use crate::options::I18nOptions;
use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported options file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Reads `I18nOptions` from a JSON or TOML document.
pub struct OptionsLoader {
    format: FileFormat,
}

impl OptionsLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Load and deserialize an options file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<I18nOptions> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::LoadError(format!("Failed to read file: {}", e)))?;

        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<I18nOptions> {
        let value = self.parse_value(content)?;
        serde_json::from_value(value)
            .map_err(|e| ConfigError::ParseError(format!("Invalid options: {}", e)))
    }

    /// Parse into a generic document without interpreting it
    pub fn parse_value(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => {
                let toml_value: toml::Value = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

                serde_json::to_value(toml_value).map_err(|e| {
                    ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e))
                })
            }
        }
    }
}

/// Load options from a file, picking the format from its extension.
pub fn load_options(path: impl AsRef<Path>) -> Result<I18nOptions> {
    OptionsLoader::auto(path.as_ref())?.load_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Strategy;
    use std::io::Write;

    #[test]
    fn test_parse_json() {
        let loader = OptionsLoader::new(FileFormat::Json);
        let options = loader
            .parse(r#"{"locales": ["en", "ja"], "defaultLocale": "en", "lazy": false}"#)
            .unwrap();

        assert_eq!(options.locale_codes(), vec!["en", "ja"]);
        assert_eq!(options.default_locale, "en");
    }

    #[test]
    fn test_parse_toml() {
        let loader = OptionsLoader::new(FileFormat::Toml);
        let toml = r#"
            defaultLocale = "en"
            strategy = "prefix_and_default"
            langDir = "lang"

            [[locales]]
            code = "en"
            file = "en.json"

            [[locales]]
            code = "fr"
            files = ["fr.json", "fr-extra.yaml"]

            [detectBrowserLanguage]
            useCookie = false
        "#;

        let options = loader.parse(toml).unwrap();
        assert_eq!(options.strategy, Strategy::PrefixAndDefault);
        assert_eq!(options.lang_dir.as_deref(), Some("lang"));
        assert_eq!(options.normalized_locales()[1].files.as_ref().unwrap().len(), 2);
        assert!(!options.detect_browser_language.unwrap().use_cookie);
    }

    #[test]
    fn test_parse_error() {
        let loader = OptionsLoader::new(FileFormat::Json);
        assert!(matches!(
            loader.parse("{not json"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            loader.parse(r#"{"strategy": "sideways"}"#),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert!(OptionsLoader::auto("i18n").is_err());
        assert!(OptionsLoader::auto("i18n.ini").is_err());
    }

    #[test]
    fn test_load_options_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"locales": ["en"], "defaultLocale": "en"}}"#).unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.default_locale, "en");
    }
}
