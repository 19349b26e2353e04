// Module setup

use crate::Result;
use crate::runtime::I18nRuntime;
use lingo_config::{
    I18nOptions, LocaleObject, Strategy, Validate, compatibility_warnings, resolve_locale_files,
};
use lingo_loader::SourceRegistry;
use lingo_log::debug;
use lingo_routing::{
    LocalizeOptions, PageRoute, analyze_pages, localize_routes, route_options_resolver,
};
use serde_json::Value;
use std::path::PathBuf;

/// Application facts the module is set up against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupContext {
    /// Source directory; `langDir` and the pages directory are relative to it
    pub src_dir: PathBuf,
    pub pages_dir: String,
    /// Server-side rendering enabled
    pub ssr: bool,
    /// Static site generation
    pub ssg: bool,
    /// Development mode
    pub dev: bool,
}

impl Default for SetupContext {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("."),
            pages_dir: "pages".to_string(),
            ssr: true,
            ssg: false,
            dev: false,
        }
    }
}

impl SetupContext {
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_pages_dir(mut self, pages_dir: impl Into<String>) -> Self {
        self.pages_dir = pages_dir.into();
        self
    }

    pub fn with_ssr(mut self, ssr: bool) -> Self {
        self.ssr = ssr;
        self
    }

    pub fn with_ssg(mut self, ssg: bool) -> Self {
        self.ssg = ssg;
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }
}

/// The set-up i18n module: resolved locales, message sources and the
/// localized page table.
#[derive(Debug)]
pub struct I18nModule {
    options: I18nOptions,
    context: SetupContext,
    locales: Vec<LocaleObject>,
    registry: SourceRegistry,
    pages: Vec<PageRoute>,
}

impl I18nModule {
    /// Validate `options`, resolve locale files, build the message registry
    /// and localize `pages`.
    ///
    /// Pages are left untouched with the `no_prefix` strategy or when no
    /// locales are configured.
    pub async fn setup(
        options: I18nOptions,
        context: SetupContext,
        pages: Vec<PageRoute>,
    ) -> Result<Self> {
        if options.debug {
            lingo_log::set_debug(true);
        }
        options.validate()?;
        compatibility_warnings(&options);

        let normalized = options.normalized_locales();
        let locales = match &options.lang_dir {
            Some(lang_dir) => {
                let lang_path = context.src_dir.join(lang_dir);
                debug!("langDir path {}", lang_path.display());
                resolve_locale_files(&lang_path, normalized)
            }
            None => normalized,
        };

        let registry = SourceRegistry::from_locales(&locales, options.lazy).await?;

        let pages = if options.strategy != Strategy::NoPrefix && !locales.is_empty() {
            let analyzed = analyze_pages(&context.src_dir, &context.pages_dir, &pages);
            let resolver = route_options_resolver(&options, analyzed);
            let localize = LocalizeOptions::from(&options).with_unprefixed_fallback(!context.ssr);
            let localized = localize_routes(&pages, &localize, resolver.as_ref())?;
            debug!("localized {} page(s) into {} route(s)", pages.len(), localized.len());
            localized
        } else {
            pages
        };

        Ok(Self {
            options,
            context,
            locales,
            registry,
            pages,
        })
    }

    /// Add messages contributed from outside the locale files.
    pub fn extend_messages(&mut self, locale: impl Into<String>, messages: Value) -> &mut Self {
        self.registry.extend_messages(locale, messages);
        self
    }

    pub fn options(&self) -> &I18nOptions {
        &self.options
    }

    pub fn context(&self) -> &SetupContext {
        &self.context
    }

    /// Normalized locales with resolved message paths.
    pub fn locales(&self) -> &[LocaleObject] {
        &self.locales
    }

    pub fn locale_codes(&self) -> Vec<String> {
        self.locales.iter().map(|l| l.code.clone()).collect()
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// The page table after localization.
    pub fn pages(&self) -> &[PageRoute] {
        &self.pages
    }

    /// Per-application runtime over the set-up module.
    pub fn into_runtime(self) -> I18nRuntime {
        I18nRuntime::new(
            self.options,
            self.locales,
            self.registry,
            self.context.ssg,
            self.context.dev,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LingoError;
    use lingo_config::{ConfigError, LocaleEntry};
    use std::fs;
    use tempfile::TempDir;

    fn pages(src: &std::path::Path) -> Vec<PageRoute> {
        vec![
            PageRoute::new("index", "/").with_file(src.join("pages/index.vue").display().to_string()),
            PageRoute::new("about", "/about")
                .with_file(src.join("pages/about.vue").display().to_string()),
        ]
    }

    #[tokio::test]
    async fn test_setup_localizes_pages() {
        let dir = TempDir::new().unwrap();
        let options = I18nOptions::new()
            .with_locales(["en", "fr"])
            .with_default_locale("en");

        let module = I18nModule::setup(options, SetupContext::new(dir.path()), pages(dir.path()))
            .await
            .unwrap();

        let paths: Vec<&str> = module.pages().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/fr", "/about", "/fr/about"]);
        assert_eq!(module.locale_codes(), vec!["en", "fr"]);
    }

    #[tokio::test]
    async fn test_setup_no_prefix_keeps_pages() {
        let dir = TempDir::new().unwrap();
        let options = I18nOptions::new()
            .with_locales(["en", "fr"])
            .with_default_locale("en")
            .with_strategy(Strategy::NoPrefix);

        let original = pages(dir.path());
        let module = I18nModule::setup(options, SetupContext::new(dir.path()), original.clone())
            .await
            .unwrap();
        assert_eq!(module.pages(), original.as_slice());
    }

    #[tokio::test]
    async fn test_setup_without_locales_keeps_pages() {
        let dir = TempDir::new().unwrap();
        let original = pages(dir.path());
        let module = I18nModule::setup(I18nOptions::new(), SetupContext::new(dir.path()), original.clone())
            .await
            .unwrap();
        assert_eq!(module.pages(), original.as_slice());
    }

    #[tokio::test]
    async fn test_setup_rejects_lazy_without_lang_dir() {
        let options = I18nOptions::new().with_locales(["en"]).with_lazy(true);
        let result = I18nModule::setup(options, SetupContext::default(), Vec::new()).await;
        assert!(matches!(
            result,
            Err(LingoError::Config(ConfigError::LazyWithoutLangDir))
        ));
    }

    #[tokio::test]
    async fn test_setup_resolves_lang_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("locales")).unwrap();
        fs::write(dir.path().join("locales/en.json"), r#"{"hello": "Hello"}"#).unwrap();

        let options = I18nOptions::new()
            .with_locales([LocaleEntry::Object(LocaleObject::new("en").with_file("en.json"))])
            .with_default_locale("en")
            .with_lang_dir("locales")
            .with_lazy(true);

        let module = I18nModule::setup(options, SetupContext::new(dir.path()), Vec::new())
            .await
            .unwrap();

        let en = &module.locales()[0];
        assert_eq!(en.path.as_deref(), Some(dir.path().join("locales/en.json").as_path()));
        assert_eq!(module.registry().sources("en").map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn test_setup_reads_json5_eagerly() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("locales")).unwrap();
        fs::write(dir.path().join("locales/en.json5"), "{hello: 'Hello', /* greeting */}").unwrap();

        let options = I18nOptions::new()
            .with_locales([LocaleEntry::Object(LocaleObject::new("en").with_file("en.json5"))])
            .with_default_locale("en")
            .with_lang_dir("locales");

        let module = I18nModule::setup(options, SetupContext::new(dir.path()), Vec::new())
            .await
            .unwrap();
        let runtime = module.into_runtime();
        runtime
            .ensure_locale(&lingo_detect::RequestContext::server("/"), "en")
            .await;
        assert_eq!(runtime.t("hello"), "Hello");
    }

    #[tokio::test]
    async fn test_setup_rejects_script_locale_files() {
        let options = I18nOptions::new()
            .with_locales([LocaleEntry::Object(LocaleObject::new("en").with_file("en.ts"))])
            .with_lang_dir("locales");

        let err = I18nModule::setup(options, SetupContext::default(), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LingoError::Config(ConfigError::UnsupportedLocaleFile { .. })
        ));
        assert!(err.to_string().starts_with("[lingo]: "));
    }
}
