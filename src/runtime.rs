//! Per-application runtime
//!
//! Ties the detector, the locale loader and the message catalog of one
//! application instance together. Nothing here is process-global: two
//! runtimes never share loaded state.

use lingo_config::{I18nOptions, LocaleObject};
use lingo_detect::{
    DetectMode, DetectionResult, LanguageDetector, LocaleCookie, RequestContext, set_locale_cookie,
};
use lingo_loader::{LoadContext, LocaleLoader, MessageCatalog, SourceRegistry};
use lingo_log::{debug, format_message, warn};
use lingo_routing::{LocalizeOptions, RoutingError, locale_path, switch_locale_path};
use parking_lot::RwLock;
use std::sync::Arc;

/// Runtime state of one application.
pub struct I18nRuntime {
    options: I18nOptions,
    detector: LanguageDetector,
    loader: LocaleLoader,
    catalog: MessageCatalog,
    localize: LocalizeOptions,
    locale: RwLock<String>,
    pending_locale: RwLock<Option<String>>,
    dev: bool,
}

impl I18nRuntime {
    pub fn new(
        options: I18nOptions,
        locales: Vec<LocaleObject>,
        registry: SourceRegistry,
        ssg: bool,
        dev: bool,
    ) -> Self {
        let detector = LanguageDetector::with_locales(&options, locales).with_ssg(ssg);
        let fallback = options
            .vue_i18n
            .fallback_locale
            .clone()
            .unwrap_or_else(|| options.default_locale.clone());
        let catalog = MessageCatalog::new().with_fallback(fallback);
        let locale = options.initial_locale().unwrap_or_default().to_string();
        let localize = LocalizeOptions::from(&options);

        Self {
            options,
            detector,
            loader: LocaleLoader::new(Arc::new(registry)),
            catalog,
            localize,
            locale: RwLock::new(locale),
            pending_locale: RwLock::new(None),
            dev,
        }
    }

    pub fn options(&self) -> &I18nOptions {
        &self.options
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn loader(&self) -> &LocaleLoader {
        &self.loader
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The active locale.
    pub fn locale(&self) -> String {
        self.locale.read().clone()
    }

    /// Locale chosen while locale setting on navigation is skipped.
    pub fn pending_locale(&self) -> Option<String> {
        self.pending_locale.read().clone()
    }

    fn load_context(&self, ctx: &RequestContext) -> LoadContext {
        LoadContext {
            server: ctx.is_server(),
            dev: self.dev,
        }
    }

    /// Run browser-language detection for the navigation in `ctx`.
    pub fn detect(&self, ctx: &RequestContext, mode: DetectMode) -> DetectionResult {
        let result = self
            .detector
            .detect_browser_language(ctx, &self.locale(), mode);
        debug!("detect browser language for {}: {:?}", ctx.path, result);
        result
    }

    /// Make sure the messages of `locale` are in the catalog.
    pub async fn ensure_locale(&self, ctx: &RequestContext, locale: &str) {
        let load_ctx = self.load_context(ctx);

        if let Some(messages) = self.loader.load_locale(&load_ctx, locale).await {
            self.catalog.set(locale, messages);
        }
        if let Some(additional) = self.loader.load_additional_locale(&load_ctx, locale).await {
            self.catalog.merge(locale, &additional);
        }
    }

    /// Switch to `locale`: load its messages, then make it active and persist
    /// it in the cookie.
    ///
    /// With `skipSettingLocaleOnNavigate` the locale is only recorded as
    /// pending until [`finalize_pending_locale_change`](Self::finalize_pending_locale_change).
    /// Returns `false` for unknown locales or when `locale` is already active.
    pub async fn switch_locale(&self, ctx: &mut RequestContext, locale: &str) -> bool {
        if !self.detector.locale_codes().iter().any(|c| c == locale) {
            warn!(
                "{}",
                format_message(format!("Cannot switch to unknown locale {}", locale))
            );
            return false;
        }
        if self.locale() == locale {
            return false;
        }

        self.ensure_locale(ctx, locale).await;

        if self.options.skip_setting_locale_on_navigate {
            *self.pending_locale.write() = Some(locale.to_string());
            debug!("locale change to {} is pending", locale);
            return true;
        }

        self.apply_locale(ctx, locale);
        true
    }

    /// Apply the pending locale, if any.
    pub fn finalize_pending_locale_change(&self, ctx: &mut RequestContext) -> Option<String> {
        let pending = self.pending_locale.write().take()?;
        self.apply_locale(ctx, &pending);
        Some(pending)
    }

    fn apply_locale(&self, ctx: &mut RequestContext, locale: &str) -> Option<LocaleCookie> {
        *self.locale.write() = locale.to_string();
        debug!("locale set to {}", locale);

        let detect = self.detector.options()?;
        set_locale_cookie(locale, ctx, detect)
    }

    /// Path of `path` in `locale`, the active locale when `None`.
    pub fn locale_path(&self, path: &str, locale: Option<&str>) -> String {
        let locale = locale.map_or_else(|| self.locale(), str::to_string);
        locale_path(path, &locale, &self.localize)
    }

    /// The current path rewritten for `locale`.
    pub fn switch_locale_path(
        &self,
        current_path: &str,
        locale: &str,
    ) -> Result<String, RoutingError> {
        switch_locale_path(current_path, locale, &self.localize)
    }

    /// Translate `key` in the active locale.
    pub fn t(&self, key: &str) -> String {
        self.catalog.t(&self.locale(), key)
    }
}
