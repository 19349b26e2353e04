//! Integration tests for common lingo workflows.
//!
//! These tests drive the module from options to a running runtime the way an
//! application would.

use lingo::lingo_detect::get_locale_cookie;
use lingo::lingo_routing::{RoutingError, TokenKind, resolve_route_path};
use lingo::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn page(src: &Path, name: &str, path: &str, file: &str) -> PageRoute {
    PageRoute::new(name, path).with_file(src.join("pages").join(file).display().to_string())
}

// =============================================================================
// Segment Parser
// =============================================================================

#[test]
fn test_segment_kinds() {
    let tokens = parse_segment("about").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Static);
    assert_eq!(tokens[0].value, "about");

    assert_eq!(parse_segment("[name]").unwrap()[0].kind, TokenKind::Dynamic);
    assert_eq!(parse_segment("[[name]]").unwrap()[0].kind, TokenKind::Optional);
    assert_eq!(parse_segment("[...name]").unwrap()[0].kind, TokenKind::Catchall);

    // Unclosed optional and catch-all brackets still yield their parameter
    assert_eq!(parse_segment("[...rest").unwrap()[0].kind, TokenKind::Catchall);
    assert_eq!(parse_segment("[[abc").unwrap()[0].value, "abc");
}

#[test]
fn test_segment_errors() {
    assert_eq!(parse_segment("[]"), Err(RoutingError::EmptyParam));
    assert!(matches!(
        parse_segment("[abc"),
        Err(RoutingError::UnfinishedParam(_))
    ));
}

#[test]
fn test_segment_rendering() {
    assert_eq!(get_route_path(&parse_segment("[id]").unwrap()), "/:id");
    assert_eq!(get_route_path(&parse_segment("[[id]]").unwrap()), "/:id?");
    assert_eq!(get_route_path(&parse_segment("[...slug]").unwrap()), "/:slug(.*)*");
    assert_eq!(resolve_route_path("/blog/[id]").unwrap(), "/blog/:id");
}

// =============================================================================
// Build-time setup
// =============================================================================

#[tokio::test]
async fn test_setup_from_options_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "locales/en.json", r#"{"nav": {"home": "Home"}}"#);
    write(dir.path(), "locales/fr.json", r#"{"nav": {"home": "Accueil"}}"#);
    write(dir.path(), "locales/fr-extra.yaml", "nav:\n  about: A propos\n");
    write(
        dir.path(),
        "i18n.json",
        r#"{
            "locales": [
                {"code": "en", "iso": "en-US", "file": "en.json"},
                {"code": "fr", "iso": "fr-FR", "files": ["fr.json", "fr-extra.yaml"]}
            ],
            "defaultLocale": "en",
            "langDir": "locales",
            "lazy": true,
            "customRoutes": "config",
            "pages": {
                "about": {"fr": "/a-propos"},
                "blog/[id]": {"fr": "/article/[id]"}
            }
        }"#,
    );

    let options = lingo::lingo_config::load_options(dir.path().join("i18n.json")).unwrap();
    let pages = vec![
        page(dir.path(), "about", "/about", "about.vue"),
        page(dir.path(), "blog-id", "/blog/:id", "blog/[id].vue"),
    ];

    let module = I18nModule::setup(options, SetupContext::new(dir.path()), pages)
        .await
        .unwrap();

    let routes: Vec<(&str, &str)> = module
        .pages()
        .iter()
        .map(|p| (p.name.as_deref().unwrap_or(""), p.path.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            ("about___en", "/about"),
            ("about___fr", "/fr/a-propos"),
            ("blog-id___en", "/blog/:id"),
            ("blog-id___fr", "/fr/article/:id"),
        ]
    );

    let runtime = module.into_runtime();
    let ctx = RequestContext::client("/fr");
    runtime.ensure_locale(&ctx, "fr").await;

    assert_eq!(
        runtime.catalog().get("fr"),
        Some(json!({"nav": {"home": "Accueil", "about": "A propos"}}))
    );
}

#[tokio::test]
async fn test_setup_rejects_plain_locales_with_lang_dir() {
    let options = I18nOptions::new()
        .with_locales(["en", "fr"])
        .with_lang_dir("locales");

    let err = I18nModule::setup(options, SetupContext::default(), Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("[lingo]: "));
}

#[tokio::test]
async fn test_setup_without_ssr_adds_unprefixed_fallback() {
    let dir = TempDir::new().unwrap();
    let options = I18nOptions::new()
        .with_locales(["en", "fr"])
        .with_default_locale("en")
        .with_strategy(Strategy::Prefix);
    let pages = vec![page(dir.path(), "about", "/about", "about.vue")];

    let module = I18nModule::setup(
        options,
        SetupContext::new(dir.path()).with_ssr(false),
        pages,
    )
    .await
    .unwrap();

    let paths: Vec<&str> = module.pages().iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["/about", "/en/about", "/fr/about"]);
}

// =============================================================================
// Detection
// =============================================================================

fn detecting_runtime(strategy: Strategy) -> I18nRuntime {
    let options = I18nOptions::new()
        .with_locales(["en", "fr"])
        .with_default_locale("en")
        .with_strategy(strategy);
    I18nRuntime::new(
        options.clone(),
        options.normalized_locales(),
        Default::default(),
        false,
        false,
    )
}

#[test]
fn test_no_prefix_detects_browser_language() {
    let runtime = detecting_runtime(Strategy::NoPrefix);
    let ctx = RequestContext::server("/").with_header("accept-language", "fr;q=0.9");

    let result = runtime.detect(&ctx, DetectMode::Normal);
    assert_eq!(result.locale, "fr");
    assert!(result.stat);
    assert_eq!(result.from, Some(LocaleFrom::NavigatorOrHeader));
}

#[test]
fn test_redirect_on_root_ignores_other_paths() {
    let runtime = detecting_runtime(Strategy::PrefixExceptDefault);
    let ctx = RequestContext::server("/about").with_header("accept-language", "fr");

    let result = runtime.detect(&ctx, DetectMode::Normal);
    assert!(!result.stat);
    assert_eq!(result.reason, Some(DetectReason::NotRedirectOnRoot));
}

#[test]
fn test_cookie_matching_current_locale_does_nothing() {
    let runtime = detecting_runtime(Strategy::PrefixExceptDefault);
    let ctx = RequestContext::server("/").with_header("cookie", "i18n_redirected=en");

    let result = runtime.detect(&ctx, DetectMode::Normal);
    assert!(!result.stat);
    assert_eq!(result.reason, Some(DetectReason::NotFoundMatch));
}

#[tokio::test]
async fn test_switch_locale_persists_cookie() {
    let runtime = detecting_runtime(Strategy::NoPrefix);
    let mut ctx = RequestContext::client("/");

    assert!(runtime.switch_locale(&mut ctx, "fr").await);
    assert_eq!(runtime.locale(), "fr");

    // The next navigation sees the cookie and, with the locale already active,
    // has nothing to redirect to.
    let next = RequestContext::client("/").with_document_cookie(ctx.document_cookie());
    let detect = DetectBrowserLanguageOptions::default();
    assert_eq!(
        get_locale_cookie(&next, &detect, runtime.detector().locale_codes()),
        Some("fr".to_string())
    );

    let result = runtime.detect(&next, DetectMode::Normal);
    assert!(!result.stat);
    assert_eq!(result.reason, Some(DetectReason::NotFoundMatch));
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn test_lazy_locale_is_fetched_once() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "locales/en.json", r#"{"hello": "Hello"}"#);

    let options = I18nOptions::new()
        .with_locales([LocaleEntry::Object(LocaleObject::new("en").with_file("en.json"))])
        .with_default_locale("en")
        .with_lang_dir("locales")
        .with_lazy(true);
    let module = I18nModule::setup(options, SetupContext::new(dir.path()), Vec::new())
        .await
        .unwrap();
    let runtime = module.into_runtime();
    let client = LoadContext::client();

    let first = runtime.loader().load_locale(&client, "en").await;
    assert_eq!(first, Some(json!({"hello": "Hello"})));

    fs::remove_file(dir.path().join("locales/en.json")).unwrap();

    assert_eq!(runtime.loader().load_locale(&client, "en").await, None);
    // Server loads bypass the loaded check but reuse the cached payload.
    assert_eq!(
        runtime.loader().load_locale(&LoadContext::server(), "en").await,
        first
    );
}

#[tokio::test]
async fn test_extended_messages_are_merged() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "locales/en.json", r#"{"nav": {"home": "Home"}}"#);

    let options = I18nOptions::new()
        .with_locales([LocaleEntry::Object(LocaleObject::new("en").with_file("en.json"))])
        .with_default_locale("en")
        .with_lang_dir("locales");
    let mut module = I18nModule::setup(options, SetupContext::new(dir.path()), Vec::new())
        .await
        .unwrap();
    module.extend_messages("en", json!({"nav": {"docs": "Docs"}}));

    let runtime = module.into_runtime();
    runtime
        .ensure_locale(&RequestContext::server("/"), "en")
        .await;

    assert_eq!(runtime.t("nav.home"), "Home");
    assert_eq!(runtime.t("nav.docs"), "Docs");
}

#[test]
fn test_deep_merge_semantics() {
    let mut target = json!({"a": {"x": 1}});
    deep_merge(&mut target, &json!({"a": {"y": 2}}));
    assert_eq!(target, json!({"a": {"x": 1, "y": 2}}));

    let mut target = json!({"a": [1, 2]});
    deep_merge(&mut target, &json!({"a": [3]}));
    assert_eq!(target, json!({"a": [3]}));
}
