//! Route localization
//!
//! Expands a page table into one route per locale. Names get a
//! `<separator><locale>` suffix and paths get a `/<locale>` prefix depending
//! on the strategy.

use crate::Result;
use crate::options::RouteOptionsResolver;
use crate::pages::PageRoute;
use lingo_config::{I18nOptions, Strategy};
use lingo_log::debug;

/// Settings that drive route localization and locale-aware paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOptions {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub strategy: Strategy,
    pub trailing_slash: bool,
    pub routes_name_separator: String,
    pub default_locale_route_name_suffix: String,
    /// Emit an unprefixed copy of default-locale routes with the `prefix` strategy
    pub include_unprefixed_fallback: bool,
    /// Locales are told apart by domain, so paths are never prefixed
    pub different_domains: bool,
}

impl Default for LocalizeOptions {
    fn default() -> Self {
        Self::from(&I18nOptions::default())
    }
}

impl From<&I18nOptions> for LocalizeOptions {
    fn from(options: &I18nOptions) -> Self {
        Self {
            locales: options.locale_codes(),
            default_locale: options.default_locale.clone(),
            strategy: options.strategy,
            trailing_slash: options.trailing_slash,
            routes_name_separator: options.routes_name_separator.clone(),
            default_locale_route_name_suffix: options.default_locale_route_name_suffix.clone(),
            include_unprefixed_fallback: false,
            different_domains: options.different_domains,
        }
    }
}

impl LocalizeOptions {
    pub fn with_unprefixed_fallback(mut self, enabled: bool) -> Self {
        self.include_unprefixed_fallback = enabled;
        self
    }

    fn is_default_locale(&self, locale: &str) -> bool {
        locale == self.default_locale
    }

    /// Whether a localized path gets the `/<locale>` prefix.
    pub fn is_prefixable(&self, is_child: bool, path: &str, locale: &str) -> bool {
        if self.different_domains || self.strategy == Strategy::NoPrefix {
            return false;
        }
        let is_child_with_relative_path = is_child && !path.starts_with('/');
        !is_child_with_relative_path
            && !(self.is_default_locale(locale) && self.strategy == Strategy::PrefixExceptDefault)
    }

    /// `name` + separator + `locale`
    pub fn localized_name(&self, name: &str, locale: &str) -> String {
        format!("{}{}{}", name, self.routes_name_separator, locale)
    }
}

/// Normalize the trailing slash of a route path.
pub fn adjust_trailing_slash(path: &str, trailing_slash: bool, is_child_with_relative_path: bool) -> String {
    let mut adjusted = path.trim_end_matches('/').to_string();
    if trailing_slash {
        adjusted.push('/');
    }
    if adjusted.is_empty() && !is_child_with_relative_path {
        adjusted.push('/');
    }
    adjusted
}

/// Localize every route of the page table.
///
/// The `no_prefix` strategy returns the routes untouched.
pub fn localize_routes(
    routes: &[PageRoute],
    options: &LocalizeOptions,
    resolver: &dyn RouteOptionsResolver,
) -> Result<Vec<PageRoute>> {
    if options.strategy == Strategy::NoPrefix {
        return Ok(routes.to_vec());
    }

    let localizer = Localizer { options, resolver };
    let mut localized = Vec::new();
    for route in routes {
        localized.extend(localizer.localize(route, &options.locales, false, false)?);
    }

    debug!(
        "localized {} routes into {} ({})",
        routes.len(),
        localized.len(),
        options.strategy.as_str()
    );
    Ok(localized)
}

struct Localizer<'a> {
    options: &'a LocalizeOptions,
    resolver: &'a dyn RouteOptionsResolver,
}

impl Localizer<'_> {
    fn localize_children(
        &self,
        route: &PageRoute,
        locale: &str,
        is_extra_tree: bool,
    ) -> Result<Vec<PageRoute>> {
        let allowed = [locale.to_string()];
        let mut children = Vec::new();
        for child in &route.children {
            children.extend(self.localize(child, &allowed, true, is_extra_tree)?);
        }
        Ok(children)
    }

    fn localize(
        &self,
        route: &PageRoute,
        allowed: &[String],
        is_child: bool,
        is_extra_tree: bool,
    ) -> Result<Vec<PageRoute>> {
        let opts = self.options;

        if route.redirect.is_some() && route.file.is_none() {
            return Ok(vec![route.clone()]);
        }

        let Some(route_options) = self.resolver.resolve(route, allowed)? else {
            return Ok(vec![route.clone()]);
        };

        let mut routes = Vec::new();
        for locale in route_options.locales.iter().filter(|l| allowed.contains(l)) {
            let mut path = route_options
                .paths
                .get(locale)
                .cloned()
                .unwrap_or_else(|| route.path.clone());

            let mut localized = route.clone();
            localized.locale = Some(locale.clone());
            if let Some(name) = &route.name {
                let mut name = opts.localized_name(name, locale);
                if is_child && is_extra_tree {
                    name = opts.localized_name(&name, &opts.default_locale_route_name_suffix);
                }
                localized.name = Some(name);
            }
            if !route.children.is_empty() {
                localized.children = self.localize_children(route, locale, is_extra_tree)?;
            }

            let is_default = opts.is_default_locale(locale);
            let is_child_with_relative_path = is_child && !path.starts_with('/');

            if is_default && opts.strategy == Strategy::PrefixAndDefault && !is_child {
                let mut default_route = localized.clone();
                if let Some(name) = &localized.name {
                    default_route.name =
                        Some(opts.localized_name(name, &opts.default_locale_route_name_suffix));
                }
                if !route.children.is_empty() {
                    default_route.children = self.localize_children(route, locale, true)?;
                }
                default_route.path =
                    adjust_trailing_slash(&path, opts.trailing_slash, is_child_with_relative_path);
                routes.push(default_route);
            }

            if !is_extra_tree && opts.is_prefixable(is_child, &path, locale) {
                if is_default
                    && opts.strategy == Strategy::Prefix
                    && opts.include_unprefixed_fallback
                    && !is_child
                {
                    let mut fallback = localized.clone();
                    fallback.path = adjust_trailing_slash(
                        &path,
                        opts.trailing_slash,
                        is_child_with_relative_path,
                    );
                    routes.push(fallback);
                }
                path = format!("/{}{}", locale, path);
            }

            localized.path =
                adjust_trailing_slash(&path, opts.trailing_slash, is_child_with_relative_path);
            routes.push(localized);
        }

        Ok(routes)
    }
}
