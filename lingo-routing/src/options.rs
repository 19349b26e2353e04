// Per-route localization options

use crate::Result;
use crate::pages::{AnalyzedPages, PageI18n, PageRoute};
use crate::segment::resolve_route_path;
use lingo_config::{CustomRoutes, I18nOptions, LocalePathOption, PageOption};
use lingo_log::{debug, format_message, warn};
use std::collections::BTreeMap;

/// Locales a route is generated for, with optional custom paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteOptions {
    pub locales: Vec<String>,
    /// Router path pattern per locale
    pub paths: BTreeMap<String, String>,
}

impl RouteOptions {
    pub fn for_locales(locales: &[String]) -> Self {
        Self {
            locales: locales.to_vec(),
            paths: BTreeMap::new(),
        }
    }
}

/// Decides how a single route is localized.
///
/// `Ok(None)` keeps the route as it is.
pub trait RouteOptionsResolver {
    fn resolve(&self, route: &PageRoute, locales: &[String]) -> Result<Option<RouteOptions>>;
}

/// Reads custom paths from the `pages` option.
pub struct ConfigRouteOptions {
    analyzed: AnalyzedPages,
    pages: BTreeMap<String, PageOption>,
    default_locale: String,
}

impl ConfigRouteOptions {
    pub fn new(
        analyzed: AnalyzedPages,
        pages: BTreeMap<String, PageOption>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            analyzed,
            pages,
            default_locale: default_locale.into(),
        }
    }
}

impl RouteOptionsResolver for ConfigRouteOptions {
    fn resolve(&self, route: &PageRoute, locales: &[String]) -> Result<Option<RouteOptions>> {
        let mut options = RouteOptions::for_locales(locales);

        let Some(meta) = self.analyzed.get(route) else {
            warn!(
                "{}",
                format_message(format!(
                    "Couldn't find analyzed page for ({}), so no custom route for it",
                    route.path
                ))
            );
            return Ok(Some(options));
        };

        let page_option = if meta.path.is_empty() {
            None
        } else {
            self.pages.get(&meta.path)
        };

        let paths = match page_option {
            Some(PageOption::Enabled(false)) => return Ok(None),
            None | Some(PageOption::Enabled(true)) => return Ok(Some(options)),
            Some(PageOption::Paths(paths)) => paths,
        };

        options
            .locales
            .retain(|locale| paths.get(locale) != Some(&LocalePathOption::Enabled(false)));

        for locale in &options.locales {
            let custom = match paths.get(locale) {
                Some(LocalePathOption::Path(path)) => Some(path),
                _ => match paths.get(&self.default_locale) {
                    Some(LocalePathOption::Path(path)) => Some(path),
                    _ => None,
                },
            };
            if let Some(path) = custom {
                options
                    .paths
                    .insert(locale.clone(), resolve_route_path(path)?);
            }
        }

        debug!("route options for {} from config: {:?}", route.path, options);
        Ok(Some(options))
    }
}

/// Reads custom paths from the options attached to each page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentRouteOptions;

impl RouteOptionsResolver for ComponentRouteOptions {
    fn resolve(&self, route: &PageRoute, locales: &[String]) -> Result<Option<RouteOptions>> {
        if route.file.is_none() {
            return Ok(None);
        }

        let mut options = RouteOptions::for_locales(locales);

        match &route.i18n {
            None | Some(PageI18n::Enabled(true)) => {}
            Some(PageI18n::Enabled(false)) => return Ok(None),
            Some(PageI18n::Custom {
                locales: custom_locales,
                paths,
            }) => {
                if let Some(custom_locales) = custom_locales {
                    options.locales = custom_locales.clone();
                }
                for (locale, path) in paths {
                    options
                        .paths
                        .insert(locale.clone(), resolve_route_path(path)?);
                }
            }
        }

        debug!("route options for {} from page: {:?}", route.path, options);
        Ok(Some(options))
    }
}

/// Pick the resolver matching `customRoutes`.
pub fn route_options_resolver(
    options: &I18nOptions,
    analyzed: AnalyzedPages,
) -> Box<dyn RouteOptionsResolver> {
    match options.custom_routes {
        CustomRoutes::Config => Box::new(ConfigRouteOptions::new(
            analyzed,
            options.pages.clone(),
            options.default_locale.clone(),
        )),
        CustomRoutes::Page => Box::new(ComponentRouteOptions),
    }
}
