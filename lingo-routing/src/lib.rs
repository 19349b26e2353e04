//! Locale-aware routing for lingo
//!
//! - [`segment`]: file-route segment parser and path rendering
//! - [`pages`]: page route tree and page analysis
//! - [`options`]: per-route localization options from config or pages
//! - [`localize`]: expansion of a page table into localized routes
//! - [`navigation`]: locale prefixes, route base names and localized paths
//!
//! ```
//! use lingo_routing::{get_route_path, parse_segment};
//!
//! let tokens = parse_segment("[...slug]").unwrap();
//! assert_eq!(get_route_path(&tokens), "/:slug(.*)*");
//! ```

pub mod error;
pub mod localize;
pub mod navigation;
pub mod options;
pub mod pages;
pub mod segment;

pub use error::{Result, RoutingError};
pub use localize::{LocalizeOptions, adjust_trailing_slash, localize_routes};
pub use navigation::{locale_path, locales_regex, path_locale, route_base_name, switch_locale_path};
pub use options::{
    ComponentRouteOptions, ConfigRouteOptions, RouteOptions, RouteOptionsResolver,
    route_options_resolver,
};
pub use pages::{AnalyzedPage, AnalyzedPages, PageI18n, PageRoute, analyze_pages};
pub use segment::{
    ParseState, Token, TokenKind, finish, get_route_path, parse_segment, resolve_route_path,
    transition,
};
