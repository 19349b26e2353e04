// Per-domain locales

use crate::context::{RequestContext, Side};
use lingo_config::LocaleObject;
use lingo_log::{format_message, warn};

/// Host of the current request.
///
/// The client reads the window location; the server prefers
/// `x-forwarded-host` over `host`.
pub fn get_host(ctx: &RequestContext) -> Option<String> {
    let host = match ctx.side {
        Side::Client => ctx.location().map(|l| l.host.as_str()),
        Side::Server => ctx
            .header("x-forwarded-host")
            .or_else(|| ctx.header("host"))
            .map(|h| h.split(',').next().unwrap_or(h).trim()),
    };
    host.filter(|h| !h.is_empty()).map(str::to_string)
}

/// Code of the locale bound to the current host, or an empty string.
pub fn get_locale_domain(locales: &[LocaleObject], ctx: &RequestContext) -> String {
    let Some(host) = get_host(ctx) else {
        return String::new();
    };

    locales
        .iter()
        .find(|l| l.domain.as_deref() == Some(host.as_str()))
        .map(|l| l.code.clone())
        .unwrap_or_default()
}

fn has_protocol(domain: &str) -> bool {
    if domain.starts_with("//") {
        return true;
    }
    match domain.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Absolute origin of the domain configured for `locale_code`.
///
/// Domains without a scheme get the scheme of the current request.
pub fn get_domain_from_locale(
    locale_code: &str,
    locales: &[LocaleObject],
    ctx: &RequestContext,
) -> Option<String> {
    let domain = locales
        .iter()
        .find(|l| l.code == locale_code)
        .and_then(|l| l.domain.as_deref())
        .filter(|d| !d.is_empty());

    let Some(domain) = domain else {
        warn!(
            "{}",
            format_message(format!("Could not find domain name for locale {}", locale_code))
        );
        return None;
    };

    if has_protocol(domain) {
        return Some(domain.to_string());
    }

    let protocol = match ctx.side {
        Side::Server => {
            if ctx.is_https() {
                "https".to_string()
            } else {
                "http".to_string()
            }
        }
        Side::Client => ctx
            .location()
            .map(|l| l.protocol.trim_end_matches(':').to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "http".to_string()),
    };

    Some(format!("{}://{}", protocol, domain))
}
