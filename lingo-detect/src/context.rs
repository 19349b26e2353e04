//! Request context
//!
//! Detection runs either on the server, where everything comes from request
//! headers, or on the client, where the browser exposes the navigator
//! languages, `document.cookie` and the window location. `RequestContext`
//! carries whichever of these the caller has.

use std::collections::HashMap;

/// Where detection runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Server,
    Client,
}

/// Browser location, client side only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Host with port, e.g. `example.com:3000`
    pub host: String,
    /// Scheme with or without the trailing colon
    pub protocol: String,
}

/// Inputs and cookie effects of one navigation or request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub side: Side,
    /// Path of the route being navigated to
    pub path: String,
    headers: HashMap<String, String>,
    navigator_languages: Option<Vec<String>>,
    location: Option<Location>,
    document_cookie: String,
    https: bool,
    set_cookies: Vec<String>,
}

impl RequestContext {
    /// Context for a server-rendered request.
    pub fn server(path: impl Into<String>) -> Self {
        Self {
            side: Side::Server,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Context for a navigation in the browser.
    pub fn client(path: impl Into<String>) -> Self {
        Self {
            side: Side::Client,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a request header. Names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_navigator_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.navigator_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_location(mut self, host: impl Into<String>, protocol: impl Into<String>) -> Self {
        self.location = Some(Location {
            host: host.into(),
            protocol: protocol.into(),
        });
        self
    }

    /// Set the browser cookie string (`a=1; b=2`).
    pub fn with_document_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.document_cookie = cookie.into();
        self
    }

    /// Mark the server request as served over TLS.
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn is_server(&self) -> bool {
        self.side == Side::Server
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn navigator_languages(&self) -> Option<&[String]> {
        self.navigator_languages.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn document_cookie(&self) -> &str {
        &self.document_cookie
    }

    pub fn is_https(&self) -> bool {
        self.https
    }

    /// Cookie string visible on this side.
    pub fn cookie_source(&self) -> Option<&str> {
        match self.side {
            Side::Server => self.header("cookie"),
            Side::Client => Some(self.document_cookie.as_str()),
        }
    }

    /// `Set-Cookie` values written during this request.
    pub fn set_cookie_headers(&self) -> &[String] {
        &self.set_cookies
    }

    pub(crate) fn push_set_cookie(&mut self, cookie: String) {
        self.set_cookies.push(cookie);
    }

    /// Replace or add `name=value` in the browser cookie string.
    pub(crate) fn store_document_cookie(&mut self, name: &str, value: &str) {
        let mut pairs: Vec<String> = self
            .document_cookie
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .filter(|pair| pair.split_once('=').map(|(k, _)| k.trim()) != Some(name))
            .map(str::to_string)
            .collect();
        pairs.push(format!("{}={}", name, value));
        self.document_cookie = pairs.join("; ");
    }
}
