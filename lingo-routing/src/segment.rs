//! Route segment parsing
//!
//! File-route segments use bracket syntax for parameters:
//!
//! - `about` is static text
//! - `[id]` is a dynamic parameter
//! - `[[id]]` is an optional parameter
//! - `[...slug]` is a catch-all parameter
//!
//! Parsing is a character-driven state machine. [`transition`] is the single
//! step function; [`parse_segment`] folds it over the input and
//! [`get_route_path`] renders the tokens as a router path pattern.

use crate::{Result, RoutingError};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// ============================================================================
// Tokens
// ============================================================================

/// Kind of a parsed segment part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text (e.g., "about")
    Static,
    /// Required parameter (e.g., "[id]")
    Dynamic,
    /// Optional parameter (e.g., "[[id]]")
    Optional,
    /// Catch-all parameter (e.g., "[...slug]")
    Catchall,
}

/// One parsed part of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text for static tokens, parameter name otherwise
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Render this token as part of a router path pattern.
    pub fn render(&self) -> String {
        match self.kind {
            TokenKind::Static => utf8_percent_encode(&self.value, PATH_SEGMENT).to_string(),
            TokenKind::Dynamic => format!(":{}", self.value),
            TokenKind::Optional => format!(":{}?", self.value),
            TokenKind::Catchall => format!(":{}(.*)*", self.value),
        }
    }
}

/// Characters escaped in static path text. `/` is kept so multi-segment
/// custom paths render as paths.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ============================================================================
// State machine
// ============================================================================

/// Parser state. Bracketed states carry the parameter name read so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// Between tokens
    Initial,
    Static(String),
    /// Inside `[`
    Dynamic(String),
    /// Inside `[[`
    Optional(String),
    /// Inside `[[name]`, waiting for the second `]`
    OptionalClose(String),
    /// Inside `[...`
    Catchall(String),
}

const CATCHALL_MARKER: &str = "...";

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn push(mut buffer: String, c: char) -> String {
    buffer.push(c);
    buffer
}

fn emit(kind: TokenKind, buffer: String) -> Result<Option<Token>> {
    if buffer.is_empty() {
        return Err(RoutingError::EmptyParam);
    }
    Ok(Some(Token::new(kind, buffer)))
}

/// Advance the state machine by one character.
///
/// Returns the next state and the token completed by this character, if any.
pub fn transition(state: ParseState, c: char) -> Result<(ParseState, Option<Token>)> {
    // A buffer of exactly "..." turns any bracketed state into a catch-all
    let state = match state {
        ParseState::Dynamic(buf) | ParseState::Optional(buf) | ParseState::Catchall(buf)
            if buf == CATCHALL_MARKER =>
        {
            ParseState::Catchall(String::new())
        }
        other => other,
    };

    match state {
        ParseState::Initial => match c {
            '[' => Ok((ParseState::Dynamic(String::new()), None)),
            _ => Ok((ParseState::Static(c.to_string()), None)),
        },
        ParseState::Static(buf) => match c {
            '[' => {
                let token = (!buf.is_empty()).then(|| Token::new(TokenKind::Static, buf));
                Ok((ParseState::Dynamic(String::new()), token))
            }
            _ => Ok((ParseState::Static(push(buf, c)), None)),
        },
        ParseState::Dynamic(buf) => match c {
            '[' => Ok((ParseState::Optional(buf), None)),
            ']' => Ok((ParseState::Initial, emit(TokenKind::Dynamic, buf)?)),
            c if is_param_char(c) => Ok((ParseState::Dynamic(push(buf, c)), None)),
            _ => Ok((ParseState::Dynamic(buf), None)),
        },
        ParseState::Catchall(buf) => match c {
            ']' => Ok((ParseState::Initial, emit(TokenKind::Catchall, buf)?)),
            c if is_param_char(c) => Ok((ParseState::Catchall(push(buf, c)), None)),
            _ => Ok((ParseState::Catchall(buf), None)),
        },
        ParseState::Optional(buf) => match c {
            ']' => Ok((ParseState::OptionalClose(buf), None)),
            c if is_param_char(c) => Ok((ParseState::Optional(push(buf, c)), None)),
            _ => Ok((ParseState::Optional(buf), None)),
        },
        ParseState::OptionalClose(buf) => match c {
            ']' => Ok((ParseState::Initial, emit(TokenKind::Optional, buf)?)),
            // A lone `]` inside `[[...]]` does not close the parameter
            _ => transition(ParseState::Optional(buf), c),
        },
    }
}

/// Flush the state at end of input.
pub fn finish(state: ParseState) -> Result<Option<Token>> {
    match state {
        ParseState::Initial => Ok(None),
        ParseState::Static(buf) => Ok((!buf.is_empty()).then(|| Token::new(TokenKind::Static, buf))),
        ParseState::OptionalClose(buf) => emit(TokenKind::Optional, buf),
        ParseState::Dynamic(buf) => Err(RoutingError::UnfinishedParam(buf)),
        // Unclosed optional and catch-all parameters are flushed as they are
        ParseState::Optional(buf) => Ok((!buf.is_empty()).then(|| Token::new(TokenKind::Optional, buf))),
        ParseState::Catchall(buf) => Ok((!buf.is_empty()).then(|| Token::new(TokenKind::Catchall, buf))),
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Split a route segment into typed tokens.
///
/// Fails on an empty parameter (`[]`) or a `[` that is never closed. An
/// unclosed `[[` or `[...` still yields its parameter.
pub fn parse_segment(segment: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut state = ParseState::Initial;

    for c in segment.chars() {
        let (next, token) = transition(state, c)?;
        tokens.extend(token);
        state = next;
    }

    tokens.extend(finish(state)?);
    Ok(tokens)
}

/// Render tokens as a router path pattern with a leading `/`.
pub fn get_route_path(tokens: &[Token]) -> String {
    tokens.iter().fold(String::from("/"), |mut path, token| {
        path.push_str(&token.render());
        path
    })
}

/// Convert a custom path written in file-route syntax (`/blog/[slug]`) into
/// a router path pattern (`/blog/:slug`). The first character is dropped
/// before parsing.
pub fn resolve_route_path(path: &str) -> Result<String> {
    let mut chars = path.chars();
    chars.next();
    let tokens = parse_segment(chars.as_str())?;
    Ok(get_route_path(&tokens))
}
