//! Errors surfaced by module setup.

use lingo_config::ConfigError;
use lingo_loader::LoadError;
use lingo_routing::RoutingError;
use thiserror::Error;

/// Any error raised while setting up the module.
#[derive(Debug, Error)]
pub enum LingoError {
    /// Invalid module options
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A page route could not be localized
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// A message file could not be read eagerly
    #[error(transparent)]
    Load(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, LingoError>;
