// Routing errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Empty param")]
    EmptyParam,

    #[error("Unfinished param \"{0}\"")]
    UnfinishedParam(String),

    #[error("Invalid locale pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for RoutingError {
    fn from(err: regex::Error) -> Self {
        RoutingError::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;
