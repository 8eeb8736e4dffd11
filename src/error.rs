//! Construction-time failures
//!
//! Nothing inside a simulation step fails: guard conditions just suppress
//! the action. Only building an engine (or reading its configuration) can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown fighter id: {0}")]
    UnknownFighter(String),
    #[error("canvas has no 2d drawing context")]
    MissingContext,
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("host call failed: {0}")]
    Js(String),
}
