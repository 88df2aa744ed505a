//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Route error: {0}")]
    Route(#[from] compass_routing::RouteError),

    #[error("Engine error: {0}")]
    Engine(#[from] compass_engine::EngineError),

    #[error("Configuration error: {0}")]
    Config(String),
}
