//! Engine error types

use thiserror::Error;

/// Boxed error surfaced by handlers and lifecycle listeners.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Redirect chain from \"{path}\" exceeded {limit} hops")]
    RedirectLoop { path: String, limit: usize },

    #[error("Handler failed for \"{path}\": {source}")]
    Handler {
        path: String,
        #[source]
        source: HandlerError,
    },

    #[error("Navigation observer failed for \"{path}\": {source}")]
    Observer {
        path: String,
        #[source]
        source: HandlerError,
    },

    #[error("Route error: {0}")]
    Route(#[from] compass_routing::RouteError),
}
