//! Compass Core
//!
//! Coordination layer for the Compass navigation engine: route
//! registration, engine wiring, configuration and logging bootstrap.
//! Applications build a [`Router`] once at startup, register their
//! routes and listeners, then drive it from navigation triggers.

mod builder;
mod config;
mod error;
mod router;

pub use builder::RouterBuilder;
pub use config::RouterConfig;
pub use error::CoreError;
pub use router::Router;

// Re-export core components
pub use compass_engine::{
    classify, page, page_async, redirect, redirect_to, EngineError, EngineOptions, HandlerError,
    HandlerOutcome, HistoryBridge, HistoryVisit, LinkDisposition, MemoryHistory, NavCompleted,
    NavOutcome, NavRequest, NavStarted, NavigationEngine, NavigationPhase, Outlet, PageHandler,
    PageRequest, PageResponse, PageView, RecordingOutlet, RequestOrigin, Title,
};
pub use compass_routing::{
    ParamMap, Pattern, Resolution, ResolutionCache, RouteError, RouteId, RouteTable, WILDCARD,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
