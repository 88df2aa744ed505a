//! Compass navigation engine
//!
//! Drives the navigation lifecycle: normalizes a requested path,
//! resolves it through the route table, invokes the owning handler,
//! and delivers the resulting title/content pair to the outlet.
//! Redirect and not-found outcomes are recovered inside the cycle;
//! requests arriving mid-flight are queued and collapse to the most
//! recent target.

mod engine;
mod error;
mod events;
mod handler;
mod history;
mod link;
mod outlet;
mod phase;
mod request;
mod response;

pub use engine::{EngineOptions, NavigationEngine, TitleTransform};
pub use error::{EngineError, HandlerError};
pub use events::{
    CompletedListener, ListenerResult, NavCompleted, NavOutcome, NavStarted, StartedListener,
};
pub use handler::{page, page_async, redirect_to, HandlerFuture, HandlerResult, PageHandler, PageRequest, Title};
pub use history::{HistoryBridge, HistoryVisit, MemoryHistory};
pub use link::{classify, LinkDisposition};
pub use outlet::{Outlet, RecordingOutlet};
pub use phase::NavigationPhase;
pub use request::{NavRequest, RequestOrigin};
pub use response::{redirect, HandlerOutcome, PageResponse, PageView};

pub type Result<T> = std::result::Result<T, EngineError>;
