//! Navigation lifecycle notifications
//!
//! Listeners are invoked sequentially in registration order and the
//! engine awaits each one before proceeding, so a started listener can
//! hold the UI (e.g. show a spinner) until it returns.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use compass_routing::ParamMap;

use crate::error::HandlerError;
use crate::request::RequestOrigin;

/// Payload for navigation-started listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavStarted {
    pub path: String,
    pub origin: RequestOrigin,
}

/// Payload for navigation-completed listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavCompleted {
    pub path: String,
    pub outcome: NavOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum NavOutcome {
    Rendered {
        title: String,
        route_name: String,
        params: ParamMap,
    },
    Failed {
        error: String,
    },
}

pub type ListenerResult = std::result::Result<(), HandlerError>;
pub type StartedListener =
    Arc<dyn Fn(NavStarted) -> BoxFuture<'static, ListenerResult> + Send + Sync>;
pub type CompletedListener =
    Arc<dyn Fn(NavCompleted) -> BoxFuture<'static, ListenerResult> + Send + Sync>;

/// Listener registry owned by the engine.
#[derive(Default)]
pub(crate) struct EventListeners {
    started: RwLock<Vec<StartedListener>>,
    completed: RwLock<Vec<CompletedListener>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_started(&self, listener: StartedListener) {
        self.started.write().push(listener);
    }

    pub fn on_completed(&self, listener: CompletedListener) {
        self.completed.write().push(listener);
    }

    /// Notify started listeners; the first failure aborts the cycle.
    pub async fn emit_started(&self, event: &NavStarted) -> ListenerResult {
        let listeners: Vec<StartedListener> = self.started.read().clone();
        for listener in listeners {
            listener(event.clone()).await?;
        }
        Ok(())
    }

    /// Notify completion listeners. Failures here arrive after the
    /// render and cannot undo it; they are logged and swallowed.
    pub async fn emit_completed(&self, event: &NavCompleted) {
        let listeners: Vec<CompletedListener> = self.completed.read().clone();
        for listener in listeners {
            if let Err(error) = listener(event.clone()).await {
                tracing::warn!(path = %event.path, error = %error, "Navigation observer failed");
            }
        }
    }
}
