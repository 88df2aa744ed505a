//! Router facade
//!
//! Owns the wired engine and the document origin. Applications hold a
//! `Router` (or clones of it) and trigger navigation through its
//! methods; there is no process-wide router instance.

use std::sync::Arc;

use url::Url;

use compass_engine::{
    classify, CompletedListener, LinkDisposition, NavRequest, NavigationEngine, StartedListener,
};
use compass_routing::ParamMap;

use crate::Result;

pub struct Router {
    engine: Arc<NavigationEngine>,
    origin: Url,
}

impl Router {
    pub(crate) fn new(engine: Arc<NavigationEngine>, origin: Url) -> Self {
        Self { engine, origin }
    }

    pub fn builder() -> crate::RouterBuilder {
        crate::RouterBuilder::new()
    }

    /// Perform the initial page-load navigation to the history
    /// bridge's current path. Safe to call once; repeats are ignored.
    pub async fn start(&self) {
        self.engine.start().await;
    }

    /// Navigate programmatically to a path.
    pub async fn navigate(&self, path: impl Into<String>) {
        self.engine.navigate(path).await;
    }

    /// Navigate to a named route, substituting `params` into its
    /// template.
    pub async fn navigate_to_route(&self, name: &str, params: &ParamMap) -> Result<()> {
        let path = self.engine.path_for(name, params)?;
        self.engine.navigate(path).await;
        Ok(())
    }

    /// Translate a browser back/forward event into a navigation.
    pub async fn pop_state(&self) {
        self.engine.pop_state().await;
    }

    /// Handle an anchor click. Same-origin hrefs are converted into a
    /// link-click navigation; cross-origin ones are left untouched and
    /// reported as [`LinkDisposition::External`].
    pub async fn click_link(&self, href: &str) -> LinkDisposition {
        match classify(&self.origin, href) {
            LinkDisposition::Internal { path } => {
                self.engine.submit(NavRequest::link_click(path.clone())).await;
                LinkDisposition::Internal { path }
            }
            LinkDisposition::External => {
                tracing::debug!(href = %href, "Cross-origin link passed through");
                LinkDisposition::External
            }
        }
    }

    pub fn on_navigation_started(&self, listener: StartedListener) {
        self.engine.on_navigation_started(listener);
    }

    pub fn on_navigation_complete(&self, listener: CompletedListener) {
        self.engine.on_navigation_complete(listener);
    }

    /// The normalized path of the page currently on screen.
    pub fn current_path(&self) -> Option<String> {
        self.engine.current_path()
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            origin: self.origin.clone(),
        }
    }
}
