//! Router assembly
//!
//! Routes, listeners and boundary implementations are collected here,
//! then frozen into an engine by `build`. The route table never
//! changes after that point, which is what makes resolution caching
//! safe.

use std::sync::Arc;

use url::Url;

use compass_engine::{
    page, CompletedListener, EngineOptions, HistoryBridge, MemoryHistory, NavigationEngine,
    Outlet, PageHandler, RecordingOutlet, StartedListener, Title, TitleTransform,
};
use compass_routing::{ParamMap, RouteId, RouteTable, WILDCARD};

use crate::config::RouterConfig;
use crate::error::CoreError;
use crate::router::Router;
use crate::Result;

pub struct RouterBuilder {
    table: RouteTable<Arc<dyn PageHandler>>,
    config: RouterConfig,
    history: Option<Arc<dyn HistoryBridge>>,
    outlet: Option<Arc<dyn Outlet>>,
    title_transform: Option<TitleTransform>,
    started_listeners: Vec<StartedListener>,
    completed_listeners: Vec<CompletedListener>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            config: RouterConfig::default(),
            history: None,
            outlet: None,
            title_transform: None,
            started_listeners: Vec::new(),
            completed_listeners: Vec::new(),
        }
    }

    pub fn with_config(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Self::new();
        builder.config = config;
        Ok(builder)
    }

    /// Register a route from a title and content function. Returns a
    /// handle usable for named navigation.
    pub fn route<F>(
        &mut self,
        template: &str,
        title: impl Into<Title>,
        content: F,
    ) -> Result<RouteId>
    where
        F: Fn(&ParamMap) -> String + Send + Sync + 'static,
    {
        Ok(self.table.register(template, None, page(title, content))?)
    }

    /// Like [`route`](Self::route), but addressable by name through
    /// `navigate_to_route`.
    pub fn named_route<F>(
        &mut self,
        name: &str,
        template: &str,
        title: impl Into<Title>,
        content: F,
    ) -> Result<RouteId>
    where
        F: Fn(&ParamMap) -> String + Send + Sync + 'static,
    {
        Ok(self
            .table
            .register(template, Some(name.to_string()), page(title, content))?)
    }

    /// Register a raw handler; it may redirect or decline the path.
    pub fn handler(
        &mut self,
        template: &str,
        name: Option<&str>,
        handler: Arc<dyn PageHandler>,
    ) -> Result<RouteId> {
        Ok(self
            .table
            .register(template, name.map(str::to_string), handler)?)
    }

    /// Register the catch-all fallback page.
    pub fn fallback<F>(&mut self, title: impl Into<Title>, content: F) -> Result<RouteId>
    where
        F: Fn(&ParamMap) -> String + Send + Sync + 'static,
    {
        Ok(self.table.register(WILDCARD, None, page(title, content))?)
    }

    pub fn history(&mut self, history: Arc<dyn HistoryBridge>) -> &mut Self {
        self.history = Some(history);
        self
    }

    pub fn outlet(&mut self, outlet: Arc<dyn Outlet>) -> &mut Self {
        self.outlet = Some(outlet);
        self
    }

    pub fn title_transform(&mut self, transform: TitleTransform) -> &mut Self {
        self.title_transform = Some(transform);
        self
    }

    pub fn on_navigation_started(&mut self, listener: StartedListener) -> &mut Self {
        self.started_listeners.push(listener);
        self
    }

    pub fn on_navigation_complete(&mut self, listener: CompletedListener) -> &mut Self {
        self.completed_listeners.push(listener);
        self
    }

    /// Freeze the route table and wire the engine.
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let origin = Url::parse(&self.config.origin).map_err(|e| {
            CoreError::Config(format!("Invalid origin \"{}\": {}", self.config.origin, e))
        })?;

        let history = self
            .history
            .unwrap_or_else(|| Arc::new(MemoryHistory::new()));
        let outlet = self.outlet.unwrap_or_else(|| Arc::new(RecordingOutlet::new()));

        let options = EngineOptions {
            base_path: self.config.base_path.clone(),
            max_redirect_depth: self.config.max_redirect_depth,
        };

        let mut engine = NavigationEngine::new(self.table, history, outlet, options);
        if let Some(transform) = self.title_transform {
            engine = engine.with_title_transform(transform);
        }

        for listener in self.started_listeners {
            engine.on_navigation_started(listener);
        }
        for listener in self.completed_listeners {
            engine.on_navigation_complete(listener);
        }

        tracing::info!(origin = %origin, "Router built");

        Ok(Router::new(Arc::new(engine), origin))
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
