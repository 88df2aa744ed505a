//! Navigation lifecycle engine
//!
//! One cycle runs started → resolving → rendering → completed, with
//! redirect and not-found recovery in between. The engine serializes
//! concurrent requests: an in-flight navigation runs to completion and
//! queued requests collapse to the most recent target, so rapid
//! repeated clicks land on the last one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use compass_routing::{ParamMap, Resolution, ResolutionCache, RouteId, RouteTable};

use crate::error::EngineError;
use crate::events::{CompletedListener, EventListeners, NavCompleted, NavOutcome, NavStarted, StartedListener};
use crate::handler::{HandlerResult, PageHandler, PageRequest};
use crate::history::HistoryBridge;
use crate::outlet::Outlet;
use crate::phase::NavigationPhase;
use crate::request::{NavRequest, RequestOrigin};
use crate::response::{HandlerOutcome, PageView};

const NOT_FOUND_TITLE: &str = "Page not found";
const NOT_FOUND_ROUTE: &str = "not-found";
const ERROR_TITLE: &str = "Navigation error";
const ERROR_CONTENT: &str = "The page could not be displayed.";

pub type TitleTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Engine-level options. The facade crate layers its serde config on
/// top of these.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Prefix stripped from incoming paths and prepended to history
    /// entries, as in "example.com/BASE_PATH/home".
    pub base_path: String,
    /// Bound on redirect chains; past it the navigation fails.
    pub max_redirect_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_redirect_depth: 10,
        }
    }
}

/// Summary of the page currently on screen. Content is not retained;
/// the outlet owns it once rendered.
struct CurrentPage {
    path: String,
    title: String,
    route_name: String,
    params: ParamMap,
}

#[derive(Default)]
struct QueueState {
    in_flight: bool,
    pending: Option<NavRequest>,
}

pub struct NavigationEngine {
    table: RouteTable<Arc<dyn PageHandler>>,
    cache: ResolutionCache,
    history: Arc<dyn HistoryBridge>,
    outlet: Arc<dyn Outlet>,
    listeners: EventListeners,
    options: EngineOptions,
    title_transform: Option<TitleTransform>,
    current: Mutex<Option<CurrentPage>>,
    queue: Mutex<QueueState>,
    phase: Mutex<NavigationPhase>,
    started: AtomicBool,
}

impl NavigationEngine {
    pub fn new(
        table: RouteTable<Arc<dyn PageHandler>>,
        history: Arc<dyn HistoryBridge>,
        outlet: Arc<dyn Outlet>,
        options: EngineOptions,
    ) -> Self {
        Self {
            table,
            cache: ResolutionCache::new(),
            history,
            outlet,
            listeners: EventListeners::new(),
            options,
            title_transform: None,
            current: Mutex::new(None),
            queue: Mutex::new(QueueState::default()),
            phase: Mutex::new(NavigationPhase::Idle),
            started: AtomicBool::new(false),
        }
    }

    /// Apply a transform to every title before it reaches the outlet.
    pub fn with_title_transform(mut self, transform: TitleTransform) -> Self {
        self.title_transform = Some(transform);
        self
    }

    pub fn on_navigation_started(&self, listener: StartedListener) {
        self.listeners.on_started(listener);
    }

    pub fn on_navigation_complete(&self, listener: CompletedListener) {
        self.listeners.on_completed(listener);
    }

    /// The normalized path of the page currently on screen.
    pub fn current_path(&self) -> Option<String> {
        self.current.lock().as_ref().map(|page| page.path.clone())
    }

    /// Build a concrete path for a named route, for programmatic
    /// navigation by name.
    pub fn path_for(&self, name: &str, params: &ParamMap) -> compass_routing::Result<String> {
        self.table.path_for(name, params)
    }

    pub fn phase(&self) -> NavigationPhase {
        *self.phase.lock()
    }

    /// One-time initial navigation to the bridge's current path.
    ///
    /// Guarded by an initialization flag: attaching the engine twice
    /// must not produce a second page-load cycle.
    pub async fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!("Engine already started; ignoring");
            return;
        }

        let path = self.history.current_path();
        self.submit(NavRequest::page_load(path)).await;
    }

    /// Navigate programmatically.
    pub async fn navigate(&self, path: impl Into<String>) {
        self.submit(NavRequest::programmatic(path)).await;
    }

    /// Translate a browser back/forward event into a navigation. The
    /// address already reflects the entry, so nothing is pushed.
    pub async fn pop_state(&self) {
        let path = self.history.current_path();
        self.submit(NavRequest::history_pop(path)).await;
    }

    /// Enqueue a navigation request.
    ///
    /// If a navigation is in flight the request is parked; parked
    /// requests collapse to the most recent one and run once the
    /// current cycle reaches a terminal state.
    pub async fn submit(&self, request: NavRequest) {
        {
            let mut queue = self.queue.lock();
            if queue.in_flight {
                if let Some(dropped) = queue.pending.replace(request) {
                    tracing::debug!(path = %dropped.path, "Collapsed queued navigation");
                }
                return;
            }
            queue.in_flight = true;
        }

        let mut next = Some(request);
        while let Some(request) = next {
            self.run_cycle(request).await;

            let mut queue = self.queue.lock();
            next = queue.pending.take();
            if next.is_none() {
                queue.in_flight = false;
            }
        }
    }

    async fn run_cycle(&self, request: NavRequest) {
        let origin = request.origin;
        let mut path = self.normalize(&request.path);
        let mut hops = 0usize;

        loop {
            self.set_phase(NavigationPhase::Starting);

            // Redundant navigation: short-circuit to Completed without
            // re-rendering.
            let repeat = {
                let current = self.current.lock();
                current
                    .as_ref()
                    .filter(|page| page.path == path)
                    .map(|page| NavOutcome::Rendered {
                        title: page.title.clone(),
                        route_name: page.route_name.clone(),
                        params: page.params.clone(),
                    })
            };
            if let Some(outcome) = repeat {
                tracing::debug!(path = %path, "Already on requested path");
                self.set_phase(NavigationPhase::Completed);
                self.listeners
                    .emit_completed(&NavCompleted { path, outcome })
                    .await;
                self.set_phase(NavigationPhase::Idle);
                return;
            }

            // Persist the address up front so back/forward works even
            // while rendering is still pending. History-pop and
            // page-load targets already match the bridge, so the
            // equality guard keeps them push-free.
            self.push_history(&path);

            let event = NavStarted {
                path: path.clone(),
                origin,
            };
            tracing::info!(path = %path, origin = %origin, "Navigation started");
            if let Err(source) = self.listeners.emit_started(&event).await {
                return self
                    .fail(
                        path.clone(),
                        EngineError::Observer {
                            path: path.clone(),
                            source,
                        },
                    )
                    .await;
            }

            self.set_phase(NavigationPhase::Resolving);
            let resolution = self.cache.get_or_resolve(&path, &self.table);
            let (invoked, route_name, params, was_fallback) = match resolution {
                Resolution::Matched {
                    id,
                    route_name,
                    params,
                } => {
                    let invoked = self.invoke(id, &path, params.clone(), origin).await;
                    (invoked, route_name, params, false)
                }
                Resolution::Fallback { id, route_name } => {
                    let invoked = self.invoke(id, &path, ParamMap::new(), origin).await;
                    (invoked, route_name, ParamMap::new(), true)
                }
                Resolution::Unrouted => (
                    Ok(HandlerOutcome::NotFound),
                    NOT_FOUND_ROUTE.to_string(),
                    ParamMap::new(),
                    true,
                ),
            };

            let outcome = match invoked {
                Ok(outcome) => outcome,
                Err(source) => {
                    return self
                        .fail(
                            path.clone(),
                            EngineError::Handler {
                                path: path.clone(),
                                source,
                            },
                        )
                        .await;
                }
            };

            let view = match outcome {
                HandlerOutcome::Redirect { target } => {
                    hops += 1;
                    if hops > self.options.max_redirect_depth {
                        return self
                            .fail(
                                path.clone(),
                                EngineError::RedirectLoop {
                                    path: path.clone(),
                                    limit: self.options.max_redirect_depth,
                                },
                            )
                            .await;
                    }

                    self.set_phase(NavigationPhase::Redirecting);
                    tracing::info!(from = %path, to = %target, "Redirecting");
                    path = self.normalize(&target);
                    continue;
                }
                HandlerOutcome::Rendered { title, content } => PageView {
                    path: path.clone(),
                    route_name,
                    title,
                    content,
                    params,
                },
                HandlerOutcome::NotFound => {
                    self.set_phase(NavigationPhase::NotFound);
                    match self.not_found_view(&path, origin, was_fallback).await {
                        Ok(view) => view,
                        Err(source) => {
                            return self
                                .fail(
                                    path.clone(),
                                    EngineError::Handler {
                                        path: path.clone(),
                                        source,
                                    },
                                )
                                .await;
                        }
                    }
                }
            };

            self.set_phase(NavigationPhase::Rendering);
            self.render(&view.title, &view.content);

            *self.current.lock() = Some(CurrentPage {
                path: view.path.clone(),
                title: view.title.clone(),
                route_name: view.route_name.clone(),
                params: view.params.clone(),
            });

            self.set_phase(NavigationPhase::Completed);
            tracing::info!(path = %view.path, title = %view.title, "Navigation completed");
            self.listeners
                .emit_completed(&NavCompleted {
                    path: view.path,
                    outcome: NavOutcome::Rendered {
                        title: view.title,
                        route_name: view.route_name,
                        params: view.params,
                    },
                })
                .await;
            self.set_phase(NavigationPhase::Idle);
            return;
        }
    }

    /// Build the page shown when nothing owns the path. Prefers the
    /// registered fallback handler; the built-in page covers a missing
    /// or declining fallback.
    async fn not_found_view(
        &self,
        path: &str,
        origin: RequestOrigin,
        was_fallback: bool,
    ) -> Result<PageView, crate::error::HandlerError> {
        if !was_fallback {
            if let Some(id) = self.table.fallback() {
                let route_name = self.table.entry(id).name.clone();
                let outcome = self.invoke(id, path, ParamMap::new(), origin).await?;
                if let HandlerOutcome::Rendered { title, content } = outcome {
                    return Ok(PageView {
                        path: path.to_string(),
                        route_name,
                        title,
                        content,
                        params: ParamMap::new(),
                    });
                }
                tracing::warn!(path = %path, "Fallback handler declined; using built-in page");
            }
        }

        Ok(PageView {
            path: path.to_string(),
            route_name: NOT_FOUND_ROUTE.to_string(),
            title: NOT_FOUND_TITLE.to_string(),
            content: NOT_FOUND_TITLE.to_string(),
            params: ParamMap::new(),
        })
    }

    /// Terminal failure: report through the completion channel and
    /// return to Idle with the previous page still visible. Redirect
    /// loops additionally render a generic error page so the cycle
    /// always lands somewhere.
    async fn fail(&self, path: String, error: EngineError) {
        tracing::warn!(path = %path, error = %error, "Navigation failed");

        if matches!(error, EngineError::RedirectLoop { .. }) {
            self.set_phase(NavigationPhase::Rendering);
            self.render(ERROR_TITLE, ERROR_CONTENT);
            *self.current.lock() = None;
        }

        self.set_phase(NavigationPhase::Completed);
        self.listeners
            .emit_completed(&NavCompleted {
                path,
                outcome: NavOutcome::Failed {
                    error: error.to_string(),
                },
            })
            .await;
        self.set_phase(NavigationPhase::Idle);
    }

    async fn invoke(
        &self,
        id: RouteId,
        path: &str,
        params: ParamMap,
        origin: RequestOrigin,
    ) -> HandlerResult {
        let request = PageRequest {
            path: path.to_string(),
            params,
            origin,
        };
        self.table.payload(id).invoke(request).await
    }

    fn render(&self, title: &str, content: &str) {
        let title = match &self.title_transform {
            Some(transform) => transform(title),
            None => title.to_string(),
        };
        self.outlet.render(&title, content);
    }

    /// Strip the base path, query and fragment. The result always
    /// starts with `/`; the query never participates in resolution or
    /// cache keys.
    fn normalize(&self, raw: &str) -> String {
        let mut path = raw;
        if !self.options.base_path.is_empty() {
            if let Some(stripped) = path.strip_prefix(self.options.base_path.as_str()) {
                path = stripped;
            }
        }

        let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
        let path = &path[..end];

        if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        }
    }

    fn push_history(&self, path: &str) {
        let full = self.full_path(path);
        if self.history.current_path() != full {
            self.history.push_path(&full);
        }
    }

    /// Re-attach the base path. The bare prefix stands for the root so
    /// that `normalize` and `full_path` invert each other.
    fn full_path(&self, path: &str) -> String {
        if self.options.base_path.is_empty() {
            path.to_string()
        } else if path == "/" {
            self.options.base_path.clone()
        } else {
            format!("{}{}", self.options.base_path, path)
        }
    }

    fn set_phase(&self, next: NavigationPhase) {
        let mut phase = self.phase.lock();
        debug_assert!(
            phase.can_transition_to(next),
            "invalid phase transition {} -> {}",
            phase,
            next
        );
        tracing::debug!(from = %*phase, to = %next, "Navigation phase");
        *phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{page, redirect_to, HandlerFuture, Title};
    use crate::history::MemoryHistory;
    use crate::outlet::RecordingOutlet;
    use compass_routing::WILDCARD;
    use futures_util::FutureExt;
    use parking_lot::RwLock;

    struct Fixture {
        engine: NavigationEngine,
        history: Arc<MemoryHistory>,
        outlet: Arc<RecordingOutlet>,
        completed: Arc<RwLock<Vec<NavCompleted>>>,
    }

    fn fixture(build: impl FnOnce(&mut RouteTable<Arc<dyn PageHandler>>)) -> Fixture {
        let mut table = RouteTable::new();
        build(&mut table);

        let history = Arc::new(MemoryHistory::new());
        let outlet = Arc::new(RecordingOutlet::new());
        let engine = NavigationEngine::new(
            table,
            Arc::clone(&history) as Arc<dyn HistoryBridge>,
            Arc::clone(&outlet) as Arc<dyn Outlet>,
            EngineOptions::default(),
        );

        let completed = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&completed);
        engine.on_navigation_complete(Arc::new(move |event| {
            let sink = Arc::clone(&sink);
            async move {
                sink.write().push(event);
                Ok(())
            }
            .boxed()
        }));

        Fixture {
            engine,
            history,
            outlet,
            completed,
        }
    }

    fn standard_routes(table: &mut RouteTable<Arc<dyn PageHandler>>) {
        table
            .register("/", Some("home".to_string()), page("Home", |_| "H".to_string()))
            .unwrap();
        table
            .register(
                "/profile/:id",
                Some("profile".to_string()),
                page(
                    Title::derived(|params| format!("Profile {}", params["id"])),
                    |params| format!("P{}", params["id"]),
                ),
            )
            .unwrap();
        table
            .register(WILDCARD, None, page("Page not found", |_| "missing".to_string()))
            .unwrap();
    }

    #[tokio::test]
    async fn test_navigate_renders_and_pushes_history() {
        let fx = fixture(standard_routes);

        fx.engine.navigate("/profile/9").await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Profile 9"));
        assert_eq!(fx.outlet.content().as_deref(), Some("P9"));
        assert_eq!(fx.history.current_path(), "/profile/9");
        assert_eq!(fx.engine.current_path().as_deref(), Some("/profile/9"));
        assert_eq!(fx.engine.phase(), NavigationPhase::Idle);
    }

    #[tokio::test]
    async fn test_query_and_fragment_are_stripped() {
        let fx = fixture(standard_routes);

        fx.engine.navigate("/profile/9?tab=posts#top").await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Profile 9"));
        assert_eq!(fx.engine.current_path().as_deref(), Some("/profile/9"));
    }

    #[tokio::test]
    async fn test_unmatched_path_renders_fallback() {
        let fx = fixture(standard_routes);

        fx.engine.navigate("/nope").await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Page not found"));
        let completed = fx.completed.read();
        match &completed[0].outcome {
            NavOutcome::Rendered { params, .. } => assert!(params.is_empty()),
            other => panic!("Expected rendered outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_builtin_page_without_fallback() {
        let fx = fixture(|table| {
            table
                .register("/", None, page("Home", |_| "H".to_string()))
                .unwrap();
        });

        fx.engine.navigate("/nope").await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Page not found"));
        assert_eq!(fx.outlet.render_count(), 1);
    }

    #[tokio::test]
    async fn test_redirect_lands_on_target() {
        let fx = fixture(|table| {
            standard_routes(table);
            table
                .register("/old-home", None, redirect_to("/"))
                .unwrap();
        });

        fx.engine.navigate("/old-home").await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Home"));
        // The address reflects the redirect target, not the source
        assert_eq!(fx.history.current_path(), "/");
        assert_eq!(fx.engine.current_path().as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_redirect_loop_is_bounded() {
        let fx = fixture(|table| {
            table.register("/a", None, redirect_to("/b")).unwrap();
            table.register("/b", None, redirect_to("/a")).unwrap();
        });

        fx.engine.navigate("/a").await;

        // Terminal state: a generic error page, not a hang
        assert_eq!(fx.outlet.title().as_deref(), Some("Navigation error"));
        assert_eq!(fx.engine.phase(), NavigationPhase::Idle);
        let completed = fx.completed.read();
        match &completed[0].outcome {
            NavOutcome::Failed { error } => assert!(error.contains("Redirect chain")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handler_error_keeps_previous_page() {
        let fx = fixture(|table| {
            standard_routes(table);
            table
                .register(
                    "/boom",
                    None,
                    Arc::new(|_request: PageRequest| -> HandlerFuture {
                        async { Err("database offline".into()) }.boxed()
                    }) as Arc<dyn PageHandler>,
                )
                .unwrap();
        });

        fx.engine.navigate("/").await;
        fx.engine.navigate("/boom").await;

        // The previous page stays visible
        assert_eq!(fx.outlet.title().as_deref(), Some("Home"));
        assert_eq!(fx.outlet.render_count(), 1);
        let completed = fx.completed.read();
        match &completed[1].outcome {
            NavOutcome::Failed { error } => assert!(error.contains("database offline")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_redundant_navigation_short_circuits() {
        let fx = fixture(standard_routes);

        fx.engine.navigate("/profile/9").await;
        fx.engine.navigate("/profile/9").await;

        assert_eq!(fx.outlet.render_count(), 1);
        // Both cycles still reported completion
        assert_eq!(fx.completed.read().len(), 2);
    }

    #[tokio::test]
    async fn test_start_runs_once() {
        let fx = fixture(standard_routes);

        fx.engine.start().await;
        fx.engine.start().await;

        assert_eq!(fx.outlet.render_count(), 1);
        assert_eq!(fx.outlet.title().as_deref(), Some("Home"));
    }

    #[tokio::test]
    async fn test_pop_state_does_not_push() {
        let fx = fixture(standard_routes);

        fx.engine.navigate("/profile/1").await;
        fx.engine.navigate("/profile/2").await;
        assert_eq!(fx.history.len(), 3);

        fx.history.back();
        fx.engine.pop_state().await;

        assert_eq!(fx.outlet.title().as_deref(), Some("Profile 1"));
        // Back/forward never grows the history log
        assert_eq!(fx.history.len(), 3);
    }

    #[tokio::test]
    async fn test_base_path_round_trip() {
        let mut table = RouteTable::new();
        standard_routes(&mut table);

        let history = Arc::new(MemoryHistory::with_initial("/app"));
        let outlet = Arc::new(RecordingOutlet::new());
        let engine = NavigationEngine::new(
            table,
            Arc::clone(&history) as Arc<dyn HistoryBridge>,
            Arc::clone(&outlet) as Arc<dyn Outlet>,
            EngineOptions {
                base_path: "/app".to_string(),
                ..EngineOptions::default()
            },
        );

        engine.navigate("/profile/3").await;

        assert_eq!(outlet.title().as_deref(), Some("Profile 3"));
        // History carries the full prefixed path
        assert_eq!(history.current_path(), "/app/profile/3");

        history.back();
        engine.pop_state().await;
        assert_eq!(engine.current_path().as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_title_transform_applies_at_the_outlet() {
        let mut table = RouteTable::new();
        standard_routes(&mut table);

        let history = Arc::new(MemoryHistory::new());
        let outlet = Arc::new(RecordingOutlet::new());
        let engine = NavigationEngine::new(
            table,
            Arc::clone(&history) as Arc<dyn HistoryBridge>,
            Arc::clone(&outlet) as Arc<dyn Outlet>,
            EngineOptions::default(),
        )
        .with_title_transform(Box::new(|title| format!("{} | Compass", title)));

        engine.navigate("/profile/9").await;

        assert_eq!(outlet.title().as_deref(), Some("Profile 9 | Compass"));
    }
}
