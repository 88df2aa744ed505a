//! Rendering boundary

use parking_lot::Mutex;

/// The surface a completed navigation renders into.
///
/// The engine calls `render` exactly once per completed navigation,
/// always with a fully resolved title/content pair. Nothing else in
/// the system writes to the outlet.
pub trait Outlet: Send + Sync {
    fn render(&self, title: &str, content: &str);
}

/// Outlet that retains what was rendered, for tests and headless use.
#[derive(Debug, Default)]
pub struct RecordingOutlet {
    rendered: Mutex<Vec<(String, String)>>,
}

impl RecordingOutlet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent (title, content) pair, if anything has been
    /// rendered yet.
    pub fn current(&self) -> Option<(String, String)> {
        self.rendered.lock().last().cloned()
    }

    pub fn title(&self) -> Option<String> {
        self.current().map(|(title, _)| title)
    }

    pub fn content(&self) -> Option<String> {
        self.current().map(|(_, content)| content)
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().len()
    }
}

impl Outlet for RecordingOutlet {
    fn render(&self, title: &str, content: &str) {
        tracing::debug!(title = %title, "Rendered page");
        self.rendered
            .lock()
            .push((title.to_string(), content.to_string()));
    }
}
