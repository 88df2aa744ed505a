//! Handler responses and rendered pages

use compass_routing::ParamMap;
use serde::{Deserialize, Serialize};

/// What a handler instructs the engine to do next.
///
/// Redirects and not-found are ordinary values here, not errors; they
/// are consumed entirely inside the navigation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// A fully produced page
    Rendered { title: String, content: String },
    /// Abandon this attempt and restart the cycle at another path
    Redirect { target: String },
    /// Decline the path; the fallback page is rendered instead
    NotFound,
}

/// Shorthand for a redirect outcome, for use inside handlers.
pub fn redirect(target: impl Into<String>) -> HandlerOutcome {
    HandlerOutcome::Redirect {
        target: target.into(),
    }
}

/// Accumulates the title/content pair while a handler runs.
///
/// Mutable until the handler returns; pieces left unset resolve to
/// empty strings so the outlet always receives a complete pair.
#[derive(Debug, Default)]
pub struct PageResponse {
    title: Option<String>,
    content: Option<String>,
}

impl PageResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = Some(content.into());
        self
    }

    pub fn into_outcome(self) -> HandlerOutcome {
        HandlerOutcome::Rendered {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        }
    }
}

/// The product of one completed navigation, handed to the outlet and
/// to completion observers; the engine keeps only a lightweight
/// summary of it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub path: String,
    pub route_name: String,
    pub title: String,
    pub content: String,
    pub params: ParamMap,
}
