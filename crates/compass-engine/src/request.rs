//! Navigation requests

use serde::{Deserialize, Serialize};

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestOrigin {
    /// The initial navigation when the engine starts
    PageLoad,
    /// Browser back/forward; the address already reflects the entry
    HistoryPop,
    /// A `navigate`/`navigate_to_route` call
    Programmatic,
    /// An intercepted same-origin anchor click
    LinkClick,
}

impl RequestOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOrigin::PageLoad => "page-load",
            RequestOrigin::HistoryPop => "history-pop",
            RequestOrigin::Programmatic => "programmatic",
            RequestOrigin::LinkClick => "link-click",
        }
    }
}

impl std::fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attempt to move the UI to a target path. Created when a
/// navigation is triggered, consumed once by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavRequest {
    pub path: String,
    pub origin: RequestOrigin,
}

impl NavRequest {
    pub fn new(path: impl Into<String>, origin: RequestOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }

    pub fn page_load(path: impl Into<String>) -> Self {
        Self::new(path, RequestOrigin::PageLoad)
    }

    pub fn history_pop(path: impl Into<String>) -> Self {
        Self::new(path, RequestOrigin::HistoryPop)
    }

    pub fn programmatic(path: impl Into<String>) -> Self {
        Self::new(path, RequestOrigin::Programmatic)
    }

    pub fn link_click(path: impl Into<String>) -> Self {
        Self::new(path, RequestOrigin::LinkClick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_labels() {
        assert_eq!(RequestOrigin::PageLoad.as_str(), "page-load");
        assert_eq!(RequestOrigin::HistoryPop.to_string(), "history-pop");
    }

    #[test]
    fn test_constructors() {
        let request = NavRequest::programmatic("/profile/7");
        assert_eq!(request.path, "/profile/7");
        assert_eq!(request.origin, RequestOrigin::Programmatic);
    }
}
