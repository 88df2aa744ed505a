//! Anchor-click classification
//!
//! Clicks on anchors whose target shares the document origin are
//! intercepted and turned into navigation requests; everything else is
//! left to the platform untouched.

use url::Url;

/// What to do with a clicked anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Same-origin: prevent the default and navigate in-app
    Internal { path: String },
    /// Cross-origin or unparsable: pass through
    External,
}

/// Classify an anchor `href` against the document origin.
///
/// Relative hrefs resolve against the origin and are therefore always
/// internal; absolute URLs are internal only when scheme, host and
/// port all match.
pub fn classify(origin: &Url, href: &str) -> LinkDisposition {
    let resolved = match origin.join(href) {
        Ok(url) => url,
        Err(_) => return LinkDisposition::External,
    };

    if resolved.origin() == origin.origin() {
        LinkDisposition::Internal {
            path: resolved.path().to_string(),
        }
    } else {
        LinkDisposition::External
    }
}
