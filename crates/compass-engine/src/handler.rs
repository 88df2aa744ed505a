//! Route handlers
//!
//! A handler maps the extracted params of a matched route to a
//! [`HandlerOutcome`]. Handlers may be asynchronous; the engine awaits
//! them before reading the outcome.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use compass_routing::ParamMap;

use crate::error::HandlerError;
use crate::request::RequestOrigin;
use crate::response::{HandlerOutcome, PageResponse};

/// The input handed to a handler: the concrete path, the extracted
/// params and the origin of the navigation that reached it.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub path: String,
    pub params: ParamMap,
    pub origin: RequestOrigin,
}

pub type HandlerResult = std::result::Result<HandlerOutcome, HandlerError>;
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// Application-supplied route handler.
pub trait PageHandler: Send + Sync {
    fn invoke(&self, request: PageRequest) -> HandlerFuture;
}

impl<F> PageHandler for F
where
    F: Fn(PageRequest) -> HandlerFuture + Send + Sync,
{
    fn invoke(&self, request: PageRequest) -> HandlerFuture {
        self(request)
    }
}

/// A document title: a literal, or derived from the extracted params.
pub enum Title {
    Literal(String),
    Derived(Box<dyn Fn(&ParamMap) -> String + Send + Sync>),
}

impl Title {
    pub fn literal(title: impl Into<String>) -> Self {
        Title::Literal(title.into())
    }

    pub fn derived<F>(title_fn: F) -> Self
    where
        F: Fn(&ParamMap) -> String + Send + Sync + 'static,
    {
        Title::Derived(Box::new(title_fn))
    }

    pub fn resolve(&self, params: &ParamMap) -> String {
        match self {
            Title::Literal(title) => title.clone(),
            Title::Derived(title_fn) => title_fn(params),
        }
    }
}

impl From<&str> for Title {
    fn from(title: &str) -> Self {
        Title::Literal(title.to_string())
    }
}

impl From<String> for Title {
    fn from(title: String) -> Self {
        Title::Literal(title)
    }
}

/// Build a handler from a title and a synchronous content function.
pub fn page<F>(title: impl Into<Title>, content: F) -> Arc<dyn PageHandler>
where
    F: Fn(&ParamMap) -> String + Send + Sync + 'static,
{
    let title = title.into();
    Arc::new(move |request: PageRequest| {
        let mut response = PageResponse::new();
        response.set_title(title.resolve(&request.params));
        response.set_content(content(&request.params));
        let outcome = response.into_outcome();
        async move { Ok(outcome) }.boxed()
    })
}

/// Build a handler whose content is produced asynchronously.
pub fn page_async<F, Fut>(title: impl Into<Title>, content: F) -> Arc<dyn PageHandler>
where
    F: Fn(ParamMap) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = String> + Send + 'static,
{
    let title = title.into();
    Arc::new(move |request: PageRequest| {
        let title = title.resolve(&request.params);
        let content = content(request.params);
        async move {
            let mut response = PageResponse::new();
            response.set_title(title);
            response.set_content(content.await);
            Ok(response.into_outcome())
        }
        .boxed()
    })
}

/// Build a handler that always redirects to a fixed target.
pub fn redirect_to(target: impl Into<String>) -> Arc<dyn PageHandler> {
    let target = target.into();
    Arc::new(move |_request: PageRequest| {
        let target = target.clone();
        async move { Ok(HandlerOutcome::Redirect { target }) }.boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> PageRequest {
        PageRequest {
            path: "/test".to_string(),
            params: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            origin: RequestOrigin::Programmatic,
        }
    }

    #[tokio::test]
    async fn test_page_handler() {
        let handler = page("Home", |_| "H".to_string());
        let outcome = handler.invoke(request(&[])).await.unwrap();
        assert_eq!(
            outcome,
            HandlerOutcome::Rendered {
                title: "Home".to_string(),
                content: "H".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_derived_title() {
        let handler = page(
            Title::derived(|params| format!("Profile {}", params["id"])),
            |params| format!("P{}", params["id"]),
        );
        let outcome = handler.invoke(request(&[("id", "9")])).await.unwrap();
        assert_eq!(
            outcome,
            HandlerOutcome::Rendered {
                title: "Profile 9".to_string(),
                content: "P9".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_async_content() {
        let handler = page_async("Feed", |params| async move {
            format!("{} items", params.len())
        });
        let outcome = handler.invoke(request(&[("tag", "rust")])).await.unwrap();
        assert_eq!(
            outcome,
            HandlerOutcome::Rendered {
                title: "Feed".to_string(),
                content: "1 items".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_to() {
        let handler = redirect_to("/login");
        let outcome = handler.invoke(request(&[])).await.unwrap();
        assert_eq!(
            outcome,
            HandlerOutcome::Redirect {
                target: "/login".to_string(),
            }
        );
    }
}
