//! Compass route matching
//!
//! Path templates are literal segments plus `:name` parameters
//! (`/profile/:id`), with `*` as the catch-all fallback template.
//! Templates are compiled once at registration; lookups scan in
//! registration order and the first match wins.

mod cache;
mod error;
mod pattern;
mod table;

pub use cache::ResolutionCache;
pub use error::RouteError;
pub use pattern::{ParamMap, Pattern, WILDCARD};
pub use table::{Resolution, RouteEntry, RouteId, RouteTable};

pub type Result<T> = std::result::Result<T, RouteError>;
