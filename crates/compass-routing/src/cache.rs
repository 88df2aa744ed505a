//! Memoized route resolution
//!
//! Navigation revisits the same paths constantly (back/forward, link
//! cycles), so resolution outcomes are memoized by the literal path
//! string. The table is immutable once built, so entries are never
//! invalidated. The cache covers only the match/param-extraction step;
//! handler invocation is the engine's business.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::table::{Resolution, RouteTable};

#[derive(Debug, Default)]
pub struct ResolutionCache {
    resolved: RwLock<HashMap<String, Resolution>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `path` against `table`, computing at most once per
    /// distinct path string.
    pub fn get_or_resolve<T>(&self, path: &str, table: &RouteTable<T>) -> Resolution {
        if let Some(hit) = self.resolved.read().get(path) {
            tracing::trace!(path = %path, "Resolution cache hit");
            return hit.clone();
        }

        let resolution = table.resolve(path);
        self.resolved
            .write()
            .entry(path.to_string())
            .or_insert_with(|| resolution.clone());
        resolution
    }

    /// Number of distinct paths resolved so far.
    pub fn len(&self) -> usize {
        self.resolved.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_lookups_resolve_once() {
        let mut table = RouteTable::new();
        table.register("/profile/:id", None, ()).unwrap();

        let cache = ResolutionCache::new();
        let first = cache.get_or_resolve("/profile/9", &table);
        let second = cache.get_or_resolve("/profile/9", &table);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.get_or_resolve("/profile/10", &table);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_unrouted_outcomes_are_cached_too() {
        let table: RouteTable<()> = RouteTable::new();
        let cache = ResolutionCache::new();

        assert_eq!(cache.get_or_resolve("/nope", &table), Resolution::Unrouted);
        assert_eq!(cache.get_or_resolve("/nope", &table), Resolution::Unrouted);
        assert_eq!(cache.len(), 1);
    }
}
