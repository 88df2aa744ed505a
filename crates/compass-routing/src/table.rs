//! Ordered route table with first-match resolution
//!
//! Entries are matched in registration order; the first pattern that
//! accepts the path wins. One wildcard entry may be registered as the
//! designated fallback, consulted only when nothing else matches.

use std::collections::HashMap;

use crate::error::RouteError;
use crate::pattern::{ParamMap, Pattern};
use crate::Result;

/// Opaque handle to a registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(u32);

impl RouteId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct RouteEntry<T> {
    pub name: String,
    pub pattern: Pattern,
    pub payload: T,
}

/// The outcome of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registered pattern accepted the path.
    Matched {
        id: RouteId,
        route_name: String,
        params: ParamMap,
    },
    /// Nothing matched; the designated fallback owns the path.
    Fallback { id: RouteId, route_name: String },
    /// Nothing matched and no fallback was ever registered.
    Unrouted,
}

pub struct RouteTable<T> {
    entries: Vec<RouteEntry<T>>,
    /// name -> RouteId for reverse lookup; fallback entries excluded.
    name_index: HashMap<String, RouteId>,
    fallback: Option<RouteId>,
}

impl<T> RouteTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            name_index: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a route. Unnamed routes get a generated `route-N` name.
    ///
    /// A wildcard template registers the fallback instead of an
    /// ordered entry; registering a second fallback replaces the first.
    pub fn register(&mut self, template: &str, name: Option<String>, payload: T) -> Result<RouteId> {
        let pattern = Pattern::compile(template)?;

        let name = match name {
            Some(name) => {
                if self.name_index.contains_key(&name) {
                    return Err(RouteError::DuplicateName(name));
                }
                name
            }
            None => format!("route-{}", self.entries.len()),
        };

        let id = RouteId(self.entries.len() as u32);

        if pattern.is_wildcard() {
            if let Some(previous) = self.fallback {
                tracing::warn!(
                    replaced = %self.entries[previous.index()].name,
                    "Replacing fallback route"
                );
            }
            self.fallback = Some(id);
        } else {
            self.name_index.insert(name.clone(), id);
        }

        self.entries.push(RouteEntry {
            name,
            pattern,
            payload,
        });

        Ok(id)
    }

    /// Find the first registered entry matching the path.
    pub fn resolve(&self, path: &str) -> Resolution {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.pattern.is_wildcard() {
                continue;
            }
            if let Some(params) = entry.pattern.matches(path) {
                return Resolution::Matched {
                    id: RouteId(index as u32),
                    route_name: entry.name.clone(),
                    params,
                };
            }
        }

        match self.fallback {
            Some(id) => Resolution::Fallback {
                id,
                route_name: self.entries[id.index()].name.clone(),
            },
            None => Resolution::Unrouted,
        }
    }

    /// Build a concrete path for a named route from the given params.
    pub fn path_for(&self, name: &str, params: &ParamMap) -> Result<String> {
        let id = self
            .name_index
            .get(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        self.entries[id.index()].pattern.expand(params)
    }

    pub fn entry(&self, id: RouteId) -> &RouteEntry<T> {
        &self.entries[id.index()]
    }

    pub fn payload(&self, id: RouteId) -> &T {
        &self.entries[id.index()].payload
    }

    pub fn fallback(&self) -> Option<RouteId> {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
