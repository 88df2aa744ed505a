//! History boundary
//!
//! The engine never talks to the browser history API directly; it goes
//! through [`HistoryBridge`]. [`MemoryHistory`] stands in for the real
//! thing in tests and headless embeddings.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Supplies the current path and persists newly navigated paths.
///
/// Pop events (browser back/forward) carry no payload; the embedder
/// calls the engine's `pop_state`, which re-reads `current_path`.
pub trait HistoryBridge: Send + Sync {
    fn current_path(&self) -> String;
    fn push_path(&self, path: &str);
}

/// One recorded visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryVisit {
    pub path: String,
    pub visited_at: DateTime<Utc>,
}

impl HistoryVisit {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            visited_at: Utc::now(),
        }
    }
}

struct VisitLog {
    visits: Vec<HistoryVisit>,
    cursor: usize,
}

/// In-memory history with a cursor.
///
/// `back`/`forward` move the cursor without touching the log, the way
/// browser history does; pushing while the cursor sits mid-log drops
/// the forward entries.
pub struct MemoryHistory {
    inner: Mutex<VisitLog>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_initial("/")
    }

    pub fn with_initial(path: &str) -> Self {
        Self {
            inner: Mutex::new(VisitLog {
                visits: vec![HistoryVisit::new(path)],
                cursor: 0,
            }),
        }
    }

    /// Move back one entry, returning the new current path.
    pub fn back(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        if inner.cursor == 0 {
            return None;
        }
        inner.cursor -= 1;
        Some(inner.visits[inner.cursor].path.clone())
    }

    /// Move forward one entry, returning the new current path.
    pub fn forward(&self) -> Option<String> {
        let mut inner = self.inner.lock();
        if inner.cursor + 1 >= inner.visits.len() {
            return None;
        }
        inner.cursor += 1;
        Some(inner.visits[inner.cursor].path.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().visits.len()
    }

    pub fn is_empty(&self) -> bool {
        // The log always holds at least the initial entry
        false
    }

    /// Snapshot of the visit log, oldest first.
    pub fn visits(&self) -> Vec<HistoryVisit> {
        self.inner.lock().visits.clone()
    }

    /// Serialize the visit log for session restore.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.inner.lock().visits)
    }

    /// Replace the visit log from a previous export. The cursor lands
    /// on the newest entry; an empty log resets to `/`.
    pub fn restore_json(&self, json: &str) -> serde_json::Result<()> {
        let visits: Vec<HistoryVisit> = serde_json::from_str(json)?;
        let mut inner = self.inner.lock();
        if visits.is_empty() {
            inner.visits = vec![HistoryVisit::new("/")];
        } else {
            inner.visits = visits;
        }
        inner.cursor = inner.visits.len() - 1;
        Ok(())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBridge for MemoryHistory {
    fn current_path(&self) -> String {
        let inner = self.inner.lock();
        inner.visits[inner.cursor].path.clone()
    }

    fn push_path(&self, path: &str) {
        let mut inner = self.inner.lock();
        let keep = inner.cursor + 1;
        inner.visits.truncate(keep);
        inner.visits.push(HistoryVisit::new(path));
        inner.cursor = inner.visits.len() - 1;

        tracing::debug!(path = %path, entries = inner.visits.len(), "Pushed history entry");
    }
}
