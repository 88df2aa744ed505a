//! Navigation phase machine
//!
//! ```text
//! Idle
//!   ↓ request
//! Starting
//!   ↓ resolve
//! Resolving ──→ Redirecting ──→ Starting (bounded loop)
//!   ↓    └────→ NotFound ────→ Rendering
//! Rendering
//!   ↓
//! Completed → Idle
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// No navigation in progress
    Idle,
    /// Target path recorded, history persisted, observers notified
    Starting,
    /// Matching the path and running the owning handler
    Resolving,
    /// A handler requested a different target; the cycle restarts
    Redirecting,
    /// Nothing owns the path; the fallback page is being prepared
    NotFound,
    /// Delivering the resolved title/content pair to the outlet
    Rendering,
    /// Terminal state of one cycle, successful or failed
    Completed,
}

impl NavigationPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: NavigationPhase) -> bool {
        use NavigationPhase::*;

        match (self, target) {
            (Idle, Starting) => true,
            // Starting may short-circuit straight to Completed when the
            // requested path is already current
            (Starting, Resolving) | (Starting, Completed) => true,
            (Resolving, Rendering) | (Resolving, Redirecting) | (Resolving, NotFound) => true,
            // A failed cycle terminates from wherever it was
            (Resolving, Completed) | (Rendering, Completed) => true,
            (Rendering, Redirecting) => true,
            (Redirecting, Starting) => true,
            (NotFound, Rendering) | (NotFound, Completed) => true,
            (Completed, Idle) => true,
            // Error recovery returns to Idle from any phase
            (_, Idle) => true,
            // Same phase is always valid (no-op)
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationPhase::Idle => "idle",
            NavigationPhase::Starting => "starting",
            NavigationPhase::Resolving => "resolving",
            NavigationPhase::Redirecting => "redirecting",
            NavigationPhase::NotFound => "not-found",
            NavigationPhase::Rendering => "rendering",
            NavigationPhase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
