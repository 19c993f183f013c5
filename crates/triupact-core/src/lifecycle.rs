//! Fetch sequencing for views that outlive individual requests.
//!
//! # Design
//! - Each fetch takes a ticket; only the newest ticket may apply its result.
//! - Closing the scope (unmount) invalidates every outstanding ticket.
//! - Single-threaded by construction, matching the UI event loop.

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

#[derive(Debug, Default)]
struct ScopeInner {
    generation: Cell<u64>,
    closed: Cell<bool>,
}

/// Owner-scoped source of fetch tickets.
#[derive(Clone, Debug, Default)]
pub struct FetchScope {
    inner: Rc<ScopeInner>,
}

impl PartialEq for FetchScope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FetchScope {
    /// Open scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes all earlier ones.
    #[must_use]
    pub fn begin(&self) -> FetchTicket {
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);
        FetchTicket {
            inner: Rc::clone(&self.inner),
            generation,
        }
    }

    /// Invalidate all tickets; further tickets are born stale.
    pub fn close(&self) {
        self.inner.closed.set(true);
    }

    /// `true` after [`FetchScope::close`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }
}

/// Permission to apply one fetch result.
#[derive(Debug)]
pub struct FetchTicket {
    inner: Rc<ScopeInner>,
    generation: u64,
}

impl FetchTicket {
    /// `true` while no newer ticket exists and the scope is open.
    #[must_use]
    pub fn is_current(&self) -> bool {
        !self.inner.closed.get() && self.inner.generation.get() == self.generation
    }

    /// Run `apply` only when the ticket is still current.
    pub fn apply<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_current() {
            apply(value);
            true
        } else {
            warn!(generation = self.generation, "dropping stale fetch result");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let scope = FetchScope::new();
        let first = scope.begin();
        let second = scope.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn closing_scope_drops_late_results() {
        let scope = FetchScope::new();
        let ticket = scope.begin();
        scope.close();
        let mut applied = Vec::new();
        assert!(!ticket.apply(1, |value| applied.push(value)));
        assert!(applied.is_empty());
        assert!(scope.is_closed());
        assert!(!scope.begin().is_current());
    }

    #[test]
    fn slow_early_response_cannot_overwrite_newer_state() {
        let scope = FetchScope::new();
        let slow = scope.begin();
        let fast = scope.begin();
        let mut state = "initial";
        assert_eq!(state, "initial");
        fast.apply("fresh", |value| state = value);
        slow.apply("stale", |value| state = value);
        assert_eq!(state, "fresh");
    }

    #[test]
    fn clones_share_generation() {
        let scope = FetchScope::new();
        let clone = scope.clone();
        assert_eq!(scope, clone);
        let ticket = scope.begin();
        let _newer = clone.begin();
        assert!(!ticket.is_current());
    }
}
