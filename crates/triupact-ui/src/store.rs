//! App-wide yewdux store.
//!
//! # Design
//! - The auth gate is shared so the shell's sign-out and the guard see one state.
//! - Every protected mount re-evaluates the stored session from `Unchecked`.

use chrono::{DateTime, Utc};
use triupact_core::guard::{AuthGuard, GuardEvent, GuardState};
use triupact_core::session::StoredSession;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Authentication gate state.
    pub auth: AuthSlice,
}

/// Shared authentication state for the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSlice {
    /// Gate for the currently mounted protected view.
    pub guard: AuthGuard,
}

impl AuthSlice {
    /// Start a fresh gate and evaluate `stored` at `now`.
    pub fn remount(&mut self, stored: &StoredSession, now: DateTime<Utc>) -> GuardState {
        self.guard = AuthGuard::new();
        self.guard.mount(stored, now)
    }

    /// Apply a post-mount event; returns the redirect target when the gate closed.
    pub fn close(&mut self, event: GuardEvent) -> Option<&'static str> {
        if self.guard.apply(event) {
            self.guard.redirect()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use triupact_core::guard::SignOutReason;
    use triupact_core::session::SessionToken;

    #[test]
    fn remount_starts_from_unchecked_after_logout() {
        let now = Utc::now();
        let stored = StoredSession::Present(SessionToken::new("tok", now + TimeDelta::hours(1)));
        let mut auth = AuthSlice::default();
        assert!(matches!(
            auth.remount(&stored, now),
            GuardState::Authenticated { .. }
        ));
        assert_eq!(auth.close(GuardEvent::Logout), Some("/login"));
        assert_eq!(
            auth.guard.state(),
            GuardState::Unauthenticated(SignOutReason::Logout)
        );

        assert!(matches!(
            auth.remount(&stored, now),
            GuardState::Authenticated { .. }
        ));
    }

    #[test]
    fn expiry_redirects_with_notice_once() {
        let now = Utc::now();
        let stored = StoredSession::Present(SessionToken::new("tok", now + TimeDelta::seconds(1)));
        let mut store = AppStore::default();
        store.auth.remount(&stored, now);
        assert_eq!(
            store.auth.close(GuardEvent::ExpiryElapsed),
            Some("/login?expired=1")
        );
        assert_eq!(store.auth.close(GuardEvent::StorageCleared), None);
    }

    #[test]
    fn missing_session_never_authenticates() {
        let mut auth = AuthSlice::default();
        assert_eq!(
            auth.remount(&StoredSession::Missing, Utc::now()),
            GuardState::Unauthenticated(SignOutReason::Missing)
        );
        assert_eq!(auth.guard.redirect(), Some("/login"));
    }
}
