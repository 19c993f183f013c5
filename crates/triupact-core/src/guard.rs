//! Auth gate state machine and route protection.
//!
//! # Design
//! - `Unchecked` resolves once per mount; `Unauthenticated` is terminal for that mount.
//! - There is no authenticated-to-authenticated transition; sessions never renew.
//! - Cross-tab removals arrive as storage notifications and are authoritative.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::session::{StoredSession, TOKEN_KEY};

/// Login view.
pub const LOGIN_ROUTE: &str = "/login";
/// Login view flagged with an expiry notice.
pub const EXPIRED_LOGIN_ROUTE: &str = "/login?expired=1";
/// Landing view after a successful login.
pub const HOME_ROUTE: &str = "/dashboard";
/// Path prefixes that require a session.
pub const PROTECTED_PREFIXES: [&str; 4] = ["/dashboard", "/departments", "/data", "/users"];

/// Why the gate closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignOutReason {
    /// No session was stored.
    Missing,
    /// The session reached its expiry.
    Expired,
    /// The user signed out.
    Logout,
    /// Another tab or window removed the session.
    ExternalRemoval,
}

/// Gate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Not evaluated yet.
    Unchecked,
    /// A valid session is present.
    Authenticated {
        /// Expiry of the session that opened the gate.
        expires_at: DateTime<Utc>,
    },
    /// Access denied; the view redirects.
    Unauthenticated(SignOutReason),
}

/// Inputs that move the gate after mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardEvent {
    /// The expiry timer fired.
    ExpiryElapsed,
    /// The user signed out.
    Logout,
    /// Storage reported the token gone.
    StorageCleared,
}

/// Auth gate for one mounted protected view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthGuard {
    state: GuardState,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGuard {
    /// Fresh, unchecked gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GuardState::Unchecked,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    /// Evaluate stored session state at `now`. Only valid from `Unchecked`.
    pub fn mount(&mut self, stored: &StoredSession, now: DateTime<Utc>) -> GuardState {
        if self.state != GuardState::Unchecked {
            return self.state;
        }
        self.state = match stored {
            StoredSession::Present(token) if !token.is_expired_at(now) => {
                GuardState::Authenticated {
                    expires_at: token.expires_at,
                }
            }
            StoredSession::Present(_) | StoredSession::Invalid => {
                GuardState::Unauthenticated(SignOutReason::Expired)
            }
            StoredSession::Missing => GuardState::Unauthenticated(SignOutReason::Missing),
        };
        debug!(state = ?self.state, "auth guard mounted");
        self.state
    }

    /// Apply a post-mount event. Returns `true` when the state changed.
    pub fn apply(&mut self, event: GuardEvent) -> bool {
        let GuardState::Authenticated { .. } = self.state else {
            return false;
        };
        let reason = match event {
            GuardEvent::ExpiryElapsed => SignOutReason::Expired,
            GuardEvent::Logout => SignOutReason::Logout,
            GuardEvent::StorageCleared => SignOutReason::ExternalRemoval,
        };
        self.state = GuardState::Unauthenticated(reason);
        debug!(?reason, "auth guard closed");
        true
    }

    /// `true` while the gate is open.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, GuardState::Authenticated { .. })
    }

    /// Delay until the expiry timer should fire.
    #[must_use]
    pub fn expiry_delay(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.state {
            GuardState::Authenticated { expires_at } => {
                Some((expires_at - now).to_std().unwrap_or(Duration::ZERO))
            }
            _ => None,
        }
    }

    /// Where to send the user once the gate has closed.
    #[must_use]
    pub const fn redirect(&self) -> Option<&'static str> {
        match self.state {
            GuardState::Unauthenticated(reason) => Some(redirect_for(reason)),
            _ => None,
        }
    }
}

/// Login route for a sign-out reason.
#[must_use]
pub const fn redirect_for(reason: SignOutReason) -> &'static str {
    match reason {
        SignOutReason::Expired => EXPIRED_LOGIN_ROUTE,
        SignOutReason::Missing | SignOutReason::Logout | SignOutReason::ExternalRemoval => {
            LOGIN_ROUTE
        }
    }
}

/// Interpret a storage change notification.
///
/// `key` is `None` when the whole storage area was cleared.
#[must_use]
pub fn storage_change(key: Option<&str>, new_value: Option<&str>) -> Option<GuardEvent> {
    match key {
        None => Some(GuardEvent::StorageCleared),
        Some(TOKEN_KEY) if new_value.is_none_or(|value| value.is_empty()) => {
            Some(GuardEvent::StorageCleared)
        }
        Some(_) => None,
    }
}

/// `true` when `path` sits under a protected prefix.
#[must_use]
pub fn requires_session(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
