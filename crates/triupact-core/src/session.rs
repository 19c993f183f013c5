//! Session tokens, their persisted form, and the login contract.
//!
//! # Design
//! - A session is an opaque token plus an absolute expiry; nothing renews it.
//! - Persistence goes through `KeyValueStore` under the `token` and `token_exp` keys.
//! - Half-written or unparseable state is treated as signed out and cleared.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};
use triupact_api_models::{LoginRequest, SessionPayload};

use crate::error::{SessionError, StorageError};
use crate::storage::KeyValueStore;

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the expiry instant, in epoch milliseconds.
pub const TOKEN_EXPIRY_KEY: &str = "token_exp";
/// Login endpoint path.
pub const LOGIN_PATH: &str = "/api88/auth/login";
/// Message shown when either credential is blank.
pub const CREDENTIALS_REQUIRED: &str = "Please enter both e-mail and password.";
/// Message shown when the server rejects a login without explaining why.
pub const LOGIN_FAILED: &str = "Sign-in failed. Check your e-mail and password.";

/// Opaque credential with an absolute expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken {
    /// Token value sent as the bearer credential.
    pub value: String,
    /// Instant after which the session is no longer valid.
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Build a token.
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// `true` once `now` has reached the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Time left before expiry, zero when already expired.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Expiry as epoch milliseconds.
    #[must_use]
    pub fn expiry_millis(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

/// What persistent storage holds right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredSession {
    /// No token at all.
    Missing,
    /// A token without a usable expiry.
    Invalid,
    /// A complete session.
    Present(SessionToken),
}

/// Session persistence over any key/value backend.
#[derive(Debug)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Wrap a backend.
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Underlying backend.
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the persisted session.
    pub fn load(&self) -> StoredSession {
        let Some(value) = self
            .backend
            .get(TOKEN_KEY)
            .filter(|value| !value.trim().is_empty())
        else {
            return StoredSession::Missing;
        };
        let expires_at = self
            .backend
            .get(TOKEN_EXPIRY_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        match expires_at {
            Some(expires_at) => StoredSession::Present(SessionToken { value, expires_at }),
            None => {
                warn!("session token present without a valid expiry");
                StoredSession::Invalid
            }
        }
    }

    /// Token that is still valid at `now`; stale or broken state is cleared.
    pub fn active(&self, now: DateTime<Utc>) -> Option<SessionToken> {
        match self.load() {
            StoredSession::Present(token) if !token.is_expired_at(now) => Some(token),
            StoredSession::Missing => None,
            StoredSession::Present(_) | StoredSession::Invalid => {
                self.clear();
                None
            }
        }
    }

    /// Persist a session.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend rejects either write; nothing is left
    /// half-written in that case.
    pub fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        let result = self
            .backend
            .set(TOKEN_KEY, &token.value)
            .and_then(|()| {
                self.backend
                    .set(TOKEN_EXPIRY_KEY, &token.expiry_millis().to_string())
            });
        if result.is_err() {
            self.clear();
        }
        result
    }

    /// Remove both session keys.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(TOKEN_EXPIRY_KEY);
    }
}

/// Validate login form input and build the request body.
///
/// # Errors
///
/// Returns [`SessionError::Validation`] when either field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<LoginRequest, SessionError> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(SessionError::Validation(CREDENTIALS_REQUIRED.to_string()));
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Interpret a successful-status login body.
///
/// # Errors
///
/// Returns [`SessionError::Rejected`] when the server reports failure, and
/// [`SessionError::MissingSession`] or [`SessionError::InvalidExpiry`] when
/// the session payload is unusable.
pub fn session_from_login(body: &Value) -> Result<SessionToken, SessionError> {
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(SessionError::Rejected(error_text(body)));
    }
    let session = body
        .get("session")
        .filter(|session| session.is_object())
        .ok_or(SessionError::MissingSession)?;
    let session: SessionPayload =
        serde_json::from_value(session.clone()).map_err(|_| malformed_session(session))?;
    if session.id.trim().is_empty() {
        return Err(SessionError::MissingSession);
    }
    let expires_at = DateTime::parse_from_rfc3339(session.expires_at.trim())
        .map_err(|_| SessionError::InvalidExpiry(session.expires_at.clone()))?
        .with_timezone(&Utc);
    info!(expires_at = %expires_at, "session issued");
    Ok(SessionToken::new(session.id, expires_at))
}

/// A session object that failed to decode: a usable id means the expiry is at fault.
fn malformed_session(session: &Value) -> SessionError {
    let has_id = session
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.trim().is_empty());
    if !has_id {
        return SessionError::MissingSession;
    }
    let expiry = match session.get("expiresAt") {
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    SessionError::InvalidExpiry(expiry)
}

fn error_text(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(|| LOGIN_FAILED.to_string(), str::to_string)
}

/// Interpret a login response of any status.
///
/// Non-success statuses surface the body `error` text, falling back to
/// [`LOGIN_FAILED`].
///
/// # Errors
///
/// Same as [`session_from_login`], plus [`SessionError::Rejected`] for any
/// status outside `2xx`.
pub fn login_outcome(status: u16, body: &Value) -> Result<SessionToken, SessionError> {
    if (200..300).contains(&status) {
        return session_from_login(body);
    }
    warn!(status, "login rejected");
    Err(SessionError::Rejected(error_text(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeDelta;
    use serde_json::json;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }

    #[test]
    fn save_then_load_round_trips() -> Result<(), StorageError> {
        let store = SessionStore::new(MemoryStore::new());
        let token = SessionToken::new("abc", at(5_000));
        store.save(&token)?;
        assert_eq!(store.backend().get(TOKEN_EXPIRY_KEY).as_deref(), Some("5000"));
        assert_eq!(store.load(), StoredSession::Present(token));
        Ok(())
    }

    #[test]
    fn missing_expiry_is_invalid_and_cleared() -> Result<(), StorageError> {
        let store = SessionStore::new(MemoryStore::new());
        store.backend().set(TOKEN_KEY, "abc")?;
        assert_eq!(store.load(), StoredSession::Invalid);
        assert_eq!(store.active(at(0)), None);
        assert!(store.backend().is_empty());
        Ok(())
    }

    #[test]
    fn expired_session_is_cleared_on_read() -> Result<(), StorageError> {
        let store = SessionStore::new(MemoryStore::new());
        store.save(&SessionToken::new("abc", at(1_000)))?;
        assert!(store.active(at(999)).is_some());
        assert_eq!(store.active(at(1_000)), None);
        assert_eq!(store.load(), StoredSession::Missing);
        Ok(())
    }

    #[test]
    fn remaining_never_goes_negative() {
        let token = SessionToken::new("abc", at(1_000));
        assert_eq!(token.remaining(at(0)), Duration::from_millis(1_000));
        assert_eq!(token.remaining(at(2_000)), Duration::ZERO);
    }

    #[test]
    fn blank_credentials_are_rejected_locally() {
        assert_eq!(
            validate_credentials("  ", "pw"),
            Err(SessionError::Validation(CREDENTIALS_REQUIRED.into()))
        );
        assert!(validate_credentials("a@b.c", "").is_err());
        assert!(validate_credentials("a@b.c", "   ").is_err());
        let padded = validate_credentials("a@b.c", " pw ").expect("valid");
        assert_eq!(padded.password, " pw ");
        let request = validate_credentials(" a@b.c ", "pw").expect("valid");
        assert_eq!(request.email, "a@b.c");
    }

    #[test]
    fn login_success_yields_token() {
        let expires = Utc::now() + TimeDelta::hours(1);
        let body = json!({
            "success": true,
            "session": {"id": "sess-1", "expiresAt": expires.to_rfc3339()}
        });
        let token = session_from_login(&body).expect("token");
        assert_eq!(token.value, "sess-1");
        assert_eq!(token.expiry_millis(), expires.timestamp_millis());
    }

    #[test]
    fn login_failure_prefers_server_message() {
        let body = json!({"success": false, "error": "wrong password"});
        assert_eq!(
            session_from_login(&body),
            Err(SessionError::Rejected("wrong password".into()))
        );
        assert_eq!(
            session_from_login(&json!({"raw": "<html>"})),
            Err(SessionError::Rejected(LOGIN_FAILED.into()))
        );
    }

    #[test]
    fn login_without_usable_session_fails() {
        assert_eq!(
            session_from_login(&json!({"success": true})),
            Err(SessionError::MissingSession)
        );
        let bad_expiry = json!({"success": true, "session": {"id": "x", "expiresAt": "soon"}});
        assert_eq!(
            session_from_login(&bad_expiry),
            Err(SessionError::InvalidExpiry("soon".into()))
        );
    }

    #[test]
    fn malformed_session_is_not_a_credential_rejection() {
        assert_eq!(
            session_from_login(&json!({"success": true, "session": {"id": "x"}})),
            Err(SessionError::InvalidExpiry(String::new()))
        );
        let numeric_id = json!({
            "success": true,
            "session": {"id": 42, "expiresAt": "2030-01-01T00:00:00Z"}
        });
        assert_eq!(
            session_from_login(&numeric_id),
            Err(SessionError::MissingSession)
        );
        assert_eq!(
            session_from_login(&json!({"success": true, "session": "sess-1"})),
            Err(SessionError::MissingSession)
        );
        let numeric_expiry = json!({"success": true, "session": {"id": "x", "expiresAt": 17}});
        assert_eq!(
            session_from_login(&numeric_expiry),
            Err(SessionError::InvalidExpiry("17".into()))
        );
    }

    #[test]
    fn non_success_status_prefers_body_error() {
        assert_eq!(
            login_outcome(401, &json!({"success": false, "error": "Invalid credentials"})),
            Err(SessionError::Rejected("Invalid credentials".into()))
        );
        assert_eq!(
            login_outcome(500, &json!({"raw": "boom"})),
            Err(SessionError::Rejected(LOGIN_FAILED.into()))
        );
        assert_eq!(
            login_outcome(200, &json!({"success": true})),
            Err(SessionError::MissingSession)
        );
    }
}
