//! Login form state.

use std::rc::Rc;

use yew::functional::Reducible;

/// Notice shown when the previous session ran out.
pub const EXPIRED_NOTICE: &str = "Your session expired. Please sign in again.";
/// Notice shown between a successful login and the redirect.
pub const SIGNED_IN_NOTICE: &str = "Signed in. Opening the dashboard...";

/// `true` when the login query string carries `expired=1`.
#[must_use]
pub fn expired_flag(query: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "expired=1")
}

/// Message under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMessage {
    /// Informational text.
    Notice(&'static str),
    /// Failure text from validation or the server.
    Error(String),
}

/// Form fields and submission status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    /// E-mail input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// A login request is in flight.
    pub busy: bool,
    /// Message under the form.
    pub message: Option<LoginMessage>,
}

impl LoginState {
    /// Blank form, with the expiry notice when redirected after a timeout.
    #[must_use]
    pub fn new(expired: bool) -> Self {
        Self {
            message: expired.then_some(LoginMessage::Notice(EXPIRED_NOTICE)),
            ..Self::default()
        }
    }
}

/// Form transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginAction {
    /// E-mail input changed.
    Email(String),
    /// Password input changed.
    Password(String),
    /// A request was sent.
    Submitted,
    /// Validation or the server refused the login.
    Rejected(String),
    /// The session was stored.
    Accepted,
}

impl Reducible for LoginState {
    type Action = LoginAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LoginAction::Email(email) => next.email = email,
            LoginAction::Password(password) => next.password = password,
            LoginAction::Submitted => {
                next.busy = true;
                next.message = None;
            }
            LoginAction::Rejected(message) => {
                next.busy = false;
                next.message = Some(LoginMessage::Error(message));
            }
            LoginAction::Accepted => {
                next.busy = false;
                next.password.clear();
                next.message = Some(LoginMessage::Notice(SIGNED_IN_NOTICE));
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_flag_reads_query_pairs() {
        assert!(expired_flag("?expired=1"));
        assert!(expired_flag("next=%2Fusers&expired=1"));
        assert!(!expired_flag("?expired=0"));
        assert!(!expired_flag(""));
    }

    #[test]
    fn expired_redirect_shows_notice() {
        assert_eq!(
            LoginState::new(true).message,
            Some(LoginMessage::Notice(EXPIRED_NOTICE))
        );
        assert_eq!(LoginState::new(false).message, None);
    }

    #[test]
    fn submit_then_reject_keeps_inputs() {
        let state = Rc::new(LoginState::new(true))
            .reduce(LoginAction::Email("a@psu.ac.th".into()))
            .reduce(LoginAction::Password("pw".into()))
            .reduce(LoginAction::Submitted);
        assert!(state.busy);
        assert_eq!(state.message, None);

        let state = state.reduce(LoginAction::Rejected("Invalid credentials".into()));
        assert!(!state.busy);
        assert_eq!(state.email, "a@psu.ac.th");
        assert_eq!(
            state.message,
            Some(LoginMessage::Error("Invalid credentials".into()))
        );
    }

    #[test]
    fn accepted_clears_password() {
        let state = Rc::new(LoginState::default())
            .reduce(LoginAction::Password("pw".into()))
            .reduce(LoginAction::Submitted)
            .reduce(LoginAction::Accepted);
        assert!(state.password.is_empty());
        assert_eq!(state.message, Some(LoginMessage::Notice(SIGNED_IN_NOTICE)));
    }
}
