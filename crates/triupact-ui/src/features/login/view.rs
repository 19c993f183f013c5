//! Sign-in page.
//!
//! # Design
//! - Validation runs before any request; the form stays editable after a rejection.
//! - The session is written before navigating so the dashboard gate sees it on mount.

use gloo::console;
use triupact_core::session::{LOGIN_FAILED, LOGIN_PATH, login_outcome, validate_credentials};
use triupact_core::{ApiError, SessionError};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::api::ApiCtx;
use crate::app::fetch::use_fetch_owner;
use crate::app::routes::Route;
use crate::features::login::state::{LoginAction, LoginMessage, LoginState, expired_flag};

enum Outcome {
    Session(Result<(), String>),
    Failed(String),
}

fn session_failure(err: &SessionError) -> String {
    match err {
        SessionError::Validation(message) | SessionError::Rejected(message) => message.clone(),
        SessionError::MissingSession | SessionError::InvalidExpiry(_) => {
            console::warn!("login response unusable", err.to_string());
            LOGIN_FAILED.to_string()
        }
    }
}

fn transport_failure(err: &ApiError) -> Option<String> {
    (!err.is_aborted()).then(|| err.display_message())
}

fn input_value(event: &InputEvent) -> Option<String> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
}

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let owner = use_fetch_owner();
    let state = use_reducer(|| {
        LoginState::new(location.is_some_and(|location| expired_flag(location.query_str())))
    });

    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="text-sm text-error">{"Missing API context."}</p>
            </div>
        };
    };

    let on_email = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                state.dispatch(LoginAction::Email(value));
            }
        })
    };
    let on_password = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = input_value(&event) {
                state.dispatch(LoginAction::Password(value));
            }
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if state.busy {
                return;
            }
            let request = match validate_credentials(&state.email, &state.password) {
                Ok(request) => request,
                Err(err) => {
                    state.dispatch(LoginAction::Rejected(err.to_string()));
                    return;
                }
            };
            let Some((ticket, signal)) = owner.start() else {
                state.dispatch(LoginAction::Rejected(LOGIN_FAILED.to_string()));
                return;
            };
            state.dispatch(LoginAction::Submitted);
            let client = api_ctx.client.clone();
            let state = state.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let outcome = match client.post_json(LOGIN_PATH, &request, &signal).await {
                    Ok((status, body)) => match login_outcome(status, &body) {
                        Ok(token) => Outcome::Session(
                            client.session().save(&token).map_err(|err| err.to_string()),
                        ),
                        Err(err) => Outcome::Failed(session_failure(&err)),
                    },
                    Err(err) => match transport_failure(&err) {
                        Some(message) => Outcome::Failed(message),
                        None => return,
                    },
                };
                ticket.apply(outcome, |outcome| match outcome {
                    Outcome::Session(Ok(())) => {
                        state.dispatch(LoginAction::Accepted);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Outcome::Session(Err(message)) | Outcome::Failed(message) => {
                        state.dispatch(LoginAction::Rejected(message));
                    }
                });
            });
        })
    };

    let message = state.message.as_ref().map(|message| match message {
        LoginMessage::Notice(text) => html! {
            <div class="alert notice" role="status">{*text}</div>
        },
        LoginMessage::Error(text) => html! {
            <div class="alert error" role="alert">{text.clone()}</div>
        },
    });

    html! {
        <div class="login-page">
            <form class="panel login-card" onsubmit={on_submit}>
                <h1>{"TriupAct"}</h1>
                <p class="muted">{"Sign in with your administrator account."}</p>
                {message.unwrap_or_default()}
                <label>
                    <span>{"E-mail"}</span>
                    <input
                        type="email"
                        autocomplete="username"
                        value={state.email.clone()}
                        disabled={state.busy}
                        oninput={on_email}
                    />
                </label>
                <label>
                    <span>{"Password"}</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={state.password.clone()}
                        disabled={state.busy}
                        oninput={on_password}
                    />
                </label>
                <button type="submit" class="primary" disabled={state.busy}>
                    {if state.busy { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
