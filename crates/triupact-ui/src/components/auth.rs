//! Route gate for protected pages.
//!
//! # Design
//! - Every mount re-reads storage and restarts the shared guard from `Unchecked`.
//! - Children render only after the check and only while the guard is open.
//! - Expiry timer and cross-tab storage events close the gate; the redirect effect
//!   runs once per close because the guard ignores events after the first.

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use triupact_core::guard::{
    EXPIRED_LOGIN_ROUTE, GuardEvent, GuardState, SignOutReason, storage_change,
};
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::app::api::ApiCtx;
use crate::app::preferences::now;
use crate::app::routes::Route;
use crate::store::AppStore;

/// Longest delay a browser timer accepts without firing immediately.
const MAX_TIMER_MS: u32 = 2_147_483_647;

#[derive(Serialize)]
struct ExpiredQuery {
    expired: u8,
}

#[derive(Properties, PartialEq)]
pub(crate) struct RequireAuthProps {
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(RequireAuth)]
pub(crate) fn require_auth(props: &RequireAuthProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let guard = use_selector(|store: &AppStore| store.auth.guard);
    let checked = use_state(|| false);
    let rearm = use_state(|| 0_u32);

    {
        let api_ctx = api_ctx.clone();
        let checked = checked.clone();
        use_effect_with_deps(
            move |_| {
                let dispatch = Dispatch::<AppStore>::new();
                if let Some(api_ctx) = api_ctx {
                    let session = api_ctx.client.session();
                    let stored = session.load();
                    let mut state = GuardState::Unchecked;
                    dispatch.reduce_mut(|store| {
                        state = store.auth.remount(&stored, now());
                    });
                    if state == GuardState::Unauthenticated(SignOutReason::Expired) {
                        session.clear();
                    }
                }
                checked.set(true);
                let listener = EventListener::new(&window(), "storage", move |event| {
                    let Some(event) = event.dyn_ref::<StorageEvent>() else {
                        return;
                    };
                    let key = event.key();
                    let new_value = event.new_value();
                    if let Some(change) = storage_change(key.as_deref(), new_value.as_deref()) {
                        dispatch.reduce_mut(|store| {
                            store.auth.close(change);
                        });
                    }
                });
                move || drop(listener)
            },
            (),
        );
    }

    {
        let api_ctx = api_ctx.clone();
        let rearm = rearm.clone();
        use_effect_with_deps(
            move |(guard, tick)| {
                let guard = *guard;
                let tick = *tick;
                let timer = guard.expiry_delay(now()).map(|delay| {
                    let millis = u32::try_from(delay.as_millis())
                        .map_or(MAX_TIMER_MS, |ms| ms.min(MAX_TIMER_MS));
                    Timeout::new(millis, move || {
                        if guard.expiry_delay(now()).is_some_and(|left| !left.is_zero()) {
                            rearm.set(tick.wrapping_add(1));
                            return;
                        }
                        if let Some(api_ctx) = &api_ctx {
                            api_ctx.client.session().clear();
                        }
                        Dispatch::<AppStore>::new().reduce_mut(|store| {
                            store.auth.close(GuardEvent::ExpiryElapsed);
                        });
                    })
                });
                move || drop(timer)
            },
            (*guard, *rearm),
        );
    }

    use_effect_with_deps(
        move |(checked, guard)| {
            if *checked
                && let Some(target) = guard.redirect()
                && let Some(navigator) = navigator
            {
                let result = if target == EXPIRED_LOGIN_ROUTE {
                    navigator.replace_with_query(&Route::Login, &ExpiredQuery { expired: 1 })
                } else {
                    navigator.replace(&Route::Login);
                    Ok(())
                };
                if let Err(err) = result {
                    console::error!("login redirect failed", err.to_string());
                }
            }
            || ()
        },
        (*checked, *guard),
    );

    if api_ctx.is_none() {
        return html! {
            <div class="panel">
                <p class="text-sm text-error">{"Missing API context."}</p>
            </div>
        };
    }

    match guard.state() {
        GuardState::Authenticated { .. } if *checked => {
            html! { <>{ for props.children.iter() }</> }
        }
        GuardState::Unauthenticated(_) if *checked => html! {
            <div class="auth-gate muted">{"Redirecting to sign in…"}</div>
        },
        _ => html! { <div class="auth-gate muted">{"Checking session…"}</div> },
    }
}
