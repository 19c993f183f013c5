//! Sidebar layout wrapping every protected page.

use gloo::dialogs::confirm;
use gloo::events::EventListener;
use gloo::utils::window;
use triupact_core::guard::GuardEvent;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

use crate::app::api::ApiCtx;
use crate::app::preferences::{is_desktop, load_sidebar, persist_sidebar};
use crate::app::routes::Route;
use crate::shell::{SIGN_OUT_PROMPT, ShellCommand, active_entry, nav_entries};
use crate::store::AppStore;

#[derive(Properties, PartialEq)]
pub(crate) struct AppShellProps {
    pub(crate) title: AttrValue,
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &AppShellProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let sidebar = use_reducer(load_sidebar);
    let location = use_location();
    let entries = use_memo(|_| nav_entries(), ());
    let path = location
        .map(|location| location.path().to_string())
        .unwrap_or_default();

    use_effect_with_deps(
        |state| {
            persist_sidebar(*state);
            || ()
        },
        *sidebar,
    );

    {
        let sidebar = sidebar.clone();
        use_effect_with_deps(
            move |_| {
                sidebar.dispatch(ShellCommand::Navigated {
                    desktop: is_desktop(),
                });
                || ()
            },
            path.clone(),
        );
    }

    {
        let sidebar = sidebar.clone();
        use_effect_with_deps(
            move |_| {
                let listener = EventListener::new(&window(), "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let Some(command) =
                        ShellCommand::from_key(&event.key(), event.ctrl_key(), event.meta_key())
                    else {
                        return;
                    };
                    if command.prevents_default() {
                        event.prevent_default();
                    }
                    sidebar.dispatch(command);
                });
                move || drop(listener)
            },
            (),
        );
    }

    let on_toggle = {
        let sidebar = sidebar.clone();
        Callback::from(move |_| sidebar.dispatch(ShellCommand::Toggle))
    };
    let on_backdrop = {
        let sidebar = sidebar.clone();
        Callback::from(move |_| sidebar.dispatch(ShellCommand::Close))
    };
    let on_sign_out = Callback::from(move |_| {
        if !confirm(SIGN_OUT_PROMPT) {
            return;
        }
        if let Some(api_ctx) = &api_ctx {
            api_ctx.client.session().clear();
        }
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            store.auth.close(GuardEvent::Logout);
        });
    });

    let active = active_entry(&entries, &path);
    let links = entries.iter().enumerate().map(|(index, entry)| {
        let current = active == Some(index);
        html! {
            <li>
                <Link<Route>
                    to={Route::for_target(entry.target)}
                    classes={classes!("nav-link", current.then_some("active"))}
                >
                    {entry.label}
                </Link<Route>>
            </li>
        }
    });
    let open = sidebar.open;

    html! {
        <div class={classes!("shell", open.then_some("sidebar-open"))}>
            <aside class="sidebar" aria-hidden={(!open).to_string()}>
                <div class="brand">{"TriupAct"}</div>
                <nav aria-label="Main">
                    <ul>{ for links }</ul>
                </nav>
                <button class="ghost sign-out" onclick={on_sign_out}>{"Sign out"}</button>
            </aside>
            {if open {
                html! { <div class="backdrop" onclick={on_backdrop}></div> }
            } else {
                html! {}
            }}
            <div class="shell-main">
                <header class="topbar">
                    <button
                        class="ghost menu-toggle"
                        aria-label="Toggle sidebar"
                        aria-expanded={open.to_string()}
                        onclick={on_toggle}
                    >{"☰"}</button>
                    <h1>{props.title.clone()}</h1>
                </header>
                <main class="content">{ for props.children.iter() }</main>
            </div>
        </div>
    }
}
