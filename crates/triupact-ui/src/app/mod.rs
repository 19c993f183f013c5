//! Application root: context, routing, and boot.
//!
//! # Design
//! - One `ApiCtx` per boot, provided above the router.
//! - Protected routes render inside `RequireAuth` and then the sidebar shell.
//! - Resource pages are keyed by slug so switching resources starts a fresh list.

use triupact_core::resources::Resource;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::auth::RequireAuth;
use crate::components::empty_state::EmptyState;
use crate::components::shell::AppShell;
use crate::features::dashboard::view::DashboardPage;
use crate::features::login::view::LoginPage;
use crate::features::resources::view::ResourcePage;
use crate::features::users::view::UsersPage;
use crate::shell::NavTarget;
use api::ApiCtx;
use preferences::{api_endpoint, now};
use routes::Route;

pub(crate) mod api;
pub(crate) mod fetch;
pub(crate) mod preferences;
pub(crate) mod routes;

fn protected(title: &'static str, content: Html) -> Html {
    html! {
        <RequireAuth>
            <AppShell title={title}>{content}</AppShell>
        </RequireAuth>
    }
}

fn resource_route(resource: Resource) -> Html {
    protected(
        resource.spec().title,
        html! { <ResourcePage key={resource.slug()} resource={resource} /> },
    )
}

fn not_found() -> Html {
    html! {
        <div class="panel">
            <EmptyState
                title="Page not found"
                description={AttrValue::from("Use the navigation to return to a supported view.")}
            >
                <Link<Route> to={Route::Dashboard} classes={classes!("primary")}>
                    {"Back to dashboard"}
                </Link<Route>>
            </EmptyState>
        </div>
    }
}

#[function_component(TriupactApp)]
fn triupact_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(api_endpoint()), ());
    let api_routes = api_ctx.clone();

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Switch<Route> render={move |route| match route {
                    Route::Home => {
                        let target = if api_routes.client.session().active(now()).is_some() {
                            Route::Dashboard
                        } else {
                            Route::Login
                        };
                        html! { <Redirect<Route> to={target} /> }
                    }
                    Route::Login => html! { <LoginPage /> },
                    Route::Dashboard => protected("Dashboard", html! { <DashboardPage /> }),
                    Route::Departments => resource_route(Resource::DepartmentDirectory),
                    Route::Users => protected(
                        Resource::Users.spec().title,
                        html! { <UsersPage /> },
                    ),
                    Route::Data { slug } => match Resource::from_slug(&slug) {
                        Some(resource) => match Route::for_target(NavTarget::Resource(resource)) {
                            Route::Data { .. } => resource_route(resource),
                            canonical => html! { <Redirect<Route> to={canonical} /> },
                        },
                        None => not_found(),
                    },
                    Route::NotFound => not_found(),
                }} />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

/// Mount the app into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<TriupactApp>::with_root(root).render();
    } else {
        yew::Renderer::<TriupactApp>::new().render();
    }
}
