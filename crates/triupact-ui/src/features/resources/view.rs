//! Resource list page plus the list hook and toolbar shared with the user directory.
//!
//! # Design
//! - One fetch per mount and per retry; list interactions never refetch.
//! - The page is keyed by resource at the router, so switching resources remounts it.

use triupact_core::http::extract_list;
use triupact_core::resources::Resource;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::app::api::ApiCtx;
use crate::app::fetch::use_fetch_owner;
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::ErrorBanner;
use crate::components::pagination::Pagination;
use crate::components::search_input::SearchInput;
use crate::features::resources::state::{ResourceAction, ResourceState, TableModel};

/// List state for `resource`, fetched on mount and on retry.
#[hook]
pub(crate) fn use_resource_list(resource: Resource) -> UseReducerHandle<ResourceState> {
    let api_ctx = use_context::<ApiCtx>();
    let owner = use_fetch_owner();
    let state = use_reducer(|| ResourceState::new(resource));
    {
        let state = state.clone();
        let client = api_ctx.map(|ctx| ctx.client);
        use_effect_with_deps(
            move |_| {
                if let Some(client) = client
                    && let Some((ticket, signal)) = owner.start()
                {
                    let spec = resource.spec();
                    yew::platform::spawn_local(async move {
                        let result = client
                            .get_json(spec.endpoint, &signal)
                            .await
                            .map(|body| spec.normalize(&extract_list(&body)));
                        if matches!(&result, Err(err) if err.is_aborted()) {
                            return;
                        }
                        ticket.apply(result, |result| {
                            state.dispatch(match result {
                                Ok(records) => ResourceAction::Loaded(records),
                                Err(err) => ResourceAction::Failed(err.display_message()),
                            });
                        });
                    });
                }
                || ()
            },
            state.reload,
        );
    }
    state
}

/// Search box and sort menu.
pub(crate) fn list_toolbar(state: &UseReducerHandle<ResourceState>, table: &TableModel) -> Html {
    let on_search = {
        let state = state.clone();
        Callback::from(move |query: String| state.dispatch(ResourceAction::Search(query)))
    };
    let on_sort = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                state.dispatch(ResourceAction::Sort(select.value()));
            }
        })
    };
    let modes = state.spec().list.sort_modes;
    let current = state.view.sort().map(|mode| mode.key);
    let sort = if modes.is_empty() {
        html! {}
    } else {
        html! {
            <label>
                <span class="muted">{"Sort"}</span>
                <select onchange={on_sort}>
                    { for modes.iter().map(|mode| html! {
                        <option value={mode.key} selected={current == Some(mode.key)}>
                            {mode.label}
                        </option>
                    }) }
                </select>
            </label>
        }
    };
    html! {
        <div class="toolbar">
            <SearchInput
                value={state.view.query().to_string()}
                placeholder="Search"
                counts={Some((table.total, table.raw_total))}
                on_search={on_search}
            />
            {sort}
            {if state.status.is_loading() {
                html! { <span class="muted">{"Loading…"}</span> }
            } else {
                html! {}
            }}
        </div>
    }
}

/// Error banner with retry, or nothing.
pub(crate) fn list_error(state: &UseReducerHandle<ResourceState>) -> Html {
    let Some(message) = state.status.error() else {
        return html! {};
    };
    let on_retry = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(ResourceAction::Retry))
    };
    html! { <ErrorBanner message={message.to_string()} on_retry={on_retry} /> }
}

/// Summary line and pagination under a list.
pub(crate) fn list_footer(state: &UseReducerHandle<ResourceState>, table: &TableModel) -> Html {
    let on_page = {
        let state = state.clone();
        Callback::from(move |page: usize| state.dispatch(ResourceAction::Page(page)))
    };
    let on_page_size = {
        let state = state.clone();
        Callback::from(move |size: usize| state.dispatch(ResourceAction::PageSize(size)))
    };
    html! {
        <footer class="list-footer">
            <span class="muted">{table.summary.clone()}</span>
            <Pagination
                nav={table.nav.clone()}
                page_size={state.view.page_size()}
                on_page={on_page}
                on_page_size={on_page_size}
            />
        </footer>
    }
}

/// Empty-state panel when the current projection has no rows.
pub(crate) fn list_empty(
    state: &UseReducerHandle<ResourceState>,
    table: &TableModel,
) -> Option<Html> {
    if state.status.is_loading() {
        return None;
    }
    table.empty_message().map(|title| {
        let description = (table.raw_total > 0)
            .then(|| AttrValue::from(format!("{} records hidden by the search", table.raw_total)));
        html! { <EmptyState title={title} description={description} /> }
    })
}

#[derive(Properties, PartialEq)]
pub(crate) struct ResourcePageProps {
    pub(crate) resource: Resource,
}

#[function_component(ResourcePage)]
pub(crate) fn resource_page(props: &ResourcePageProps) -> Html {
    let state = use_resource_list(props.resource);
    let table = state.table();

    let body = list_empty(&state, &table).unwrap_or_else(|| {
        html! {
            <div class="table-wrap">
                <table class="data-table">
                    <thead>
                        <tr>
                            { for table.columns.iter().map(|column| html! {
                                <th scope="col">{column.label.clone()}</th>
                            }) }
                        </tr>
                    </thead>
                    <tbody>
                        { for table.rows.iter().map(|(_, cells)| html! {
                            <tr>
                                { for cells.iter().map(|cell| html! { <td>{cell.clone()}</td> }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        }
    });

    html! {
        <section class="resource-page">
            {list_toolbar(&state, &table)}
            {list_error(&state)}
            {body}
            {list_footer(&state, &table)}
        </section>
    }
}
