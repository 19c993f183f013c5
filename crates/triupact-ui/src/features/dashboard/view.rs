//! Dashboard page.

use triupact_core::summary::{SUMMARY_PATH, Summary, SummaryGroup};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::app::api::ApiCtx;
use crate::app::fetch::use_fetch_owner;
use crate::app::preferences::{load_sections, load_theme, persist_sections, persist_theme};
use crate::components::empty_state::EmptyState;
use crate::components::error_banner::ErrorBanner;
use crate::components::kpi_card::KpiTile;
use crate::features::LoadStatus;
use crate::features::dashboard::state::{
    DashboardAction, DashboardState, group_cards, group_total_line, highlight_cards,
};

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let owner = use_fetch_owner();
    let state = use_reducer(|| DashboardState::restore(load_sections(), load_theme()));

    {
        let state = state.clone();
        let client = api_ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |_| {
                if let Some(client) = client
                    && let Some((ticket, signal)) = owner.start()
                {
                    yew::platform::spawn_local(async move {
                        let result = client
                            .get_json(SUMMARY_PATH, &signal)
                            .await
                            .and_then(|body| Summary::from_body(&body));
                        if matches!(&result, Err(err) if err.is_aborted()) {
                            return;
                        }
                        ticket.apply(result, |result| {
                            state.dispatch(match result {
                                Ok(summary) => DashboardAction::Loaded(summary),
                                Err(err) => DashboardAction::Failed(err.display_message()),
                            });
                        });
                    });
                }
                || ()
            },
            state.reload,
        );
    }
    use_effect_with_deps(
        |theme| {
            persist_theme(*theme);
            || ()
        },
        state.theme,
    );
    use_effect_with_deps(
        |sections| {
            persist_sections(sections);
            || ()
        },
        state.sections.clone(),
    );

    if api_ctx.is_none() {
        return html! {
            <div class="panel">
                <p class="text-sm text-error">{"Missing API context."}</p>
            </div>
        };
    }

    let on_group = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>()
                && let Some(group) = SummaryGroup::ALL
                    .into_iter()
                    .find(|group| group.key() == select.value())
            {
                state.dispatch(DashboardAction::SelectGroup(group));
            }
        })
    };
    let on_theme = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(DashboardAction::ToggleTheme))
    };
    let on_hide = {
        let state = state.clone();
        Callback::from(move |key: String| state.dispatch(DashboardAction::ToggleSection(key)))
    };
    let on_show_all = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(DashboardAction::ShowAll))
    };
    let on_retry = {
        let state = state.clone();
        Callback::from(move |()| state.dispatch(DashboardAction::Retry))
    };

    let highlights = highlight_cards(&state.summary);
    let cards = group_cards(&state.summary, state.group, &state.sections);
    let hidden = state.sections.hidden_count();

    let body = match &state.status {
        LoadStatus::Loading => html! { <p class="muted">{"Loading summary…"}</p> },
        LoadStatus::Failed(message) => html! {
            <ErrorBanner message={message.clone()} on_retry={on_retry} />
        },
        LoadStatus::Ready if state.summary.is_empty() => html! {
            <EmptyState
                title="No summary data"
                description={AttrValue::from("The server returned no counts.")}
            />
        },
        LoadStatus::Ready => html! {
            <>
                <section class="kpi-grid highlights">
                    { for highlights.into_iter().map(|card| html! { <KpiTile card={card} /> }) }
                </section>
                <p class="group-total">{group_total_line(&state.summary, state.group)}</p>
                <section class="kpi-grid">
                    { for cards.into_iter().map(|card| html! {
                        <KpiTile card={card} on_hide={on_hide.clone()} />
                    }) }
                </section>
            </>
        },
    };

    html! {
        <div class="dashboard" data-theme={state.theme.as_str()}>
            <div class="toolbar">
                <label>
                    <span class="muted">{"Group"}</span>
                    <select onchange={on_group}>
                        { for SummaryGroup::ALL.into_iter().map(|group| html! {
                            <option value={group.key()} selected={group == state.group}>
                                {group.label()}
                            </option>
                        }) }
                    </select>
                </label>
                {if hidden > 0 {
                    html! {
                        <button class="ghost" onclick={on_show_all}>
                            {format!("Show all ({hidden} hidden)")}
                        </button>
                    }
                } else {
                    html! {}
                }}
                <button class="ghost" onclick={on_theme}>{state.theme.toggle_label()}</button>
            </div>
            {body}
        </div>
    }
}
