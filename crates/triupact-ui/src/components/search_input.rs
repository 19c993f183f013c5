//! Query box for list toolbars.
//!
//! # Design
//! - Typing is debounced; Enter and the clear button apply at once and cancel the pending emit.
//! - The caller owns the list query; an external reset flows back through `value`.

use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchInputProps {
    pub(crate) value: AttrValue,
    pub(crate) placeholder: AttrValue,
    /// Matches and records before filtering, shown while a query is active.
    #[prop_or_default]
    pub(crate) counts: Option<(usize, usize)>,
    #[prop_or(250)]
    pub(crate) debounce_ms: u32,
    pub(crate) on_search: Callback<String>,
}

#[function_component(SearchInput)]
pub(crate) fn search_input(props: &SearchInputProps) -> Html {
    let draft = use_state(|| props.value.to_string());
    let pending = use_mut_ref(|| None as Option<Timeout>);

    {
        let draft = draft.clone();
        use_effect_with_deps(
            move |value| {
                draft.set(value.to_string());
                || ()
            },
            props.value.clone(),
        );
    }

    let flush = {
        let pending = pending.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |query: String| {
            pending.borrow_mut().take();
            on_search.emit(query);
        })
    };

    let oninput = {
        let draft = draft.clone();
        let flush = flush.clone();
        let debounce = props.debounce_ms;
        Callback::from(move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let query = input.value();
            draft.set(query.clone());
            let flush = flush.clone();
            *pending.borrow_mut() = Some(Timeout::new(debounce, move || flush.emit(query)));
        })
    };
    let onkeydown = {
        let draft = draft.clone();
        let flush = flush.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                flush.emit((*draft).clone());
            }
        })
    };
    let on_clear = {
        let draft = draft.clone();
        Callback::from(move |_| {
            draft.set(String::new());
            flush.emit(String::new());
        })
    };

    let active = !draft.trim().is_empty();
    let counts = props
        .counts
        .filter(|_| active)
        .map(|(total, raw_total)| format!("{total} of {raw_total}"));

    html! {
        <div class="search" role="search">
            <input
                type="search"
                placeholder={props.placeholder.clone()}
                aria-label={props.placeholder.clone()}
                value={(*draft).clone()}
                {oninput}
                {onkeydown}
            />
            {counts
                .map(|text| html! { <span class="muted search-count">{text}</span> })
                .unwrap_or_default()}
            {if active {
                html! {
                    <button class="ghost" aria-label="Clear search" onclick={on_clear}>
                        {"✕"}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
