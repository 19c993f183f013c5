//! Page navigation and page-size menu for list views.
//!
//! # Design
//! - Render whatever [`PageNav`] says; clamping lives in the core projection.
//! - Ellipsis entries are inert.

use triupact_core::listview::PAGE_SIZE_OPTIONS;
use triupact_core::pagination::{PageItem, PageNav};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub(crate) nav: PageNav,
    pub(crate) page_size: usize,
    pub(crate) on_page: Callback<usize>,
    pub(crate) on_page_size: Callback<usize>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let nav = &props.nav;
    let jump = |label: &'static str, target: Option<usize>| {
        let on_page = props.on_page.clone();
        html! {
            <button
                class="ghost"
                disabled={target.is_none()}
                onclick={Callback::from(move |_| {
                    if let Some(page) = target {
                        on_page.emit(page);
                    }
                })}
            >{label}</button>
        }
    };
    let first = (nav.current > 1).then(|| nav.first());
    let last = (nav.current < nav.total_pages).then(|| nav.last());

    let items = nav.items.iter().map(|item| match *item {
        PageItem::Page(page) => {
            let on_page = props.on_page.clone();
            let current = page == nav.current;
            html! {
                <button
                    class={classes!("page", current.then_some("active"))}
                    aria-current={current.then_some("page")}
                    onclick={Callback::from(move |_| on_page.emit(page))}
                >{page.to_string()}</button>
            }
        }
        PageItem::Ellipsis => html! { <span class="ellipsis">{"…"}</span> },
    });

    let on_size = {
        let on_page_size = props.on_page_size.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<web_sys::HtmlSelectElement>()
                && let Ok(size) = select.value().parse::<usize>()
            {
                on_page_size.emit(size);
            }
        })
    };

    html! {
        <nav class="pagination" aria-label="Pagination">
            {jump("«", first)}
            {jump("‹", nav.prev())}
            { for items }
            {jump("›", nav.next())}
            {jump("»", last)}
            <label class="page-size">
                <span class="muted">{"Rows"}</span>
                <select onchange={on_size}>
                    { for PAGE_SIZE_OPTIONS.iter().map(|size| html! {
                        <option value={size.to_string()} selected={*size == props.page_size}>
                            {size.to_string()}
                        </option>
                    }) }
                </select>
            </label>
        </nav>
    }
}
