//! User directory page.

use gloo::console;
use gloo::utils::window;
use gloo_timers::callback::Timeout;
use triupact_core::resources::Resource;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

use crate::features::resources::view::{
    list_empty, list_error, list_footer, list_toolbar, use_resource_list,
};
use crate::features::users::logic::UserCard;

const COPIED_FLASH_MS: u32 = 1_500;

#[function_component(UsersPage)]
pub(crate) fn users_page() -> Html {
    let state = use_resource_list(Resource::Users);
    let copied = use_state(|| None as Option<String>);
    let flash = use_mut_ref(|| None as Option<Timeout>);
    let table = state.table();

    let on_copy = {
        let copied = copied.clone();
        Callback::from(move |(key, text): (String, String)| {
            let copied = copied.clone();
            let flash = flash.clone();
            yew::platform::spawn_local(async move {
                let promise = window().navigator().clipboard().write_text(&text);
                if let Err(err) = JsFuture::from(promise).await {
                    console::warn!("clipboard write failed", err);
                    return;
                }
                copied.set(Some(key));
                let reset = copied.clone();
                *flash.borrow_mut() = Some(Timeout::new(COPIED_FLASH_MS, move || reset.set(None)));
            });
        })
    };

    let page = state.view.project();
    let cards: Vec<UserCard> = page.rows.iter().copied().map(UserCard::from_record).collect();

    let body = list_empty(&state, &table).unwrap_or_else(|| {
        html! {
            <div class="user-grid">
                { for cards.into_iter().map(|card| {
                    let is_copied = copied.as_deref() == Some(card.key.as_str());
                    let copy = (!card.copy_text.is_empty()).then(|| {
                        let on_copy = on_copy.clone();
                        let payload = (card.key.clone(), card.copy_text.clone());
                        html! {
                            <button
                                class="ghost"
                                onclick={Callback::from(move |_| on_copy.emit(payload.clone()))}
                            >{if is_copied { "Copied" } else { "Copy e-mail" }}</button>
                        }
                    });
                    html! {
                        <article class="user-card">
                            <div class="avatar" aria-hidden="true">{card.initials}</div>
                            <div class="user-body">
                                <strong>{card.email}</strong>
                                <span class="muted mono" title={card.key}>{card.short_id}</span>
                                <dl>
                                    <dt>{"Created"}</dt>
                                    <dd>{card.created}</dd>
                                    <dt>{"Updated"}</dt>
                                    <dd>{card.updated}</dd>
                                </dl>
                            </div>
                            {copy.unwrap_or_default()}
                        </article>
                    }
                }) }
            </div>
        }
    });

    html! {
        <section class="resource-page users-page">
            {list_toolbar(&state, &table)}
            {list_error(&state)}
            {body}
            {list_footer(&state, &table)}
        </section>
    }
}
