//! Single count tile for the dashboard.

use yew::prelude::*;

use crate::features::dashboard::state::KpiCard;

#[derive(Properties, PartialEq)]
pub(crate) struct KpiCardProps {
    pub(crate) card: KpiCard,
    /// Hide action; absent for headline cards.
    #[prop_or_default]
    pub(crate) on_hide: Option<Callback<String>>,
}

#[function_component(KpiTile)]
pub(crate) fn kpi_tile(props: &KpiCardProps) -> Html {
    let card = &props.card;
    let hide = props.on_hide.clone().map(|on_hide| {
        let key = card.key.clone();
        html! {
            <button
                class="ghost tile-hide"
                aria-label={format!("Hide {}", card.label)}
                onclick={Callback::from(move |_| on_hide.emit(key.clone()))}
            >{"✕"}</button>
        }
    });
    html! {
        <article class="kpi-card" data-key={card.key.clone()}>
            <header>
                <span class="muted">{card.label.clone()}</span>
                {hide.unwrap_or_default()}
            </header>
            <strong class="kpi-value">{card.value.clone()}</strong>
        </article>
    }
}
