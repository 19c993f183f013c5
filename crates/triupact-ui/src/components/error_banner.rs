//! Inline fetch error with a retry button.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorBannerProps {
    pub(crate) message: AttrValue,
    pub(crate) on_retry: Callback<()>,
}

#[function_component(ErrorBanner)]
pub(crate) fn error_banner(props: &ErrorBannerProps) -> Html {
    let on_retry = props.on_retry.clone();
    html! {
        <div class="alert error" role="alert">
            <span>{props.message.clone()}</span>
            <button class="ghost" onclick={Callback::from(move |_| on_retry.emit(()))}>
                {"Retry"}
            </button>
        </div>
    }
}
