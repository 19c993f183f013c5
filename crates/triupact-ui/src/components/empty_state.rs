//! Placeholder panel for views with nothing to show.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyStateProps {
    pub(crate) title: AttrValue,
    #[prop_or_default]
    pub(crate) description: Option<AttrValue>,
    /// Follow-up links or buttons.
    #[prop_or_default]
    pub(crate) children: Children,
}

#[function_component(EmptyState)]
pub(crate) fn empty_state(props: &EmptyStateProps) -> Html {
    let description = props
        .description
        .as_ref()
        .map(|text| html! { <p class="muted">{text.clone()}</p> });
    let actions = (!props.children.is_empty())
        .then(|| html! { <div class="empty-actions">{ for props.children.iter() }</div> });
    html! {
        <section class="empty-state" role="status">
            <p class="empty-title">{props.title.clone()}</p>
            {description.unwrap_or_default()}
            {actions.unwrap_or_default()}
        </section>
    }
}
