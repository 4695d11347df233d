/// Link list for the selected topic

use crate::domain::{favicon_url, link_name};
use crate::ui::components::{EmptyHint, Favicon};
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LinkListProps {
    pub links: Vec<String>,
    /// Receives the position of the link to delete
    pub on_delete: Callback<usize>,
}

#[function_component(LinkList)]
pub fn link_list(props: &LinkListProps) -> Html {
    if props.links.is_empty() {
        return html! { <EmptyHint message="No links in this topic yet." /> };
    }

    html! {
        <ul class="link-list">
            {for props.links.iter().enumerate().map(|(index, link)| html! {
                <li key={link.clone()} class="link-item">
                    <Favicon src={favicon_url(link)} />
                    <a
                        class="link-name"
                        href={link.clone()}
                        target="_blank"
                        rel="noopener noreferrer"
                        title={link.clone()}
                    >
                        {link_name(link)}
                    </a>
                    <Button
                        onclick={props.on_delete.reform(move |_: MouseEvent| index)}
                        variant={ButtonVariant::Danger}
                        size={ButtonSize::Small}
                    >
                        {"Delete"}
                    </Button>
                </li>
            })}
        </ul>
    }
}
