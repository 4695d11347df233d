/// Topic list

use crate::ui::components::EmptyHint;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TopicListProps {
    pub topics: Vec<String>,
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_select: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(TopicList)]
pub fn topic_list(props: &TopicListProps) -> Html {
    if props.topics.is_empty() {
        return html! {
            <EmptyHint message="No topics yet." hint={AttrValue::from("Add a topic to start collecting links.")} />
        };
    }

    html! {
        <ul class="topic-list">
            {for props.topics.iter().map(|topic| {
                let is_selected = props.selected.as_ref() == Some(topic);
                let on_select = props.on_select.reform({
                    let topic = topic.clone();
                    move |_: MouseEvent| topic.clone()
                });
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let topic = topic.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.stop_propagation();
                        on_delete.emit(topic.clone());
                    })
                };

                html! {
                    <li key={topic.clone()} class={classes!("topic-item", is_selected.then_some("topic-item-selected"))}>
                        <span class="topic-name" onclick={on_select}>{topic.clone()}</span>
                        <Button
                            onclick={on_delete}
                            variant={ButtonVariant::Danger}
                            size={ButtonSize::Small}
                        >
                            {"✕"}
                        </Button>
                    </li>
                }
            })}
        </ul>
    }
}
