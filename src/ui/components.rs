/// Reusable UI pieces: blocking dialogs and small shared components

use yew::prelude::*;

/// Show a blocking notice, as for rejected input
pub fn notify(message: &str) {
    let shown = web_sys::window().map(|window| window.alert_with_message(message));
    if !matches!(shown, Some(Ok(()))) {
        log::warn!("Could not show notice: {}", message);
    }
}

/// Ask a blocking yes/no question; anything but an explicit yes is a no
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct EmptyHintProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

#[function_component(EmptyHint)]
pub fn empty_hint(props: &EmptyHintProps) -> Html {
    html! {
        <div class="empty-state">
            <p>{props.message.clone()}</p>
            if let Some(hint) = &props.hint {
                <p class="empty-state-hint">{hint.clone()}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FaviconProps {
    pub src: Option<String>,
}

/// Remote site icon. A missing or failed icon leaves the row intact.
#[function_component(Favicon)]
pub fn favicon(props: &FaviconProps) -> Html {
    let failed = use_state(|| false);

    let onerror = {
        let failed = failed.clone();
        Callback::from(move |_: Event| failed.set(true))
    };

    match &props.src {
        Some(src) if !*failed => html! {
            <img class="link-favicon" src={src.clone()} alt="" {onerror} />
        },
        _ => html! { <span class="link-favicon link-favicon-placeholder"></span> },
    }
}
