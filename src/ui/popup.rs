/// Popup UI for Link Organizer extension

use crate::backup::{RESTORE_PROMPT, initialize};
use crate::browser::{BrowserClock, ChromeSyncStorage, download, read_file_text};
use crate::operations;
use crate::snapshot::Snapshot;
use crate::storage::{quota_warning, save_snapshot};
use crate::transfer::{EXPORT_FILENAME, ImportError, export_json, parse_import};
use crate::ui::components::{confirm, notify};
use crate::ui::links::LinkList;
use crate::ui::topics::TopicList;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
    /// Saved data could not be loaded. Edits stay locked so that an empty
    /// snapshot is never written over the stored one.
    LoadFailed(String),
}

impl AppState {
    fn allows_edits(&self) -> bool {
        matches!(self, AppState::Idle | AppState::Error(_))
    }
}

/// Write the snapshot to sync storage in the background
fn persist(snapshot: Snapshot, state: UseStateHandle<AppState>) {
    spawn_local(async move {
        if let Err(e) = save_snapshot(&ChromeSyncStorage, &snapshot, &BrowserClock).await {
            state.set(AppState::Error(format!("Failed to save: {}", e)));
        }
    });
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target_dyn_into::<HtmlInputElement>().map(|input| input.value())
}

/// Emit `action` when Enter is pressed
fn on_enter(action: Callback<()>) -> Callback<KeyboardEvent> {
    Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            action.emit(());
        }
    })
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let book = use_state(Snapshot::new);
    let selected = use_state(|| None::<String>);
    let topic_input = use_state(String::new);
    let link_input = use_state(String::new);
    let storage_warning = use_state(|| None::<String>);
    let topic_input_ref = use_node_ref();
    let file_input_ref = use_node_ref();

    // Restore prompt, then load saved data on mount
    {
        let state = state.clone();
        let book = book.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match initialize(&ChromeSyncStorage, |_| confirm(RESTORE_PROMPT)).await {
                    Ok(snapshot) => {
                        book.set(snapshot);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::LoadFailed(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Check storage quota on mount
    {
        let storage_warning = storage_warning.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match ChromeSyncStorage.usage().await {
                    Ok(usage) => storage_warning.set(quota_warning(usage.bytes_in_use, usage.quota)),
                    Err(e) => log::warn!("{}", e),
                }
            });
            || ()
        });
    }

    let add_topic = {
        let state = state.clone();
        let book = book.clone();
        let topic_input = topic_input.clone();
        Callback::from(move |_: ()| {
            if !state.allows_edits() {
                return;
            }
            let mut next = (*book).clone();
            match operations::add_topic(&mut next, &topic_input) {
                Ok(_) => {
                    book.set(next.clone());
                    topic_input.set(String::new());
                    persist(next, state.clone());
                }
                Err(e) => notify(&e.to_string()),
            }
        })
    };

    let on_select_topic = {
        let book = book.clone();
        let selected = selected.clone();
        let link_input = link_input.clone();
        Callback::from(move |topic: String| {
            let mut next = (*book).clone();
            operations::open_topic(&mut next, &topic);
            book.set(next);
            link_input.set(String::new());
            selected.set(Some(topic));
        })
    };

    let on_delete_topic = {
        let state = state.clone();
        let book = book.clone();
        let selected = selected.clone();
        Callback::from(move |topic: String| {
            if !state.allows_edits() {
                return;
            }
            let question = format!(
                "Are you sure you want to delete the topic \"{}\" and all its links?",
                topic
            );
            if !confirm(&question) {
                return;
            }
            let mut next = (*book).clone();
            if operations::delete_topic(&mut next, &topic) {
                book.set(next.clone());
                selected.set(None);
                persist(next, state.clone());
            }
        })
    };

    let add_link = {
        let state = state.clone();
        let book = book.clone();
        let selected = selected.clone();
        let link_input = link_input.clone();
        Callback::from(move |_: ()| {
            if !state.allows_edits() {
                return;
            }
            let mut next = (*book).clone();
            match operations::add_link(&mut next, selected.as_deref(), &link_input) {
                Ok(_) => {
                    book.set(next.clone());
                    link_input.set(String::new());
                    persist(next, state.clone());
                }
                Err(e) => notify(&e.to_string()),
            }
        })
    };

    let on_delete_link = {
        let state = state.clone();
        let book = book.clone();
        let selected = selected.clone();
        Callback::from(move |index: usize| {
            if !state.allows_edits() {
                return;
            }
            let Some(topic) = (*selected).clone() else {
                return;
            };
            if !confirm("Delete this link?") {
                return;
            }
            let mut next = (*book).clone();
            if operations::delete_link(&mut next, &topic, index).is_some() {
                book.set(next.clone());
                persist(next, state.clone());
            }
        })
    };

    let on_back = {
        let selected = selected.clone();
        let topic_input_ref = topic_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            selected.set(None);
            if let Some(input) = topic_input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        })
    };

    let on_export = {
        let book = book.clone();
        Callback::from(move |_: MouseEvent| match export_json(&book) {
            Ok(json) => {
                download(&json, EXPORT_FILENAME);
                log::info!("Exported {} topics", book.topics.len());
            }
            Err(e) => {
                log::error!("Export failed: {:?}", e);
                notify(&format!("Export failed: {}", e));
            }
        })
    };

    let on_import_click = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_import_file = {
        let state = state.clone();
        let book = book.clone();
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            if !state.allows_edits() {
                return;
            }
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            let state = state.clone();
            let book = book.clone();
            let selected = selected.clone();
            spawn_local(async move {
                let imported = match read_file_text(&file).await {
                    Ok(text) => parse_import(&text),
                    Err(e) => Err(ImportError::Read(e)),
                };

                match imported {
                    Ok(snapshot) => {
                        book.set(snapshot.clone());
                        selected.set(None);
                        match save_snapshot(&ChromeSyncStorage, &snapshot, &BrowserClock).await {
                            Ok(()) => {
                                log::info!("Imported {} topics", snapshot.topics.len());
                                notify("Data imported successfully!");
                            }
                            Err(e) => state.set(AppState::Error(format!("Failed to save: {}", e))),
                        }
                    }
                    Err(e) => {
                        log::warn!("Import rejected: {}", e);
                        notify(&e.to_string());
                    }
                }

                // Allow the same file to be picked again
                input.set_value("");
            });
        })
    };

    let on_topic_input = {
        let topic_input = topic_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                topic_input.set(value);
            }
        })
    };

    let on_link_input = {
        let link_input = link_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                link_input.set(value);
            }
        })
    };

    let on_dismiss_error = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.set(AppState::Idle))
    };

    let is_busy = !state.allows_edits();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Link Organizer"}</h1>

            // Storage warning
            if let Some(warning) = (*storage_warning).clone() {
                <Alert r#type={AlertType::Warning} title={warning} inline={true}>
                </Alert>
            }

            // Status display
            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading topics..."}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                        <Button onclick={on_dismiss_error} variant={ButtonVariant::Link}>
                            {"Dismiss"}
                        </Button>
                    </div>
                },
                AppState::LoadFailed(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            // Topics
            <div class="input-row">
                <input
                    type="text"
                    ref={topic_input_ref}
                    placeholder="New topic name"
                    value={(*topic_input).clone()}
                    oninput={on_topic_input}
                    onkeydown={on_enter(add_topic.clone())}
                    disabled={is_busy}
                    class="text-input"
                />
                <Button onclick={add_topic.reform(|_: MouseEvent| ())} disabled={is_busy}>
                    {"Add Topic"}
                </Button>
            </div>

            <TopicList
                topics={book.topics.clone()}
                selected={(*selected).clone()}
                on_select={on_select_topic}
                on_delete={on_delete_topic}
            />

            // Links of the selected topic
            if let Some(topic) = (*selected).clone() {
                <div class="links-section">
                    <div class="links-header">
                        <Button onclick={on_back} variant={ButtonVariant::Secondary} size={ButtonSize::Small}>
                            {"← Topics"}
                        </Button>
                        <h2 class="current-topic">{topic.clone()}</h2>
                    </div>

                    <div class="input-row">
                        <input
                            type="text"
                            placeholder="https://..."
                            value={(*link_input).clone()}
                            oninput={on_link_input}
                            onkeydown={on_enter(add_link.clone())}
                            class="text-input"
                        />
                        <Button onclick={add_link.reform(|_: MouseEvent| ())}>
                            {"Add Link"}
                        </Button>
                    </div>

                    <LinkList
                        links={book.links_for(&topic).to_vec()}
                        on_delete={on_delete_link}
                    />
                </div>
            }

            // Backup file transfer
            <div class="transfer-row">
                <Button onclick={on_export} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Export"}
                </Button>
                <Button onclick={on_import_click} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Import"}
                </Button>
                <input
                    type="file"
                    accept="application/json,.json"
                    ref={file_input_ref}
                    onchange={on_import_file}
                    style="display: none;"
                />
            </div>

            <p class="footer-popup">
                {format!("{} topics • {} links", book.topics.len(), book.link_count())}
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_locked_until_load_succeeds() {
        assert!(!AppState::Loading.allows_edits());
        assert!(!AppState::LoadFailed("Failed to load".to_string()).allows_edits());
    }

    #[test]
    fn test_edits_allowed_after_load() {
        assert!(AppState::Idle.allows_edits());
        // A failed save does not lock the popup; the loaded data is intact
        assert!(AppState::Error("Failed to save".to_string()).allows_edits());
    }
}
