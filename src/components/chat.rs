use leptos::ev;
use leptos::prelude::*;

use crate::models::{ChatMessage, Sender};
use crate::state::AppState;

/// Chat pane with the message log and input row.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let ui = state.ui;

    view! {
        <section class="chat-panel">
            <div class="messages-container">
                {move || {
                    if ui.with(|ui| ui.messages.is_empty()) {
                        view! {
                            <div class="empty-state">"Ask the agent to manage your tasks"</div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <For
                                each=move || {
                                    ui.with(|ui| ui.messages.clone())
                                        .into_iter()
                                        .enumerate()
                                        .collect::<Vec<_>>()
                                }
                                key=|(idx, _)| *idx
                                let:entry
                            >
                                <MessageBubble message=entry.1 />
                            </For>
                        }
                            .into_any()
                    }
                }}
            </div>
            <ChatInput />
        </section>
    }
}

/// A single chat bubble, styled by sender.
#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let css_class = match message.sender {
        Sender::User => "message user",
        Sender::Agent => "message agent",
    };

    view! {
        <div class=css_class>
            <div class="sender-label">{message.sender.as_str()}</div>
            <div class="message-text">{message.text}</div>
        </div>
    }
}

/// Input row. Enter sends, Shift+Enter inserts a newline; blank input is
/// dropped before it reaches the state layer.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let send = move || {
        let text = input.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        set_input.set(String::new());
        state.send_chat(text);
    };

    let send_on_key = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send_on_key();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Type your message…"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
