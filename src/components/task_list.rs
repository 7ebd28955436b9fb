use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::models::{Task, TaskStatus};
use crate::state::AppState;

/// Task dashboard pane backed by the remote collection.
#[component]
pub fn TaskList() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Reload whenever the chat flow marks the list stale.
    {
        let state = state.clone();
        Effect::new(move |_| {
            if state.ui.with(|ui| ui.tasks_need_refresh) {
                state.refresh_tasks();
            }
        });
    }

    let tasks = state.tasks;
    let loading = state.loading;

    view! {
        <section class="task-panel">
            <h2 class="task-header">"📋 Tasks"</h2>
            {move || {
                if loading.get() {
                    view! { <p class="panel-note">"Loading..."</p> }.into_any()
                } else if tasks.with(|tasks| tasks.is_empty()) {
                    view! { <p class="panel-note">"No tasks available."</p> }.into_any()
                } else {
                    view! {
                        <ul class="task-list">
                            <For each=move || tasks.get() key=|task| task.id let:task>
                                <TaskRow task=task />
                            </For>
                        </ul>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// One dashboard row: completion checkbox, metadata lines, delete button.
#[component]
fn TaskRow(task: Task) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = task.id;
    let status = task.status;
    let done = status == TaskStatus::Done;

    let toggle = {
        let state = state.clone();
        move |_| state.toggle_task(id, status)
    };
    let remove = move |_| state.delete_task(id);

    view! {
        <li class="task-item">
            <div class="task-body">
                <label class="task-title-row">
                    <input type="checkbox" prop:checked=done on:change=toggle />
                    <span class="task-title" class:done=move || done>
                        {task.title.clone()}
                    </span>
                </label>
                <p class="task-meta">"Status: " {task.status.as_str()}</p>
                <p class="task-meta">"Priority: " {task.priority.as_str()}</p>
                {task
                    .due_date
                    .as_ref()
                    .map(|due| view! { <p class="task-meta">"Due: " {format_due(due)}</p> })}
            </div>
            <button class="delete-btn" on:click=remove>
                "Delete"
            </button>
        </li>
    }
}

/// Run a backend timestamp through the browser locale formatter.
fn format_due(raw: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
}
