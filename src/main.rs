mod api;
mod components;
mod models;
mod state;
mod ws;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatPanel;
use components::task_list::TaskList;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // One chat connection per mount; closed again when the view goes away.
    state.connect();
    on_cleanup({
        let state = state.clone();
        move || state.disconnect()
    });

    view! {
        <div class="app-container">
            <TaskList />
            <ChatPanel />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
