use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{ChatMessage, Sender, ServerEvent, Task, TaskStatus};
use crate::ws::{self, ChatSocket};

/// Per-view chat state: the append-only message log plus the flag telling
/// the dashboard its task list is stale.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub messages: Vec<ChatMessage>,
    pub tasks_need_refresh: bool,
}

impl Default for UiState {
    /// The flag starts set so the dashboard loads on first mount.
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            tasks_need_refresh: true,
        }
    }
}

/// Everything that can move `UiState` forward.
#[derive(Clone, Debug)]
pub enum UiAction {
    /// Text the user submitted from the chat input.
    UserInput(String),
    /// Event pushed over the chat socket.
    Server(ServerEvent),
    /// The dashboard finished (or gave up on) a task reload.
    TasksRefreshed,
}

/// Single transition function for the per-view state. Side effects (socket
/// sends, fetches) stay with the callers.
pub fn reduce(state: &mut UiState, action: UiAction) {
    match action {
        UiAction::UserInput(text) => {
            state.messages.push(ChatMessage {
                sender: Sender::User,
                text,
            });
        }
        UiAction::Server(ServerEvent::Refresh) => {
            state.tasks_need_refresh = true;
        }
        UiAction::Server(ServerEvent::TaskList { tasks }) => {
            state.messages.push(ChatMessage {
                sender: Sender::Agent,
                text: format_task_list(&tasks),
            });
        }
        UiAction::Server(ServerEvent::AgentResponse { content }) => {
            state.messages.push(ChatMessage {
                sender: Sender::Agent,
                text: content,
            });
        }
        UiAction::Server(ServerEvent::Unknown) => {}
        UiAction::TasksRefreshed => {
            state.tasks_need_refresh = false;
        }
    }
}

/// One bullet per task, the way the agent reports filtered results in chat.
fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "📋 Filtered Tasks:\nNo tasks found.".to_string();
    }
    let bullets: Vec<String> = tasks
        .iter()
        .map(|t| format!("• {} ({}, {})", t.title, t.status, t.priority))
        .collect();
    format!("📋 Filtered Tasks:\n{}", bullets.join("\n"))
}

/// Shared application state, provided via Leptos context.
#[derive(Clone)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub tasks: ReadSignal<Vec<Task>>,
    pub loading: ReadSignal<bool>,
    pub ui: ReadSignal<UiState>,

    set_tasks: WriteSignal<Vec<Task>>,
    set_loading: WriteSignal<bool>,
    set_ui: WriteSignal<UiState>,

    /// Chat connection for the lifetime of the view; `None` if connecting
    /// failed.
    socket: StoredValue<Option<ChatSocket>, LocalStorage>,
    /// Generation stamp of the newest task fetch; stale completions bail out.
    fetch_generation: StoredValue<u64>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (tasks, set_tasks) = signal(Vec::<Task>::new());
        let (loading, set_loading) = signal(false);
        let (ui, set_ui) = signal(UiState::default());

        let state = Self {
            tasks,
            loading,
            ui,
            set_tasks,
            set_loading,
            set_ui,
            socket: StoredValue::new_local(None),
            fetch_generation: StoredValue::new(0),
        };

        provide_context(state.clone());
        state
    }

    /// Run one reducer step.
    pub fn dispatch(&self, action: UiAction) {
        self.set_ui.update(|ui| reduce(ui, action));
    }

    /// Open the chat socket and route its events through the reducer.
    pub fn connect(&self) {
        let state = self.clone();
        match ws::connect(move |event| state.dispatch(UiAction::Server(event))) {
            Ok(socket) => self.socket.set_value(Some(socket)),
            Err(e) => log::error!("Failed to open chat socket: {e}"),
        }
    }

    /// Close the chat socket (view unmount).
    pub fn disconnect(&self) {
        self.socket.with_value(|socket| {
            if let Some(socket) = socket {
                socket.close();
            }
        });
        self.socket.set_value(None);
    }

    /// Append the user's line to the log and forward it verbatim over the
    /// socket. The send is silently dropped if the connection never opened.
    pub fn send_chat(&self, text: String) {
        self.dispatch(UiAction::UserInput(text.clone()));
        self.socket.with_value(|socket| {
            if let Some(socket) = socket {
                socket.send(&text);
            }
        });
    }

    /// Replace the local task list from the backend. Whatever the outcome,
    /// the newest in-flight fetch clears the loading flag and acknowledges
    /// the refresh; a superseded fetch is discarded wholesale.
    pub fn refresh_tasks(&self) {
        let generation = self.fetch_generation.get_value() + 1;
        self.fetch_generation.set_value(generation);
        self.set_loading.set(true);

        let state = self.clone();
        spawn_local(async move {
            let result = api::fetch_tasks().await;
            if state.fetch_generation.get_value() != generation {
                log::debug!("Discarding superseded task fetch (generation {generation})");
                return;
            }
            match result {
                Ok(tasks) => state.set_tasks.set(tasks),
                Err(e) => log::error!("Error fetching tasks: {e}"),
            }
            state.set_loading.set(false);
            state.dispatch(UiAction::TasksRefreshed);
        });
    }

    /// Flip a task between done and not-done, then resynchronize. No
    /// optimistic update; a failed write just shows the old state again
    /// after the refetch.
    pub fn toggle_task(&self, id: i64, current: TaskStatus) {
        let state = self.clone();
        spawn_local(async move {
            if let Err(e) = api::update_task_status(id, current.toggled()).await {
                log::error!("Failed to update task status: {e}");
            }
            state.refresh_tasks();
        });
    }

    /// Delete a task, then resynchronize.
    pub fn delete_task(&self, id: i64) {
        let state = self.clone();
        spawn_local(async move {
            if let Err(e) = api::delete_task(id).await {
                log::error!("Failed to delete task: {e}");
            }
            state.refresh_tasks();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn task(title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            status,
            priority,
            due_date: None,
        }
    }

    fn settled() -> UiState {
        UiState {
            messages: Vec::new(),
            tasks_need_refresh: false,
        }
    }

    #[test]
    fn test_initial_state_requests_a_load() {
        let ui = UiState::default();
        assert!(ui.tasks_need_refresh);
        assert!(ui.messages.is_empty());
    }

    #[test]
    fn test_user_input_appends_verbatim() {
        let mut ui = settled();
        reduce(&mut ui, UiAction::UserInput("add a task".to_string()));
        assert_eq!(
            ui.messages,
            vec![ChatMessage {
                sender: Sender::User,
                text: "add a task".to_string()
            }]
        );
        assert!(!ui.tasks_need_refresh);
    }

    #[test]
    fn test_refresh_event_sets_flag_without_chat_message() {
        let mut ui = settled();
        reduce(&mut ui, UiAction::Server(ServerEvent::Refresh));
        assert!(ui.tasks_need_refresh);
        assert!(ui.messages.is_empty());
    }

    #[test]
    fn test_agent_response_appends_one_agent_message() {
        let mut ui = settled();
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::AgentResponse {
                content: "hi".to_string(),
            }),
        );
        assert_eq!(
            ui.messages,
            vec![ChatMessage {
                sender: Sender::Agent,
                text: "hi".to_string()
            }]
        );
        assert!(!ui.tasks_need_refresh);
    }

    #[test]
    fn test_task_list_formats_one_bullet_per_task() {
        let mut ui = settled();
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::TaskList {
                tasks: vec![task("A", TaskStatus::Todo, TaskPriority::Low)],
            }),
        );
        assert_eq!(ui.messages.len(), 1);
        assert_eq!(ui.messages[0].sender, Sender::Agent);
        assert_eq!(ui.messages[0].text, "📋 Filtered Tasks:\n• A (todo, low)");
    }

    #[test]
    fn test_task_list_joins_bullets_with_newlines() {
        let mut ui = settled();
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::TaskList {
                tasks: vec![
                    task("A", TaskStatus::Todo, TaskPriority::Low),
                    task("B", TaskStatus::Done, TaskPriority::High),
                ],
            }),
        );
        assert_eq!(
            ui.messages[0].text,
            "📋 Filtered Tasks:\n• A (todo, low)\n• B (done, high)"
        );
    }

    #[test]
    fn test_empty_task_list_reports_none_found() {
        let mut ui = settled();
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::TaskList { tasks: Vec::new() }),
        );
        assert_eq!(ui.messages[0].text, "📋 Filtered Tasks:\nNo tasks found.");
    }

    #[test]
    fn test_unknown_event_changes_nothing() {
        let mut ui = settled();
        reduce(&mut ui, UiAction::Server(ServerEvent::Unknown));
        assert_eq!(ui, settled());
    }

    #[test]
    fn test_refresh_ack_clears_the_flag() {
        let mut ui = UiState::default();
        assert!(ui.tasks_need_refresh);
        reduce(&mut ui, UiAction::TasksRefreshed);
        assert!(!ui.tasks_need_refresh);
        // idempotent when already clear
        reduce(&mut ui, UiAction::TasksRefreshed);
        assert!(!ui.tasks_need_refresh);
    }

    #[test]
    fn test_log_is_append_only_across_a_session() {
        let mut ui = settled();
        reduce(&mut ui, UiAction::UserInput("list my tasks".to_string()));
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::TaskList { tasks: Vec::new() }),
        );
        reduce(
            &mut ui,
            UiAction::Server(ServerEvent::AgentResponse {
                content: "done".to_string(),
            }),
        );
        assert_eq!(ui.messages.len(), 3);
        assert_eq!(ui.messages[0].sender, Sender::User);
        assert_eq!(ui.messages[1].sender, Sender::Agent);
        assert_eq!(ui.messages[2].sender, Sender::Agent);
    }
}
