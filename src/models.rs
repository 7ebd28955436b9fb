use serde::{Deserialize, Serialize};

/// Raw frame the server sends when the dashboard should reload its tasks.
const REFRESH_SENTINEL: &str = "refresh_tasks";

/// Matches the backend `TaskStatus` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Status a checkbox toggle moves this task to: `done` flips back to
    /// `todo`, anything else completes.
    pub fn toggled(self) -> TaskStatus {
        if self == TaskStatus::Done {
            TaskStatus::Todo
        } else {
            TaskStatus::Done
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches the backend `TaskPriority` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches the backend `Task` model. The backend sends more fields than the
/// dashboard shows; serde drops the extras.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body for the partial status update endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

/// Who authored a chat line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "agent",
        }
    }
}

/// One line of the chat log. Never persisted; gone on page reload.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Event pushed by the server over the chat socket (internally tagged).
/// Tags outside the known set land on `Unknown`, which the reducer ignores.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "refresh")]
    Refresh,
    #[serde(rename = "task_list")]
    TaskList { tasks: Vec<Task> },
    #[serde(rename = "agent_response")]
    AgentResponse { content: String },
    #[serde(other)]
    Unknown,
}

impl ServerEvent {
    /// Decode one raw inbound frame. The refresh sentinel arrives as plain
    /// text, everything else as JSON; undecodable frames are logged and
    /// dropped.
    pub fn decode(frame: &str) -> Option<Self> {
        if frame == REFRESH_SENTINEL {
            return Some(ServerEvent::Refresh);
        }
        match serde_json::from_str(frame) {
            Ok(event) => Some(event),
            Err(e) => {
                log::error!("Error parsing chat frame: {e}");
                None
            }
        }
    }
}
