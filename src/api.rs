use gloo_net::http::Request;

use crate::models::{Task, TaskStatus, TaskStatusUpdate};

/// Base URL of the backend API server.
const API_BASE: &str = "http://localhost:8000";

/// Fetches the full task collection.
pub async fn fetch_tasks() -> Result<Vec<Task>, String> {
    let resp = Request::get(&format!("{API_BASE}/api/tasks"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<Vec<Task>>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Applies a partial status update to one task.
pub async fn update_task_status(id: i64, status: TaskStatus) -> Result<(), String> {
    let body = TaskStatusUpdate { status };

    let resp = Request::put(&format!("{API_BASE}/api/tasks/{id}"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }
    Ok(())
}

/// Deletes one task by id.
pub async fn delete_task(id: i64) -> Result<(), String> {
    let resp = Request::delete(&format!("{API_BASE}/api/tasks/{id}"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }
    Ok(())
}

/// Returns the WebSocket URL for the chat endpoint.
pub fn ws_url() -> String {
    format!("ws://localhost:8000/ws/chat")
}
