use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod api;
pub mod web;

/// A single entry of the task list.
///
/// Ids are supplied by the caller; the store never assigns them.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
}

impl Task {
    pub fn new(id: i64, title: &str, description: Option<&str>, status: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            status: status.to_string(),
        }
    }
}

/// Error type for TaskStore operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    /// No task in the list carries the requested id.
    #[error("Task with ID {0} not found")]
    NotFound(i64),
}

/// Shared, ordered task list.
///
/// Every operation takes the lock exactly once, so a read-modify-write never
/// interleaves with another request.
#[derive(Clone, Debug, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    /// Creates a store holding the three demo tasks the service starts with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Task::new(1, "Cleaning", Some("The best Cleaning!"), "done"),
            Task::new(2, "Draw", Some("My new tatoo"), "todo"),
            Task::new(3, "Repair my table", Some("My poor table"), "in progress"),
        ])
    }

    /// Returns a snapshot of the whole list in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Returns the first task with the given id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Task, TaskError> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(TaskError::NotFound(id))
    }

    /// Appends a task and returns the updated list.
    ///
    /// Duplicate ids are accepted; lookups always resolve to the first match.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, task: Task) -> Vec<Task> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|existing| existing.id == task.id) {
            tracing::warn!("Appending task with duplicate ID {}", task.id);
        }
        tasks.push(task);
        tasks.clone()
    }

    /// Overwrites title, description and status of the first task matching `task.id`.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, task: Task) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.tasks.write().await;
        let existing = tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or(TaskError::NotFound(task.id))?;

        existing.title = task.title;
        existing.description = task.description;
        existing.status = task.status;
        Ok(tasks.clone())
    }

    /// Removes the first task with the given id, returning the id and the remaining list.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(i64, Vec<Task>), TaskError> {
        let mut tasks = self.tasks.write().await;
        let position = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;

        tasks.remove(position);
        Ok((id, tasks.clone()))
    }
}
