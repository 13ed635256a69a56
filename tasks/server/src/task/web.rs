use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};

use crate::task::{Task, TaskStore};

/// Custom error type for task page rendering.
#[derive(Debug, thiserror::Error)]
pub enum TaskPageError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
}

impl axum::response::IntoResponse for TaskPageError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Failed to render task page: {}", self);
        let user_facing_error_message =
            "An unexpected error occurred while processing your request. Please try again later.";
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(
                "<h1>Internal Server Error</h1><p>{}</p>",
                user_facing_error_message
            )),
        )
            .into_response()
    }
}

#[derive(Template)]
#[template(path = "tasks.html")]
struct TasksTemplate {
    tasks: Vec<Task>,
}

impl TasksTemplate {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

/// Handler for GET /get_tasks - Renders the task list as an HTML table.
#[tracing::instrument(skip(store))]
async fn tasks_page_handler(State(store): State<TaskStore>) -> Result<Html<String>, TaskPageError> {
    let template = TasksTemplate::new(store.list().await);
    template.render().map(Html).map_err(TaskPageError::from)
}

/// Creates and returns the router serving the rendered task list.
pub fn create_task_page_router(store: TaskStore) -> Router {
    Router::new()
        .route("/get_tasks", get(tasks_page_handler))
        .with_state(store)
}
