use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskError, TaskStore};

/// Body returned when a lookup by id finds nothing.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NotFoundResponse {
    pub response: String,
}

impl NotFoundResponse {
    pub fn task_id() -> Self {
        Self {
            response: "task_id Not found!".to_string(),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(NotFoundResponse::task_id())).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(rename = "API")]
    pub api: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: i64,
    pub task: Task,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDeletedResponse {
    pub task_deleted: i64,
    pub tasks: Vec<Task>,
}

/// Handler for GET /.
#[tracing::instrument]
pub async fn root_handler() -> Json<ApiInfo> {
    tracing::info!("Handled GET request for API info");
    Json(ApiInfo {
        api: "Tasks".to_string(),
    })
}

/// Handler for GET /tasks - Returns the whole task list.
#[tracing::instrument(skip(store))]
pub async fn get_tasks_handler(State(store): State<TaskStore>) -> Json<Vec<Task>> {
    tracing::info!("Handled GET request for all tasks");
    Json(store.list().await)
}

/// Handler for GET /tasks/{task_id}.
#[tracing::instrument(skip(store))]
pub async fn get_task_handler(
    State(store): State<TaskStore>,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskResponse>, TaskError> {
    tracing::info!("Handled GET request for task {}", task_id);
    let task = store.get(task_id).await?;
    Ok(Json(TaskResponse { task_id, task }))
}

/// Handler for POST /create_task.
#[tracing::instrument(skip(store))]
pub async fn create_task_handler(
    State(store): State<TaskStore>,
    Json(task): Json<Task>,
) -> Json<Vec<Task>> {
    tracing::info!("Handled POST request for task {}", task.id);
    Json(store.create(task).await)
}

/// Handler for PUT /change_task.
#[tracing::instrument(skip(store))]
pub async fn change_task_handler(
    State(store): State<TaskStore>,
    Json(task): Json<Task>,
) -> Result<Json<Vec<Task>>, TaskError> {
    tracing::info!("Handled PUT request for task = {:?}", task);
    store.update(task).await.map(Json)
}

/// Handler for DELETE /delete_task/{task_id}.
#[tracing::instrument(skip(store))]
pub async fn delete_task_handler(
    State(store): State<TaskStore>,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskDeletedResponse>, TaskError> {
    tracing::info!("Handled DELETE request for task id = {}", task_id);
    let (task_deleted, tasks) = store.delete(task_id).await?;
    Ok(Json(TaskDeletedResponse {
        task_deleted,
        tasks,
    }))
}

/// Creates and returns the JSON task router.
pub fn create_api_router(store: TaskStore) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/tasks", get(get_tasks_handler))
        .route("/tasks/{task_id}", get(get_task_handler))
        .route("/create_task", post(create_task_handler))
        .route("/change_task", put(change_task_handler))
        .route("/delete_task/{task_id}", delete(delete_task_handler))
        .with_state(store)
}
