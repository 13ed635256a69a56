use crate::error::{CatalogError, CatalogJson, CatalogPath, ErrorResponse, NotFoundResponse};
use crate::user::{User, UserIn, UserService};
use crate::web::{CatalogState, MessageResponse};
use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

/// Handler for GET /users/ - Returns all users.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Successfully retrieved users", body = [User]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_users_handler(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<User>>, CatalogError> {
    tracing::info!("Handled GET request for all users");
    let users = UserService::new(&state.db).get_all().await?;
    Ok(Json(users))
}

/// Handler for GET /users/{user_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "Successfully retrieved user", body = User),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = NotFoundResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user_handler(
    State(state): State<CatalogState>,
    CatalogPath(user_id): CatalogPath<i32>,
) -> Result<Json<User>, CatalogError> {
    tracing::info!("Handled GET request for user {}", user_id);
    let user = UserService::new(&state.db).get_by_id(user_id).await?;
    Ok(Json(user))
}

/// Handler for POST /users/.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserIn,
    responses(
        (status = 200, description = "Successfully created user", body = User),
        (status = 422, description = "Invalid user fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user_handler(
    State(state): State<CatalogState>,
    CatalogJson(payload): CatalogJson<UserIn>,
) -> Result<Json<User>, CatalogError> {
    tracing::info!("Handled POST request for a new user");
    let user = UserService::new(&state.db).create(payload).await?;
    Ok(Json(user))
}

/// Handler for PUT /users/{user_id}.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "ID of the user")),
    request_body = UserIn,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 422, description = "Invalid user fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user_handler(
    State(state): State<CatalogState>,
    CatalogPath(user_id): CatalogPath<i32>,
    CatalogJson(payload): CatalogJson<UserIn>,
) -> Result<Json<User>, CatalogError> {
    tracing::info!("Handled PUT request for user {}", user_id);
    let user = UserService::new(&state.db).update(user_id, payload).await?;
    Ok(Json(user))
}

/// Handler for DELETE /users/{user_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i32, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 422, description = "User is still referenced by an order", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user_handler(
    State(state): State<CatalogState>,
    CatalogPath(user_id): CatalogPath<i32>,
) -> Result<Json<MessageResponse>, CatalogError> {
    tracing::info!("Handled DELETE request for user {}", user_id);
    UserService::new(&state.db).delete(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted!")))
}

/// Creates and returns the users API router.
pub fn create_api_router(state: CatalogState) -> Router {
    Router::new()
        .route("/users/", get(get_users_handler).post(create_user_handler))
        .route(
            "/users/{user_id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(state)
}
