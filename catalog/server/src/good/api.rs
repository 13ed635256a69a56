use crate::error::{CatalogError, CatalogJson, CatalogPath, ErrorResponse, NotFoundResponse};
use crate::good::{Good, GoodIn, GoodService};
use crate::web::{CatalogState, MessageResponse};
use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

/// Handler for GET /goods/ - Returns all goods.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/goods/",
    responses(
        (status = 200, description = "Successfully retrieved goods", body = [Good]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goods"
)]
pub async fn get_goods_handler(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Good>>, CatalogError> {
    tracing::info!("Handled GET request for all goods");
    let goods = GoodService::new(&state.db).get_all().await?;
    Ok(Json(goods))
}

/// Handler for GET /goods/{good_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/goods/{good_id}",
    params(("good_id" = i32, Path, description = "ID of the good")),
    responses(
        (status = 200, description = "Successfully retrieved good", body = Good),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Good not found", body = NotFoundResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goods"
)]
pub async fn get_good_handler(
    State(state): State<CatalogState>,
    CatalogPath(good_id): CatalogPath<i32>,
) -> Result<Json<Good>, CatalogError> {
    tracing::info!("Handled GET request for good {}", good_id);
    let good = GoodService::new(&state.db).get_by_id(good_id).await?;
    Ok(Json(good))
}

/// Handler for POST /goods/.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/goods/",
    request_body = GoodIn,
    responses(
        (status = 200, description = "Successfully created good", body = Good),
        (status = 422, description = "Invalid good fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goods"
)]
pub async fn create_good_handler(
    State(state): State<CatalogState>,
    CatalogJson(payload): CatalogJson<GoodIn>,
) -> Result<Json<Good>, CatalogError> {
    tracing::info!("Handled POST request for a new good");
    let good = GoodService::new(&state.db).create(payload).await?;
    Ok(Json(good))
}

/// Handler for PUT /goods/{good_id}.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/goods/{good_id}",
    params(("good_id" = i32, Path, description = "ID of the good")),
    request_body = GoodIn,
    responses(
        (status = 200, description = "Good replaced", body = Good),
        (status = 422, description = "Invalid good fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goods"
)]
pub async fn update_good_handler(
    State(state): State<CatalogState>,
    CatalogPath(good_id): CatalogPath<i32>,
    CatalogJson(payload): CatalogJson<GoodIn>,
) -> Result<Json<Good>, CatalogError> {
    tracing::info!("Handled PUT request for good {}", good_id);
    let good = GoodService::new(&state.db).update(good_id, payload).await?;
    Ok(Json(good))
}

/// Handler for DELETE /goods/{good_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/goods/{good_id}",
    params(("good_id" = i32, Path, description = "ID of the good")),
    responses(
        (status = 200, description = "Good deleted", body = MessageResponse),
        (status = 422, description = "Good is still referenced by an order", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goods"
)]
pub async fn delete_good_handler(
    State(state): State<CatalogState>,
    CatalogPath(good_id): CatalogPath<i32>,
) -> Result<Json<MessageResponse>, CatalogError> {
    tracing::info!("Handled DELETE request for good {}", good_id);
    GoodService::new(&state.db).delete(good_id).await?;
    Ok(Json(MessageResponse::new("One of Goods are deleted!")))
}

/// Creates and returns the goods API router.
pub fn create_api_router(state: CatalogState) -> Router {
    Router::new()
        .route("/goods/", get(get_goods_handler).post(create_good_handler))
        .route(
            "/goods/{good_id}",
            get(get_good_handler)
                .put(update_good_handler)
                .delete(delete_good_handler),
        )
        .with_state(state)
}
