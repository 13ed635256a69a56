use crate::error::{CatalogError, CatalogJson, CatalogPath, ErrorResponse, NotFoundResponse};
use crate::order::{Order, OrderIn, OrderService};
use crate::web::{CatalogState, MessageResponse};
use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

/// Handler for GET /orders/ - Returns all orders.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/orders/",
    responses(
        (status = 200, description = "Successfully retrieved orders", body = [Order]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn get_orders_handler(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Order>>, CatalogError> {
    tracing::info!("Handled GET request for all orders");
    let orders = OrderService::new(&state.db).get_all().await?;
    Ok(Json(orders))
}

/// Handler for GET /orders/{order_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "ID of the order")),
    responses(
        (status = 200, description = "Successfully retrieved order", body = Order),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Order not found", body = NotFoundResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn get_order_handler(
    State(state): State<CatalogState>,
    CatalogPath(order_id): CatalogPath<i32>,
) -> Result<Json<Order>, CatalogError> {
    tracing::info!("Handled GET request for order {}", order_id);
    let order = OrderService::new(&state.db).get_by_id(order_id).await?;
    Ok(Json(order))
}

/// Handler for POST /orders/.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/orders/",
    request_body = OrderIn,
    responses(
        (status = 200, description = "Successfully created order", body = Order),
        (status = 422, description = "Malformed order or unknown user/good", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn create_order_handler(
    State(state): State<CatalogState>,
    CatalogJson(payload): CatalogJson<OrderIn>,
) -> Result<Json<Order>, CatalogError> {
    tracing::info!("Handled POST request for a new order");
    let order = OrderService::new(&state.db).create(payload).await?;
    Ok(Json(order))
}

/// Handler for PUT /orders/{order_id}.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "ID of the order")),
    request_body = OrderIn,
    responses(
        (status = 200, description = "Order replaced", body = Order),
        (status = 422, description = "Malformed order or unknown user/good", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn update_order_handler(
    State(state): State<CatalogState>,
    CatalogPath(order_id): CatalogPath<i32>,
    CatalogJson(payload): CatalogJson<OrderIn>,
) -> Result<Json<Order>, CatalogError> {
    tracing::info!("Handled PUT request for order {}", order_id);
    let order = OrderService::new(&state.db).update(order_id, payload).await?;
    Ok(Json(order))
}

/// Handler for DELETE /orders/{order_id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "ID of the order")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn delete_order_handler(
    State(state): State<CatalogState>,
    CatalogPath(order_id): CatalogPath<i32>,
) -> Result<Json<MessageResponse>, CatalogError> {
    tracing::info!("Handled DELETE request for order {}", order_id);
    OrderService::new(&state.db).delete(order_id).await?;
    Ok(Json(MessageResponse::new("Order are deleted!")))
}

/// Creates and returns the orders API router.
pub fn create_api_router(state: CatalogState) -> Router {
    Router::new()
        .route("/orders/", get(get_orders_handler).post(create_order_handler))
        .route(
            "/orders/{order_id}",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .with_state(state)
}
