use utoipa::OpenApi;

use crate::error::{ErrorResponse, NotFoundResponse};
use crate::good::{Good, GoodIn};
use crate::order::{Order, OrderIn};
use crate::user::{User, UserIn};
use crate::validation::FieldError;
use crate::web::MessageResponse;

/// OpenAPI description of every catalog route.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::user::api::get_users_handler,
        crate::user::api::get_user_handler,
        crate::user::api::create_user_handler,
        crate::user::api::update_user_handler,
        crate::user::api::delete_user_handler,
        crate::good::api::get_goods_handler,
        crate::good::api::get_good_handler,
        crate::good::api::create_good_handler,
        crate::good::api::update_good_handler,
        crate::good::api::delete_good_handler,
        crate::order::api::get_orders_handler,
        crate::order::api::get_order_handler,
        crate::order::api::create_order_handler,
        crate::order::api::update_order_handler,
        crate::order::api::delete_order_handler,
    ),
    components(schemas(
        User,
        UserIn,
        Good,
        GoodIn,
        Order,
        OrderIn,
        MessageResponse,
        NotFoundResponse,
        ErrorResponse,
        FieldError
    )),
    tags(
        (name = "Users", description = "Registered users"),
        (name = "Goods", description = "Goods available for ordering"),
        (name = "Orders", description = "Orders linking a user to a good")
    )
)]
pub struct ApiDoc;
