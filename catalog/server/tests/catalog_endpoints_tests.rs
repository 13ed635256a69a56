use axum::http::{Method, StatusCode};
use catalog_server::good::Good;
use catalog_server::order::Order;
use catalog_server::user::{User, UserService};
use chrono::DateTime;
use insta::assert_snapshot;
use serde_json::json;

mod common;

use common::{send, setup_app};

fn user_body() -> serde_json::Value {
    json!({
        "first_name": "Ivan",
        "second_name": "Petrov",
        "email": "ivan@example.com",
        "password": "qwerty"
    })
}

fn good_body(price: f64) -> serde_json::Value {
    json!({"title": "Lamp", "description": "Desk lamp", "price": price})
}

#[tokio::test]
async fn can_check_health_endpoint() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn can_create_list_and_get_users() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, created) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    assert_eq!(status, StatusCode::OK);
    let created: User = serde_json::from_value(created).unwrap();
    assert_eq!(created.email, "ivan@example.com");

    let (status, listed) = send(&app, Method::GET, "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<User> = serde_json::from_value(listed).unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let (status, fetched) = send(&app, Method::GET, &format!("/users/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<User>(fetched).unwrap(), created);
}

#[tokio::test]
async fn can_reject_user_with_invalid_email() {
    let (app, state) = setup_app().await.expect("Failed to setup test context");
    let mut body = user_body();
    body["email"] = json!("not-an-email");

    let (status, response) = send(&app, Method::POST, "/users/", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "VALIDATION_FAILED");
    assert_eq!(response["fields"][0]["field"], "email");
    assert!(UserService::new(&state.db).get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn can_report_missing_user_with_sentinel() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, response) = send(&app, Method::GET, "/users/31", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_snapshot!(response.to_string(), @r#"{"response":"user_id Not found!"}"#);
}

#[tokio::test]
async fn can_update_user_and_echo_path_id() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, created) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let created: User = serde_json::from_value(created).unwrap();
    let mut replacement = user_body();
    replacement["first_name"] = json!("Pyotr");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", created.id),
        Some(replacement),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: User = serde_json::from_value(updated).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name, "Pyotr");
}

#[tokio::test]
async fn can_reject_invalid_user_update_and_keep_stored_row() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, created) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let created: User = serde_json::from_value(created).unwrap();
    let mut replacement = user_body();
    replacement["email"] = json!("bad");

    let (status, response) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", created.id),
        Some(replacement),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "VALIDATION_FAILED");
    assert_eq!(response["fields"][0]["field"], "email");
    let (_, fetched) = send(&app, Method::GET, &format!("/users/{}", created.id), None).await;
    assert_eq!(serde_json::from_value::<User>(fetched).unwrap(), created);
}

#[tokio::test]
async fn can_reject_non_numeric_id_as_json() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    for uri in ["/users/abc", "/goods/abc", "/orders/abc"] {
        let (status, response) = send(&app, Method::GET, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response["error"], "INVALID_PATH", "{uri}");
        assert!(response["message"].is_string(), "{uri}");
    }

    let (status, response) = send(&app, Method::DELETE, "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "INVALID_PATH");
}

#[tokio::test]
async fn can_confirm_delete_whether_or_not_row_exists() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, created) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let created: User = serde_json::from_value(created).unwrap();

    let (status, first) = send(&app, Method::DELETE, &format!("/users/{}", created.id), None).await;
    let (second_status, second) =
        send(&app, Method::DELETE, &format!("/users/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_snapshot!(first.to_string(), @r#"{"message":"User deleted!"}"#);
    assert_eq!(first, second);
}

#[tokio::test]
async fn can_enforce_price_lower_bound_over_http() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (rejected, response) = send(&app, Method::POST, "/goods/", Some(good_body(0.0))).await;
    let (accepted, _) = send(&app, Method::POST, "/goods/", Some(good_body(1.0))).await;

    assert_eq!(rejected, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["fields"][0]["field"], "price");
    assert_eq!(accepted, StatusCode::OK);
}

#[tokio::test]
async fn can_round_trip_good_over_http() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (_, created) = send(&app, Method::POST, "/goods/", Some(good_body(250.75))).await;
    let created: Good = serde_json::from_value(created).unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/goods/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Good>(fetched).unwrap(), created);
}

#[tokio::test]
async fn can_list_and_update_goods() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, lamp) = send(&app, Method::POST, "/goods/", Some(good_body(12.0))).await;
    let (_, chair) = send(&app, Method::POST, "/goods/", Some(good_body(30.0))).await;
    let lamp: Good = serde_json::from_value(lamp).unwrap();
    let chair: Good = serde_json::from_value(chair).unwrap();

    let (status, listed) = send(&app, Method::GET, "/goods/", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut listed: Vec<Good> = serde_json::from_value(listed).unwrap();
    listed.sort_by_key(|good| good.id);
    assert_eq!(listed, vec![lamp.clone(), chair]);

    let replacement = json!({"title": "Floor lamp", "description": "Tall lamp", "price": 45.5});
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/goods/{}", lamp.id),
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Good = serde_json::from_value(updated).unwrap();
    assert_eq!(updated.id, lamp.id);
    assert_eq!(updated.title, "Floor lamp");

    let (_, fetched) = send(&app, Method::GET, &format!("/goods/{}", lamp.id), None).await;
    assert_eq!(serde_json::from_value::<Good>(fetched).unwrap(), updated);
}

#[tokio::test]
async fn can_reject_good_update_below_price_bound() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, created) = send(&app, Method::POST, "/goods/", Some(good_body(8.0))).await;
    let created: Good = serde_json::from_value(created).unwrap();

    let (status, response) = send(
        &app,
        Method::PUT,
        &format!("/goods/{}", created.id),
        Some(good_body(0.0)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["fields"][0]["field"], "price");
    let (_, fetched) = send(&app, Method::GET, &format!("/goods/{}", created.id), None).await;
    assert_eq!(serde_json::from_value::<Good>(fetched).unwrap(), created);
}

#[tokio::test]
async fn can_confirm_good_deletion() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, response) = send(&app, Method::DELETE, "/goods/5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_snapshot!(response.to_string(), @r#"{"message":"One of Goods are deleted!"}"#);
}

#[tokio::test]
async fn can_create_and_update_order() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, user) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;
    let order_body = json!({
        "date": "2024-05-01T12:30:00Z",
        "status": false,
        "user_id": user["id"],
        "goods_id": good["id"]
    });

    let (status, created) = send(&app, Method::POST, "/orders/", Some(order_body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let created: Order = serde_json::from_value(created).unwrap();
    assert!(!created.status);

    let mut shipped = order_body;
    shipped["status"] = json!(true);
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/orders/{}", created.id),
        Some(shipped),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send(&app, Method::GET, &format!("/orders/{}", created.id), None).await;
    let fetched: Order = serde_json::from_value(fetched).unwrap();
    assert_eq!(serde_json::from_value::<Order>(updated).unwrap(), fetched);
    assert!(fetched.status);
}

#[tokio::test]
async fn can_accept_order_date_without_offset_as_utc() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, user) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({
            "date": "2024-05-01T12:30:00",
            "status": true,
            "user_id": user["id"],
            "goods_id": good["id"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created: Order = serde_json::from_value(created).unwrap();
    let expected = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z").unwrap();
    assert_eq!(created.date, expected);
    let (_, fetched) = send(&app, Method::GET, &format!("/orders/{}", created.id), None).await;
    assert_eq!(serde_json::from_value::<Order>(fetched).unwrap().date, expected);
}

#[tokio::test]
async fn can_echo_order_offset_on_create_like_update() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, user) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;
    let order_body = json!({
        "date": "2024-05-01T12:30:00+03:00",
        "status": false,
        "user_id": user["id"],
        "goods_id": good["id"]
    });

    let (_, created) = send(&app, Method::POST, "/orders/", Some(order_body.clone())).await;
    let created: Order = serde_json::from_value(created).unwrap();
    let (_, updated) = send(
        &app,
        Method::PUT,
        &format!("/orders/{}", created.id),
        Some(order_body),
    )
    .await;
    let updated: Order = serde_json::from_value(updated).unwrap();

    assert_eq!(created.date.offset().local_minus_utc(), 3 * 3600);
    assert_eq!(created, updated);
}

#[tokio::test]
async fn can_delete_order_and_report_it_missing() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, user) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({
            "date": "2024-05-01T12:30:00Z",
            "status": true,
            "user_id": user["id"],
            "goods_id": good["id"]
        })),
    )
    .await;
    let uri = format!("/orders/{}", created["id"]);

    let (status, response) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_snapshot!(response.to_string(), @r#"{"message":"Order are deleted!"}"#);

    let (status, response) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_snapshot!(response.to_string(), @r#"{"response":"order_id Not found!"}"#);
}

#[tokio::test]
async fn can_reject_order_referencing_unknown_user() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;

    let (status, response) = send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({
            "date": "2024-05-01T12:30:00Z",
            "status": true,
            "user_id": 999,
            "goods_id": good["id"]
        })),
    )
    .await;
    let (_, orders) = send(&app, Method::GET, "/orders/", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "FOREIGN_KEY_VIOLATION");
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn can_reject_order_with_malformed_date_and_status() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, response) = send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({"date": "yesterday", "status": true, "user_id": 1, "goods_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "INVALID_BODY");
    assert!(response["message"].as_str().unwrap().contains("date"));

    let (status, response) = send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({"date": "2024-05-01T12:30:00Z", "status": "maybe", "user_id": 1, "goods_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["message"].as_str().unwrap().contains("status"));
}

#[tokio::test]
async fn can_refuse_to_delete_user_with_orders() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");
    let (_, user) = send(&app, Method::POST, "/users/", Some(user_body())).await;
    let (_, good) = send(&app, Method::POST, "/goods/", Some(good_body(5.0))).await;
    send(
        &app,
        Method::POST,
        "/orders/",
        Some(json!({
            "date": "2024-05-01T12:30:00Z",
            "status": true,
            "user_id": user["id"],
            "goods_id": good["id"]
        })),
    )
    .await;

    let (status, response) = send(&app, Method::DELETE, &format!("/users/{}", user["id"]), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "FOREIGN_KEY_VIOLATION");
}

#[tokio::test]
async fn can_serve_openapi_document() {
    let (app, _) = setup_app().await.expect("Failed to setup test context");

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/orders/{order_id}"].is_object());
}
