use super::*;
use crate::test_support::{spawn_product_server, spawn_product_server_at};
use axum::http::StatusCode;
use serde_json::json;
use shared::domain::{Price, ProductId};

fn no_create() -> (StatusCode, serde_json::Value) {
    (StatusCode::NOT_FOUND, json!({}))
}

fn cup() -> NewProduct {
    NewProduct {
        title: "Cup".to_string(),
        description: "Ceramic".to_string(),
        price: Price::parse("5").expect("price"),
    }
}

#[tokio::test]
async fn list_products_returns_server_order() {
    let server = spawn_product_server(
        (
            StatusCode::OK,
            json!({ "data": [
                { "_id": "a1", "title": "Pen", "description": "Blue ink", "price": 1.5 },
                { "_id": "b2", "title": "Pad", "description": "A5", "price": 3 }
            ]}),
        ),
        no_create(),
    )
    .await
    .expect("spawn server");
    let service = HttpProductService::new(&server.url).expect("service");

    let products = service.list_products().await.expect("list");
    let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Pen", "Pad"]);
    assert_eq!(products[0].id, Some(ProductId("a1".to_string())));
}

#[tokio::test]
async fn list_products_honours_trailing_slash_setting() {
    let server = spawn_product_server_at(
        "/products/",
        (StatusCode::OK, json!({ "data": [] })),
        no_create(),
    )
    .await
    .expect("spawn server");

    let settings = ClientSettings {
        api_base_url: server.url.clone(),
        list_trailing_slash: true,
        ..ClientSettings::default()
    };
    let service = HttpProductService::from_settings(&settings).expect("service");
    assert!(service.list_products().await.expect("list").is_empty());
}

#[tokio::test]
async fn list_products_maps_non_success_status() {
    let server = spawn_product_server(
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })),
        no_create(),
    )
    .await
    .expect("spawn server");
    let service = HttpProductService::new(&server.url).expect("service");

    match service.list_products().await {
        Err(ServiceError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn list_products_reports_malformed_body() {
    let server = spawn_product_server((StatusCode::OK, json!({ "items": [] })), no_create())
        .await
        .expect("spawn server");
    let service = HttpProductService::new(&server.url).expect("service");

    let err = service.list_products().await.expect_err("must fail");
    assert!(matches!(err, ServiceError::Decode(_)), "unexpected: {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let service = HttpProductService::new(&format!("http://{addr}")).expect("service");
    let err = service.list_products().await.expect_err("must fail");
    assert!(matches!(err, ServiceError::Transport(_)), "unexpected: {err:?}");
}

#[tokio::test]
async fn create_product_posts_json_body() {
    let server = spawn_product_server(
        (StatusCode::OK, json!({ "data": [] })),
        (
            StatusCode::OK,
            json!({ "message": "Product added successfully!", "id": "42" }),
        ),
    )
    .await
    .expect("spawn server");
    let service = HttpProductService::new(&format!("{}/", server.url)).expect("service");

    let response = service.create_product(&cup()).await.expect("create");
    assert_eq!(response.message, "Product added successfully!");
    assert_eq!(response.id, Some(ProductId("42".to_string())));

    let creates = server.creates.lock().await;
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        creates[0].body,
        json!({ "title": "Cup", "description": "Ceramic", "price": 5 })
    );
}

#[tokio::test]
async fn create_product_maps_non_success_status() {
    let server = spawn_product_server(
        (StatusCode::OK, json!({ "data": [] })),
        (StatusCode::BAD_REQUEST, json!({ "message": "bad" })),
    )
    .await
    .expect("spawn server");
    let service = HttpProductService::new(&server.url).expect("service");

    match service.create_product(&cup()).await {
        Err(ServiceError::Status(status)) => assert_eq!(status.as_u16(), 400),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rejects_non_http_base_urls() {
    assert!(matches!(
        HttpProductService::new("ftp://example.com"),
        Err(ServiceError::InvalidUrl { .. })
    ));
    assert!(matches!(
        HttpProductService::new("not a url"),
        Err(ServiceError::InvalidUrl { .. })
    ));
}

#[test]
fn base_url_is_normalized() {
    let service = HttpProductService::new(" http://localhost:3000// ").expect("service");
    assert_eq!(service.base_url(), "http://localhost:3000");
    assert_eq!(service.list_url(), "http://localhost:3000/products");
    assert_eq!(
        service.create_url(),
        "http://localhost:3000/products/addproduct"
    );
}
