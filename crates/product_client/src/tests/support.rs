//! In-process stand-in for the remote product API.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCreate {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct ServerState {
    list: (StatusCode, Value),
    create: (StatusCode, Value),
    creates: Arc<Mutex<Vec<RecordedCreate>>>,
}

pub(crate) struct ProductServer {
    pub url: String,
    pub creates: Arc<Mutex<Vec<RecordedCreate>>>,
}

async fn handle_list(State(state): State<ServerState>) -> (StatusCode, Json<Value>) {
    let (status, body) = state.list;
    (status, Json(body))
}

async fn handle_create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .creates
        .lock()
        .await
        .push(RecordedCreate { content_type, body });
    let (status, body) = state.create;
    (status, Json(body))
}

pub(crate) async fn spawn_product_server(
    list: (StatusCode, Value),
    create: (StatusCode, Value),
) -> anyhow::Result<ProductServer> {
    spawn_product_server_at("/products", list, create).await
}

pub(crate) async fn spawn_product_server_at(
    list_path: &str,
    list: (StatusCode, Value),
    create: (StatusCode, Value),
) -> anyhow::Result<ProductServer> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let creates = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        list,
        create,
        creates: creates.clone(),
    };
    let app = Router::new()
        .route(list_path, get(handle_list))
        .route("/products/addproduct", post(handle_create))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(ProductServer {
        url: format!("http://{addr}"),
        creates,
    })
}

/// Lists an empty catalog, but only after `delay`.
pub(crate) async fn spawn_slow_product_server(delay: Duration) -> anyhow::Result<ProductServer> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route(
        "/products",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(serde_json::json!({ "data": [] }))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(ProductServer {
        url: format!("http://{addr}"),
        creates: Arc::new(Mutex::new(Vec::new())),
    })
}
