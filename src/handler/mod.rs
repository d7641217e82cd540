use crate::service::AppState;
use axum::routing::{delete, get, post};
use axum::Router;

pub mod api;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/listing", get(api::listing::handler))
        .route("/api/listing/all", get(api::listing::walk_handler))
        .route(
            "/api/links",
            get(api::links::fetch_handler).post(api::links::extract_handler),
        )
        .route(
            "/api/sites",
            get(api::sites::list_handler).post(api::sites::create_handler),
        )
        .route("/api/sites/import", post(api::sites::import_handler))
        .route("/api/sites/reorder", post(api::sites::reorder_handler))
        .route("/api/sites/:index", delete(api::sites::remove_handler))
        .route("/api/downloads", post(api::downloads::handler))
        .with_state(state)
}

#[cfg(test)]
pub async fn call(
    app: Router,
    req: axum::http::Request<axum::body::Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use tower::ServiceExt;

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    if body.is_empty() {
        return (status, serde_json::Value::Null);
    }
    (status, serde_json::from_slice(&body).unwrap())
}

#[cfg(test)]
pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}
