//! Tests de forma de la API: envelope uniforme y comportamiento de las
//! capas HTTP, sobre un router de prueba sin base de datos.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const ROUTE_NOT_FOUND: &str = "Route does not exist.";
const NO_TOKEN_PROVIDED: &str = "No token provided.";

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn error_envelope(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "code": status.as_u16(),
            "success": false,
            "message": message,
        })),
    )
}

/// Gate de token como el del middleware real: sin Bearer -> 403
async fn require_bearer(request: Request<Body>, next: Next) -> Response {
    let has_token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer "))
        .unwrap_or(false);

    if !has_token {
        return error_envelope(StatusCode::FORBIDDEN, NO_TOKEN_PROVIDED).into_response();
    }
    next.run(request).await
}

fn create_test_app() -> Router {
    let protected = Router::new()
        .route(
            "/api/v1/project/all",
            get(|| async {
                Json(json!({
                    "code": 200,
                    "success": true,
                    "data": { "nb_hits": 0, "projects": [] },
                }))
            }),
        )
        .route_layer(middleware::from_fn(require_bearer));

    Router::new()
        .route(
            "/api/v1/user/login",
            post(|| async {
                error_envelope(StatusCode::BAD_REQUEST, "Some required fields are missing.")
            }),
        )
        .merge(protected)
        .fallback(|| async { error_envelope(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND) })
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], ROUTE_NOT_FOUND);
}

#[tokio::test]
async fn test_protected_route_without_token_is_forbidden() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/v1/project/all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], NO_TOKEN_PROVIDED);
}

#[tokio::test]
async fn test_protected_route_with_token_returns_data_envelope() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::get("/api/v1/project/all")
                .header(header::AUTHORIZATION, "Bearer some.jwt.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["nb_hits"], 0);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_login_with_missing_fields_is_bad_request() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::post("/api/v1/user/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}
