//! Integration tests — build the router over an in-memory store and call the
//! trace resources with and without credentials.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use odc_api::{AppState, config::ApiConfig};
use odc_core::auth::jwt::issue_access_token;
use odc_core::models::auth::TokenClaims;
use odc_core::models::trace::Trace;
use odc_core::store::MemoryTraceStore;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn trace(id: &str, name: &str, kind: &str) -> Trace {
    Trace {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
    }
}

fn app_with(traces: Vec<Trace>) -> Router {
    let state = AppState::new(
        Arc::new(MemoryTraceStore::with_traces(traces)),
        ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "postgres://unused".into(),
            jwt_secret: SECRET.into(),
            max_connections: 1,
        },
    );
    odc_api::router(state)
}

fn app() -> Router {
    app_with(vec![
        trace("123", "Bitbrains (small)", "VM"),
        trace("solvinity", "Solvinity", "VM"),
        trace("askalon", "Askalon", "Workflow"),
    ])
}

fn bearer() -> String {
    let token = issue_access_token("user-1", None, Duration::minutes(5), SECRET.as_bytes())
        .expect("issue token");
    format!("Bearer {token}")
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("parse JSON")
    };
    (status, json)
}

#[tokio::test]
async fn list_returns_all_traces_in_name_order() {
    let (status, json) = send(app(), get("/traces", Some(&bearer()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "data": [
                { "_id": "askalon", "name": "Askalon", "type": "Workflow" },
                { "_id": "123", "name": "Bitbrains (small)", "type": "VM" },
                { "_id": "solvinity", "name": "Solvinity", "type": "VM" }
            ]
        })
    );
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_data() {
    let (status, json) = send(app_with(vec![]), get("/traces", Some(&bearer()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "data": [] }));
}

#[tokio::test]
async fn get_existing_trace() {
    let (status, json) = send(app(), get("/traces/123", Some(&bearer()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "data": { "_id": "123", "name": "Bitbrains (small)", "type": "VM" } })
    );
}

#[tokio::test]
async fn get_non_existing_trace_is_not_found() {
    let (status, json) = send(app(), get("/traces/1", Some(&bearer()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "Trace not found.");
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    for uri in ["/traces", "/traces/123"] {
        let (status, json) = send(app(), get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "Missing authorization header");
    }
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let (status, json) = send(app(), get("/traces", Some("Basic dXNlcjpwYXNz"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid authorization scheme");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let token = issue_access_token("user-1", None, Duration::minutes(5), b"other").unwrap();
    let auth = format!("Bearer {token}");
    let (status, json) = send(app(), get("/traces/123", Some(&auth))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid or expired token");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let now = chrono::Utc::now();
    let claims = TokenClaims {
        sub: "user-1".into(),
        email: None,
        exp: (now - Duration::hours(1)).timestamp(),
        iat: (now - Duration::hours(2)).timestamp(),
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    let auth = format!("Bearer {token}");
    let (status, json) = send(app(), get("/traces", Some(&auth))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid or expired token");
}

#[tokio::test]
async fn empty_bearer_token_is_unauthorized() {
    let (status, json) = send(app(), get("/traces/123", Some("Bearer "))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
    assert_eq!(json["message"], "Missing bearer token");
}

#[tokio::test]
async fn undecodable_trace_id_gets_json_error() {
    let resp = app()
        .oneshot(get("/traces/%FF", Some(&bearer())))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "{content_type}");

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&body).expect("parse JSON");
    assert_eq!(json["error"], "validation_error");
    assert!(json["message"].as_str().unwrap().contains("trace_id"));
}

#[tokio::test]
async fn unauthenticated_lookup_does_not_leak_existence() {
    let (found, _) = send(app(), get("/traces/123", None)).await;
    let (missing, _) = send(app(), get("/traces/1", None)).await;

    assert_eq!(found, StatusCode::UNAUTHORIZED);
    assert_eq!(missing, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn writes_are_not_routed() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/traces")
        .header(header::AUTHORIZATION, bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"_id":"x","name":"x","type":"VM"}"#))
        .unwrap();
    let (status, _) = send(app(), req).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
