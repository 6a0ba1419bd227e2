#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use todo_api::{
    application::auth_service::{AuthService, Credentials, ManualClock},
    http::routing::{self, AppState},
    infrastructure::token_registry::TokenRegistry,
};

pub const USER: &str = "admin";
pub const PASS: &str = "password";
pub const START_MS: i64 = 1_700_000_000_000;

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
}

pub fn app() -> TestApp {
    let clock = Arc::new(ManualClock::new(START_MS));
    let credentials = Credentials { username: USER.into(), password: PASS.into() };
    let auth = AuthService::new(credentials, "test-secret", TokenRegistry::new(), clock.clone());
    TestApp { router: routing::app(AppState::in_memory(auth)), clock }
}

pub fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    authorization: Option<&str>,
    body: Option<Body>,
) -> hyper::Response<Body> {
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let mut req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    if let Some(value) = authorization {
        req = req.header("authorization", value);
    }
    let req = match body {
        Some(body) => req.header("content-type", "application/json").body(body).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(res: hyper::Response<Body>) -> Vec<u8> {
    to_bytes(res.into_body(), 1024 * 1024).await.unwrap().to_vec()
}

pub async fn json(res: hyper::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}

pub async fn text(res: hyper::Response<Body>) -> String {
    String::from_utf8(body_bytes(res).await).unwrap()
}

/// Logs in and returns a ready-to-send `Authorization` value.
pub async fn bearer(app: &Router) -> String {
    let res = request(app, "POST", "/login", Some(&basic(USER, PASS)), None).await;
    assert_eq!(res.status(), 200);
    let body = json(res).await;
    format!("Bearer {}", body["token"].as_str().unwrap())
}

/// Sends `json` with a bearer token.
pub async fn call(
    app: &Router,
    token: &str,
    method: &str,
    path: &str,
    json: Option<serde_json::Value>,
) -> hyper::Response<Body> {
    request(app, method, path, Some(token), json.map(|j| Body::from(j.to_string()))).await
}
