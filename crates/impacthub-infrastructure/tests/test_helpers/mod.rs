#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use impacthub_domain::session::{Session, SessionStore};
use impacthub_infrastructure::config::ClientConfig;
use impacthub_infrastructure::http::ApiClient;
use impacthub_infrastructure::persistence::{Database, InMemorySessionStore};

pub const STALE_ACCESS: &str = "stale-access";
pub const FRESH_ACCESS: &str = "fresh-access";
pub const VALID_REFRESH: &str = "refresh-1";

/// Scriptable stand-in for the ImpactHub REST backend
pub struct FakeBackend {
    valid_tokens: Mutex<HashSet<String>>,
    pub refresh_succeeds: AtomicBool,
    /// Whether tokens issued by refresh are accepted afterwards
    pub accept_refreshed: AtomicBool,
    /// Answer refresh with an empty access token
    pub refresh_blank: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub project_calls: AtomicUsize,
    pub verify_bodies: Mutex<Vec<Value>>,
    pub order_bodies: Mutex<Vec<Value>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            valid_tokens: Mutex::new(HashSet::new()),
            refresh_succeeds: AtomicBool::new(true),
            accept_refreshed: AtomicBool::new(true),
            refresh_blank: AtomicBool::new(false),
            refresh_calls: AtomicUsize::new(0),
            project_calls: AtomicUsize::new(0),
            verify_bodies: Mutex::new(Vec::new()),
            order_bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn accept_token(&self, token: &str) {
        self.valid_tokens.lock().unwrap().insert(token.to_string());
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn project_count(&self) -> usize {
        self.project_calls.load(Ordering::SeqCst)
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| self.valid_tokens.lock().unwrap().contains(token))
            .unwrap_or(false)
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: Arc<FakeBackend>,
}

impl TestServer {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_api_base_url(self.base_url.clone())
            .expect("valid base url")
    }

    pub fn client(&self, store: Arc<dyn SessionStore>) -> ApiClient {
        ApiClient::new(&self.config(), store).expect("build client")
    }
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

async fn list_projects(State(backend): State<Arc<FakeBackend>>, headers: HeaderMap) -> Response {
    backend.project_calls.fetch_add(1, Ordering::SeqCst);
    if !backend.is_authorized(&headers) {
        return unauthorized("Given token not valid for any token type");
    }
    Json(json!([{
        "id": 1,
        "title": "Clean Water",
        "description": "Wells for villages",
        "impact_area": "Water",
        "supporters_count": 3,
        "is_supported": false
    }]))
    .into_response()
}

async fn get_project(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(json!({ "id": 1, "title": "Clean Water", "supporters_count": 4 })).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
    }
}

async fn support_project(State(backend): State<Arc<FakeBackend>>, headers: HeaderMap) -> Response {
    if !backend.is_authorized(&headers) {
        return unauthorized("Authentication credentials were not provided.");
    }
    Json(json!({ "status": "already supported" })).into_response()
}

async fn refresh_token(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // widen the window for concurrent callers
    tokio::time::sleep(Duration::from_millis(50)).await;

    let refresh_ok = backend.refresh_succeeds.load(Ordering::SeqCst)
        && body.get("refresh").and_then(Value::as_str) == Some(VALID_REFRESH);
    if !refresh_ok {
        return unauthorized("Token is invalid or expired");
    }

    if backend.refresh_blank.load(Ordering::SeqCst) {
        return Json(json!({ "access": "" })).into_response();
    }
    if backend.accept_refreshed.load(Ordering::SeqCst) {
        backend.accept_token(FRESH_ACCESS);
    }
    Json(json!({ "access": FRESH_ACCESS })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "asha" && body["password"] == "secret-pass" {
        return Json(json!({
            "access": STALE_ACCESS,
            "refresh": VALID_REFRESH,
            "user": { "id": 7, "username": "asha", "email": "asha@example.org" }
        }))
        .into_response();
    }
    unauthorized("No active account found with the given credentials")
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "username": ["A user with that username already exists."],
                "email": ["Enter a valid email address."]
            })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "user": { "id": 8, "username": body["username"], "email": body["email"] },
            "access": "ignored",
            "refresh": "ignored"
        })),
    )
        .into_response()
}

async fn verify_token(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    let token = body.get("token").and_then(Value::as_str).unwrap_or_default();
    if backend.valid_tokens.lock().unwrap().contains(token) {
        Json(json!({})).into_response()
    } else {
        unauthorized("Token is invalid or expired")
    }
}

async fn create_order(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    backend.order_bodies.lock().unwrap().push(body);
    Json(json!({
        "order_id": "order_abc",
        "razorpay_key": "rzp_test_key",
        "donation_id": 42
    }))
    .into_response()
}

async fn verify_payment(State(backend): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    let signed = body.get("razorpay_signature").and_then(Value::as_str) == Some("good-signature");
    backend.verify_bodies.lock().unwrap().push(body);
    if signed {
        Json(json!({ "status": "success" })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Payment verification failed" })),
        )
            .into_response()
    }
}

async fn my_donations() -> Response {
    Json(json!([{
        "id": 42,
        "project_title": "Clean Water",
        "amount": "250.50",
        "status": "paid",
        "created_at": "2026-01-05T10:00:00Z"
    }]))
    .into_response()
}

async fn checkout_script() -> &'static str {
    "window.Razorpay = function () {};"
}

/// Start the fake backend on an ephemeral port
pub async fn spawn_backend() -> TestServer {
    let backend = Arc::new(FakeBackend::new());

    let api = Router::new()
        .route("/projects/", get(list_projects))
        .route("/projects/{id}/", get(get_project))
        .route("/projects/{id}/support/", post(support_project))
        .route("/token/refresh/", post(refresh_token))
        .route("/token/verify/", post(verify_token))
        .route("/login/", post(login))
        .route("/register/", post(register))
        .route("/donations/create_order/", post(create_order))
        .route("/donations/verify_payment/", post(verify_payment))
        .route("/donations/my/", get(my_donations));

    let app = Router::new()
        .nest("/api", api)
        .route("/checkout.js", get(checkout_script))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer {
        base_url: format!("http://{}/api", address),
        backend,
    }
}

pub async fn store_with(access: &str, refresh: Option<&str>) -> Arc<InMemorySessionStore> {
    let session =
        Session::new(access.to_string(), refresh.map(str::to_string)).expect("create session");
    Arc::new(InMemorySessionStore::with_session(session))
}

pub async fn setup_in_memory_db() -> Database {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db
}
