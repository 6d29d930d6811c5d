#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use problem_widgets::{config::Config, create_router, services::AppState};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const CSRF_TOKEN: &str = "test-csrf-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub csrf_token: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
}

impl MockResponse {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    /// The document serialised twice, as some platform views do.
    pub fn double_encoded(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: serde_json::to_string(&value.to_string()).unwrap(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the course platform.
pub struct MockPlatform {
    pub url: Url,
    state: Arc<MockState>,
}

impl MockPlatform {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the platform")
    }
}

pub async fn spawn_platform(responses: Vec<(&str, MockResponse)>) -> MockPlatform {
    init_tracing();

    let state = Arc::new(MockState {
        responses: responses
            .into_iter()
            .map(|(path, response)| (path.to_string(), response))
            .collect(),
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .fallback(platform_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockPlatform {
        url: Url::parse(&format!("http://{}/", addr)).unwrap(),
        state,
    }
}

async fn platform_handler(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        path: uri.path().to_string(),
        csrf_token: header_value("x-csrftoken"),
        cookie: header_value("cookie"),
        content_type: header_value("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    let csrf_ok = request.csrf_token.is_some();
    state.requests.lock().unwrap().push(request);

    if !csrf_ok {
        return (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "text/html")],
            "CSRF verification failed.".to_string(),
        );
    }

    match state.responses.get(uri.path()) {
        Some(response) => (
            response.status,
            [(header::CONTENT_TYPE, "application/json")],
            response.body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html")],
            "<h1>Not Found</h1>".to_string(),
        ),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn test_config(platform_url: &Url) -> Config {
    Config {
        platform_url: platform_url.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        timeout_secs: 5,
    }
}

pub fn create_test_app(platform: &MockPlatform) -> Router {
    let app_state = Arc::new(
        AppState::new(test_config(&platform.url)).expect("Failed to initialize test app state"),
    );
    create_router(app_state)
}
