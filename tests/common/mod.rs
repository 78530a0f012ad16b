//! Common test utilities and helpers

#![allow(dead_code)]

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use flowwatch_core::dashboard::{DisplayZone, PresentationFormatter};
use flowwatch_core::{DashboardState, ErrorRecord};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// What the fake feed answers and which query strings it saw
#[derive(Clone)]
pub struct FeedState {
    pub status: Arc<Mutex<StatusCode>>,
    pub body: Arc<Mutex<String>>,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl FeedState {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status: Arc::new(Mutex::new(status)),
            body: Arc::new(Mutex::new(body.into())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn respond_with(&self, status: StatusCode, body: impl Into<String>) {
        *self.status.lock().unwrap() = status;
        *self.body.lock().unwrap() = body.into();
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn serve_feed(State(state): State<FeedState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    state
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    let status = *state.status.lock().unwrap();
    let body = state.body.lock().unwrap().clone();
    (status, [("content-type", "application/json")], body)
}

/// Start a feed server on an ephemeral port, returns the feed URL
pub async fn spawn_feed(state: FeedState) -> String {
    let app = Router::new()
        .route("/errors", get(serve_feed))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Feed server failed");
    });

    format!("http://{}/errors", addr)
}

/// Write a feed body to a temp file
pub fn feed_file(body: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("errors.json");
    std::fs::write(&path, body).unwrap();
    (dir, path)
}

/// Fresh state rendering in UTC
pub fn utc_state(display_limit: usize) -> DashboardState {
    let utc = chrono::FixedOffset::east_opt(0).unwrap();
    let formatter = PresentationFormatter::new("critical", DisplayZone::Fixed(utc));
    DashboardState::new(formatter, display_limit)
}

/// Serialized feed body for records
pub fn feed_body(records: &[ErrorRecord]) -> String {
    serde_json::to_string(records).unwrap()
}

pub const SAMPLE_FEED: &str = r#"[
  {"id": "1", "workflow": "A", "node": "HTTP Request", "error_timestamp": "2025-07-22T14:19:00Z",
   "error_message": "timeout", "severity": "warning"},
  {"id": "2", "workflow": "A", "node": "Postgres", "error_timestamp": "2025-07-22T14:00:00Z",
   "error_message": "deadlock", "stack_trace": "l1\nl2\nl3\nl4"},
  {"id": "3", "workflow": "B", "node": "Postgres", "error_timestamp": "2025-07-22T13:00:00Z",
   "error_message": "refused", "severity": "error", "suggested_fix": ""}
]"#;
