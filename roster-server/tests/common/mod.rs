//! Shared helpers for API tests: a router over a throwaway RocksDB store

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use roster_server::db::DbService;
use roster_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.db");
        let path = path.to_str().unwrap().to_string();

        let config = Config::with_overrides(path.clone(), 0);
        let service = DbService::new(&path, "test", "test").await.unwrap();
        let state = ServerState::new(config, service.db);

        Self {
            router: build_app().with_state(state),
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, None)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request(Method::DELETE, uri, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, Some(body))).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::PUT, uri, Some(body))).await
    }

    /// Create an employee and return its id
    pub async fn create_employee(&self, name: &str, email: &str) -> String {
        let (status, body) = self
            .post("/api/employee", employee(name, email))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// A complete, valid employee record
pub fn employee(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": "+1-555-0100",
        "salary": 52000,
        "department": "Engineering",
        "position": "Developer",
        "dateOfBirth": "1990-04-12",
        "address": "12 Main St",
        "city": "Springfield",
        "country": "USA"
    })
}

/// A complete, valid task record
pub fn task(title: &str, employee_id: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "employeeId": employee_id
    })
}
