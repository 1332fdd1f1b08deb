//! Test helpers for animaldb server integration tests
//!
//! - In-memory [`AnimalStore`] implementations, including stores that simulate
//!   a concurrent delete and an unreachable database
//! - A router wired to a temporary public directory
//! - Request builders for JSON, urlencoded and multipart bodies

#![allow(dead_code)]

use animaldb_server::{
    api::{self, AppState},
    config::{Config, UpdateImagePolicy},
    db::{AnimalStore, DbError, DbResult},
    models::{Animal, AnimalFields},
    storage::ImageStorage,
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

// ============================================================================
// Stores
// ============================================================================

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<i32, Animal>,
    last_id: i32,
}

/// Store keeping rows in a map, ids assigned like a SERIAL column
#[derive(Default)]
pub struct MemoryAnimalStore {
    state: Mutex<MemoryState>,
}

impl MemoryAnimalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Animal> {
        self.state.lock().unwrap().rows.values().cloned().collect()
    }

    pub fn insert(&self, name: &str, scientific: &str, location: &str, image: &str) -> Animal {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let animal = Animal {
            id: state.last_id,
            name: name.to_string(),
            scientific: scientific.to_string(),
            location: location.to_string(),
            image: image.to_string(),
        };
        state.rows.insert(animal.id, animal.clone());
        animal
    }
}

#[async_trait]
impl AnimalStore for MemoryAnimalStore {
    async fn list_all(&self) -> DbResult<Vec<Animal>> {
        Ok(self.rows())
    }

    async fn get_by_id(&self, id: i32) -> DbResult<Option<Animal>> {
        Ok(self.state.lock().unwrap().rows.get(&id).cloned())
    }

    async fn create(&self, fields: AnimalFields) -> DbResult<Animal> {
        Ok(self.insert(
            &fields.name,
            &fields.scientific,
            &fields.location,
            &fields.image.unwrap_or_default(),
        ))
    }

    async fn update(&self, id: i32, fields: AnimalFields) -> DbResult<u64> {
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(0);
        };
        row.name = fields.name;
        row.scientific = fields.scientific;
        row.location = fields.location;
        if let Some(image) = fields.image {
            row.image = image;
        }
        Ok(1)
    }

    async fn delete_by_id(&self, id: i32) -> DbResult<bool> {
        Ok(self.state.lock().unwrap().rows.remove(&id).is_some())
    }
}

/// Store whose rows vanish between the existence check and the delete
pub struct RacingDeleteStore {
    pub inner: MemoryAnimalStore,
}

#[async_trait]
impl AnimalStore for RacingDeleteStore {
    async fn list_all(&self) -> DbResult<Vec<Animal>> {
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: i32) -> DbResult<Option<Animal>> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, fields: AnimalFields) -> DbResult<Animal> {
        self.inner.create(fields).await
    }

    async fn update(&self, id: i32, fields: AnimalFields) -> DbResult<u64> {
        self.inner.update(id, fields).await
    }

    async fn delete_by_id(&self, _id: i32) -> DbResult<bool> {
        Ok(false)
    }
}

/// Store that fails every call, like a database that went away
pub struct UnreachableStore;

#[async_trait]
impl AnimalStore for UnreachableStore {
    async fn list_all(&self) -> DbResult<Vec<Animal>> {
        Err(DbError::backend("connection refused"))
    }

    async fn get_by_id(&self, _id: i32) -> DbResult<Option<Animal>> {
        Err(DbError::backend("connection refused"))
    }

    async fn create(&self, _fields: AnimalFields) -> DbResult<Animal> {
        Err(DbError::backend("connection refused"))
    }

    async fn update(&self, _id: i32, _fields: AnimalFields) -> DbResult<u64> {
        Err(DbError::backend("connection refused"))
    }

    async fn delete_by_id(&self, _id: i32) -> DbResult<bool> {
        Err(DbError::backend("connection refused"))
    }

    async fn health_check(&self) -> DbResult<()> {
        Err(DbError::backend("connection refused"))
    }
}

// ============================================================================
// Application
// ============================================================================

/// Router plus the temporary public directory it serves from
pub struct TestApp {
    pub router: Router,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn image_dir(&self) -> PathBuf {
        self.public_dir.path().join("img")
    }

    pub fn stored_images(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.image_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        TestResponse {
            status,
            content_type,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn setup_test_app(store: Arc<dyn AnimalStore>) -> TestApp {
    setup_test_app_with_policy(store, UpdateImagePolicy::Clear).await
}

pub async fn setup_test_app_with_policy(
    store: Arc<dyn AnimalStore>,
    policy: UpdateImagePolicy,
) -> TestApp {
    let public_dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.uploads.public_dir = public_dir.path().to_path_buf();
    config.uploads.update_image_policy = policy;

    let images = ImageStorage::init(config.uploads.image_dir()).await.unwrap();

    let router = api::create_router(AppState {
        store,
        images,
        config: Arc::new(config),
    });

    TestApp { router, public_dir }
}

// ============================================================================
// Requests
// ============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "animaldb-test-boundary";

/// Hand-built `multipart/form-data` body
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: Method, uri: &str) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}
