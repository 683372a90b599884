//! Notification endpoints, mounted under /api/notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::http::error::ErrorResponse;
use crate::http::server::AppState;
use crate::routes::resource::{self, Resource};

const NOTIFICATIONS: Resource = Resource {
    collection: "notifications",
    name: "notification",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).delete(remove))
        .route("/{id}/read", put(mark_read))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ErrorResponse> {
    resource::list(&state, NOTIFICATIONS, doc! {}).await
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    resource::create(&state, NOTIFICATIONS, payload).await
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ErrorResponse> {
    resource::fetch(&state, NOTIFICATIONS, &id).await
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::update(&state, NOTIFICATIONS, &id, doc! { "read": true }).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::remove(&state, NOTIFICATIONS, &id).await
}
