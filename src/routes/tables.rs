//! Table endpoints, mounted under /api/tables.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::http::error::ErrorResponse;
use crate::http::server::AppState;
use crate::routes::resource::{self, Resource};

const TABLES: Resource = Resource {
    collection: "tables",
    name: "table",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/available", get(available))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ErrorResponse> {
    resource::list(&state, TABLES, doc! {}).await
}

async fn available(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ErrorResponse> {
    resource::list(&state, TABLES, doc! { "available": true }).await
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    resource::create(&state, TABLES, payload).await
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ErrorResponse> {
    resource::fetch(&state, TABLES, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Document>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::update(&state, TABLES, &id, changes).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::remove(&state, TABLES, &id).await
}
