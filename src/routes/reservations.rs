//! Reservation endpoints, mounted under /api/reservations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::http::error::ErrorResponse;
use crate::http::server::AppState;
use crate::routes::resource::{self, Resource};

const RESERVATIONS: Resource = Resource {
    collection: "reservations",
    name: "reservation",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/date/{date}", get(by_date))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ErrorResponse> {
    resource::list(&state, RESERVATIONS, doc! {}).await
}

async fn by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Document>>, ErrorResponse> {
    resource::list(&state, RESERVATIONS, doc! { "date": date }).await
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    resource::create(&state, RESERVATIONS, payload).await
}

async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ErrorResponse> {
    resource::fetch(&state, RESERVATIONS, &id).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Document>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::update(&state, RESERVATIONS, &id, changes).await
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    resource::remove(&state, RESERVATIONS, &id).await
}
