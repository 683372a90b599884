//! Shared document CRUD used by the resource routers.
//!
//! Handlers here are deliberately thin: no business validation, every
//! failure is normalized into the uniform error envelope, and the database
//! handle is acquired per operation so a disconnected store fails fast.

use axum::http::StatusCode;
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde_json::{json, Value};

use crate::http::error::{ErrorResponse, GatewayError};
use crate::http::server::AppState;

/// A mounted resource: its collection and the name used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub collection: &'static str,
    pub name: &'static str,
}

fn collection(state: &AppState, resource: Resource) -> Result<Collection<Document>, ErrorResponse> {
    state
        .connection
        .database()
        .map(|db| db.collection::<Document>(resource.collection))
        .map_err(|err| state.errors.normalize(err.into()))
}

fn fail(state: &AppState, err: mongodb::error::Error) -> ErrorResponse {
    state.errors.normalize(err.into())
}

pub fn parse_object_id(state: &AppState, id: &str) -> Result<ObjectId, ErrorResponse> {
    ObjectId::parse_str(id)
        .map_err(|_| state.errors.normalize(GatewayError::InvalidId(id.to_string())))
}

pub async fn list(
    state: &AppState,
    resource: Resource,
    filter: Document,
) -> Result<Json<Vec<Document>>, ErrorResponse> {
    let collection = collection(state, resource)?;
    let cursor = collection
        .find(filter)
        .await
        .map_err(|err| fail(state, err))?;
    let documents: Vec<Document> = cursor.try_collect().await.map_err(|err| fail(state, err))?;
    Ok(Json(documents))
}

pub async fn create(
    state: &AppState,
    resource: Resource,
    payload: Document,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    let collection = collection(state, resource)?;
    let result = collection
        .insert_one(payload)
        .await
        .map_err(|err| fail(state, err))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "insertedId": result.inserted_id })),
    ))
}

pub async fn fetch(
    state: &AppState,
    resource: Resource,
    id: &str,
) -> Result<Json<Document>, ErrorResponse> {
    let object_id = parse_object_id(state, id)?;
    let collection = collection(state, resource)?;
    let document = collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|err| fail(state, err))?;
    document.map(Json).ok_or_else(|| {
        state.errors.normalize(GatewayError::NotFound {
            resource: resource.name,
        })
    })
}

pub async fn update(
    state: &AppState,
    resource: Resource,
    id: &str,
    changes: Document,
) -> Result<Json<Value>, ErrorResponse> {
    let object_id = parse_object_id(state, id)?;
    let collection = collection(state, resource)?;
    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": changes })
        .await
        .map_err(|err| fail(state, err))?;
    if result.matched_count == 0 {
        return Err(state.errors.normalize(GatewayError::NotFound {
            resource: resource.name,
        }));
    }
    Ok(Json(json!({ "modifiedCount": result.modified_count })))
}

pub async fn remove(
    state: &AppState,
    resource: Resource,
    id: &str,
) -> Result<Json<Value>, ErrorResponse> {
    let object_id = parse_object_id(state, id)?;
    let collection = collection(state, resource)?;
    let result = collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|err| fail(state, err))?;
    if result.deleted_count == 0 {
        return Err(state.errors.normalize(GatewayError::NotFound {
            resource: resource.name,
        }));
    }
    Ok(Json(json!({ "deletedCount": result.deleted_count })))
}
