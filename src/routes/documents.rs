// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document routes (require authentication).

use crate::error::{AppError, Result};
use crate::firebase::AuthUser;
use crate::models::{Document, WithId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Document routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/collections/{collection}",
            get(list_documents).post(create_document),
        )
        .route(
            "/api/collections/{collection}/{id}",
            get(get_document)
                .patch(update_document)
                .delete(delete_document),
        )
}

#[derive(Deserialize)]
pub struct CreateParams {
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

async fn create_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(collection): Path<String>,
    Query(params): Query<CreateParams>,
    Json(data): Json<Document>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let id = state
        .services
        .db()
        .add_document(&collection, &data, params.id.as_deref())
        .await?;

    tracing::info!(uid = %user.uid, collection = %collection, id = %id, "Document written");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<WithId<Document>>>> {
    let docs = state.services.db().get_collection(&collection).await?;
    Ok(Json(docs))
}

async fn get_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Document>> {
    state
        .services
        .db()
        .get_document(&collection, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{}/{}", collection, id)))
}

async fn update_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((collection, id)): Path<(String, String)>,
    Json(data): Json<Document>,
) -> Result<StatusCode> {
    state
        .services
        .db()
        .update_document(&collection, &id, &data)
        .await?;

    tracing::info!(uid = %user.uid, collection = %collection, id = %id, "Document updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .services
        .db()
        .delete_document(&collection, &id)
        .await?;

    tracing::info!(uid = %user.uid, collection = %collection, id = %id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
