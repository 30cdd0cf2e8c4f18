//! Subcategories API endpoints.

use api_types::{
    Message,
    subcategory::{SubcategoryNew, SubcategoryUpdate, SubcategoryView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryListQuery {
    pub category_id: Option<Uuid>,
}

pub(crate) fn map_subcategory(subcategory: engine::Subcategory) -> SubcategoryView {
    SubcategoryView {
        id: subcategory.id,
        name: subcategory.name,
        amount: subcategory.amount,
        category_id: subcategory.category_id,
        created_at: subcategory.created_at,
        updated_at: subcategory.updated_at,
    }
}

/// Handle requests for listing subcategories
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SubcategoryListQuery>,
) -> Result<Json<Vec<SubcategoryView>>, ServerError> {
    let subcategories = state.engine.subcategories(query.category_id).await?;
    Ok(Json(
        subcategories.into_iter().map(map_subcategory).collect(),
    ))
}

/// Handle requests for creating a subcategory under a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SubcategoryNew>,
) -> Result<(StatusCode, Json<SubcategoryView>), ServerError> {
    let subcategory = state
        .engine
        .create_subcategory(&payload.name, payload.amount, payload.parent_category_id)
        .await?;
    Ok((StatusCode::CREATED, Json(map_subcategory(subcategory))))
}

/// Handle requests for updating a subcategory's name or planned amount
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubcategoryUpdate>,
) -> Result<Json<SubcategoryView>, ServerError> {
    let update = engine::SubcategoryUpdate {
        name: payload.name,
        amount: payload.amount,
    };
    let subcategory = state.engine.update_subcategory(id, &update).await?;
    Ok(Json(map_subcategory(subcategory)))
}

/// Handle requests for deleting a subcategory
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_subcategory(id).await?;
    Ok(Json(Message {
        message: "subcategory deleted".to_string(),
    }))
}
