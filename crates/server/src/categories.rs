//! Categories API endpoints.

use api_types::{
    Message,
    category::{CategoryNew, CategoryUpdate, CategoryView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, subcategories::map_subcategory};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub project_id: Option<Uuid>,
}

fn map_record(record: engine::CategoryRecord) -> CategoryView {
    CategoryView {
        id: record.category.id,
        name: record.category.name,
        project_id: record.category.project_id,
        project_name: record.project_name,
        subcategories: record
            .subcategories
            .into_iter()
            .map(map_subcategory)
            .collect(),
        created_at: record.category.created_at,
        updated_at: record.category.updated_at,
    }
}

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        project_id: category.project_id,
        project_name: String::new(),
        subcategories: Vec::new(),
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

/// Handle requests for listing categories with their subcategories
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let records = state.engine.categories(query.project_id).await?;
    Ok(Json(records.into_iter().map(map_record).collect()))
}

/// Handle requests for creating a category under a project
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(&payload.name, payload.project_id)
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

/// Handle requests for renaming a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.update_category(id, &payload.name).await?;
    Ok(Json(map_category(category)))
}

/// Handle requests for deleting a category and its subcategories
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(Json(Message {
        message: "category deleted".to_string(),
    }))
}
