//! Project API endpoints

use api_types::{
    Message,
    project::{ProjectNew, ProjectView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_project(project: engine::Project) -> ProjectView {
    ProjectView {
        id: project.id,
        name: project.name,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }
}

/// Handle requests for listing all projects
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProjectView>>, ServerError> {
    let projects = state.engine.projects().await?;
    Ok(Json(projects.into_iter().map(map_project).collect()))
}

/// Handle requests for fetching one project
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectView>, ServerError> {
    let project = state.engine.project(id).await?;
    Ok(Json(map_project(project)))
}

/// Handle requests for creating a new project
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProjectNew>,
) -> Result<(StatusCode, Json<ProjectView>), ServerError> {
    let project = state.engine.create_project(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(map_project(project))))
}

/// Handle requests for renaming a project
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectNew>,
) -> Result<Json<ProjectView>, ServerError> {
    let project = state.engine.update_project(id, &payload.name).await?;
    Ok(Json(map_project(project)))
}

/// Handle requests for deleting a project and everything it owns
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_project(id).await?;
    Ok(Json(Message {
        message: "project deleted".to_string(),
    }))
}
