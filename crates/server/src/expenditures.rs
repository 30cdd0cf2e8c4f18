//! Expenditures API endpoints.

use api_types::{
    Message,
    expenditure::{ExpenditureListResponse, ExpenditureNew, ExpenditureUpdate, ExpenditureView},
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
pub struct ExpenditureListQuery {
    pub project_id: Option<Uuid>,
    /// 1-indexed page number; defaults to 1.
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// When true, return every match in a single page.
    pub all: Option<bool>,
}

fn map_expenditure(expenditure: engine::Expenditure) -> ExpenditureView {
    ExpenditureView {
        id: expenditure.id,
        project_id: expenditure.project_id,
        category_id: expenditure.category_id,
        sub_category_id: expenditure.subcategory_id,
        project_name: None,
        category_name: None,
        sub_category_name: None,
        amount: expenditure.amount,
        date: expenditure.date,
        description: expenditure.description,
        created_at: expenditure.created_at,
        updated_at: expenditure.updated_at,
    }
}

fn map_record(record: engine::ExpenditureRecord) -> ExpenditureView {
    ExpenditureView {
        project_name: record.project_name,
        category_name: record.category_name,
        sub_category_name: record.subcategory_name,
        ..map_expenditure(record.expenditure)
    }
}

/// Handle requests for listing expenditures, paginated
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenditureListQuery>,
) -> Result<Json<ExpenditureListResponse>, ServerError> {
    let filter = engine::ExpenditureListFilter {
        project_id: query.project_id,
        all: query.all.unwrap_or(false),
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(engine::DEFAULT_PAGE_LIMIT),
    };
    let page = state.engine.list_expenditures(&filter).await?;

    Ok(Json(ExpenditureListResponse {
        expenditures: page.items.into_iter().map(map_record).collect(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_expenditures: page.total_count,
    }))
}

/// Handle requests for fetching one expenditure
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenditureView>, ServerError> {
    let record = state.engine.expenditure(id).await?;
    Ok(Json(map_record(record)))
}

/// Handle requests for recording a new expenditure
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenditureNew>,
) -> Result<(StatusCode, Json<ExpenditureView>), ServerError> {
    let new = engine::NewExpenditure {
        project_id: payload.project_id,
        category_id: payload.category_id,
        subcategory_id: payload.sub_category_id,
        amount: payload.amount,
        date: payload.date,
        description: payload.description,
    };
    let expenditure = state.engine.create_expenditure(&new).await?;
    Ok((StatusCode::CREATED, Json(map_expenditure(expenditure))))
}

/// Handle requests for updating an expenditure's amount, date, or description
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenditureUpdate>,
) -> Result<Json<ExpenditureView>, ServerError> {
    let update = engine::ExpenditureUpdate {
        amount: payload.amount,
        date: payload.date,
        description: payload.description,
    };
    let expenditure = state.engine.update_expenditure(id, &update).await?;
    Ok(Json(map_expenditure(expenditure)))
}

/// Handle requests for deleting an expenditure
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_expenditure(id).await?;
    Ok(Json(Message {
        message: "expenditure deleted".to_string(),
    }))
}
