//! Reporting API endpoints.

use api_types::report::{BudgetReport, BudgetVsSpendRow};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReportQuery {
    pub project_id: Uuid,
}

/// Handle requests for the budget-vs-spend comparison of a project
pub async fn budget_vs_spend(
    State(state): State<ServerState>,
    Query(query): Query<BudgetReportQuery>,
) -> Result<Json<BudgetReport>, ServerError> {
    let report = state.engine.budget_report(query.project_id).await?;

    Ok(Json(BudgetReport {
        project_id: report.project_id,
        project_budget: report.project_budget,
        rows: report
            .rows
            .into_iter()
            .map(|row| BudgetVsSpendRow {
                category_name: row.category_name,
                budget: row.budget,
                spend: row.spend,
            })
            .collect(),
    }))
}
