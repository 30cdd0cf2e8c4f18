//! Wire types shared between the server and its clients.
//!
//! Everything here serializes as camelCase JSON. The expenditure triple
//! keeps the historical `subCategoryId` spelling on the wire.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod project {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProjectView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryNew {
        pub name: String,
        pub project_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }

    /// A category with its subcategories populated and the owning
    /// project's name resolved.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub project_id: Uuid,
        pub project_name: String,
        pub subcategories: Vec<super::subcategory::SubcategoryView>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod subcategory {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SubcategoryNew {
        pub name: String,
        pub amount: f64,
        pub parent_category_id: Uuid,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SubcategoryUpdate {
        pub name: Option<String>,
        pub amount: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SubcategoryView {
        pub id: Uuid,
        pub name: String,
        pub amount: f64,
        pub category_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod expenditure {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenditureNew {
        pub project_id: Uuid,
        pub category_id: Uuid,
        pub sub_category_id: Uuid,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub description: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenditureUpdate {
        pub amount: Option<f64>,
        pub date: Option<DateTime<Utc>>,
        pub description: Option<String>,
    }

    /// An expenditure with referent names resolved for display.
    ///
    /// A name is `null` when the referent was deleted after the spend was
    /// recorded.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenditureView {
        pub id: Uuid,
        pub project_id: Uuid,
        pub category_id: Uuid,
        pub sub_category_id: Uuid,
        pub project_name: Option<String>,
        pub category_name: Option<String>,
        pub sub_category_name: Option<String>,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenditureListResponse {
        pub expenditures: Vec<ExpenditureView>,
        pub current_page: u64,
        pub total_pages: u64,
        pub total_expenditures: u64,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetVsSpendRow {
        pub category_name: String,
        pub budget: f64,
        pub spend: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetReport {
        pub project_id: Uuid,
        pub project_budget: f64,
        pub rows: Vec<BudgetVsSpendRow>,
    }
}
