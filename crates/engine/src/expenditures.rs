//! Expenditure primitives.
//!
//! An `Expenditure` records actual spend against a (project, category,
//! subcategory) triple. The three ids are weak references kept for lookup
//! and display: deleting a referent does not delete the expenditure, so a
//! stored row may point at ids that no longer resolve.
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expenditure {
    pub id: Uuid,
    pub project_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expenditure {
    pub fn new(
        project_id: Uuid,
        category_id: Uuid,
        subcategory_id: Uuid,
        amount: f64,
        date: DateTime<Utc>,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        validate_spend_amount(amount)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            project_id,
            category_id,
            subcategory_id,
            amount,
            date,
            description,
            created_at: now,
            updated_at: now,
        })
    }
}

pub(crate) fn validate_spend_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() {
        return Err(EngineError::Validation(
            "amount must be a valid number".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenditures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub amount: f64,
    pub date: DateTimeUtc,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

// Referent ids are weak references, so no FK-backed relations here.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expenditure> for ActiveModel {
    fn from(expenditure: &Expenditure) -> Self {
        Self {
            id: ActiveValue::Set(expenditure.id.to_string()),
            project_id: ActiveValue::Set(expenditure.project_id.to_string()),
            category_id: ActiveValue::Set(expenditure.category_id.to_string()),
            subcategory_id: ActiveValue::Set(expenditure.subcategory_id.to_string()),
            amount: ActiveValue::Set(expenditure.amount),
            date: ActiveValue::Set(expenditure.date),
            description: ActiveValue::Set(expenditure.description.clone()),
            created_at: ActiveValue::Set(expenditure.created_at),
            updated_at: ActiveValue::Set(expenditure.updated_at),
        }
    }
}

impl TryFrom<Model> for Expenditure {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("Expenditure".to_string()))?,
            project_id: Uuid::parse_str(&model.project_id)
                .map_err(|_| EngineError::NotFound("Project".to_string()))?,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::NotFound("Category".to_string()))?,
            subcategory_id: Uuid::parse_str(&model.subcategory_id)
                .map_err(|_| EngineError::NotFound("Subcategory".to_string()))?,
            amount: model.amount,
            date: model.date,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
