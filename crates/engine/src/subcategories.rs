//! Subcategory primitives.
//!
//! A `Subcategory` is a budget line inside a category. `amount` is the
//! planned amount for the line, not what was actually spent against it.
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn new(name: &str, amount: f64, category_id: Uuid) -> ResultEngine<Self> {
        let name = validate_subcategory_name(name)?;
        validate_planned_amount(amount)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            category_id,
            name,
            amount,
            created_at: now,
            updated_at: now,
        })
    }
}

pub(crate) fn validate_subcategory_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "subcategory name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_planned_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() {
        return Err(EngineError::Validation(
            "amount must be a valid number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(EngineError::Validation(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subcategories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub amount: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Subcategory> for ActiveModel {
    fn from(subcategory: &Subcategory) -> Self {
        Self {
            id: ActiveValue::Set(subcategory.id.to_string()),
            category_id: ActiveValue::Set(subcategory.category_id.to_string()),
            name: ActiveValue::Set(subcategory.name.clone()),
            amount: ActiveValue::Set(subcategory.amount),
            created_at: ActiveValue::Set(subcategory.created_at),
            updated_at: ActiveValue::Set(subcategory.updated_at),
        }
    }
}

impl TryFrom<Model> for Subcategory {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("Subcategory".to_string()))?,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::NotFound("Category".to_string()))?,
            name: model.name,
            amount: model.amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_subcategory_trims_name() {
        let subcategory = Subcategory::new(" Cement ", 1500.0, Uuid::new_v4()).unwrap();
        assert_eq!(subcategory.name, "Cement");
        assert_eq!(subcategory.amount, 1500.0);
    }

    #[test]
    fn zero_amount_is_allowed() {
        Subcategory::new("Reserve", 0.0, Uuid::new_v4()).unwrap();
    }

    #[test]
    #[should_panic(expected = "Validation")]
    fn fail_nan_amount() {
        Subcategory::new("Cement", f64::NAN, Uuid::new_v4()).unwrap();
    }

    #[test]
    #[should_panic(expected = "Validation")]
    fn fail_infinite_amount() {
        Subcategory::new("Cement", f64::INFINITY, Uuid::new_v4()).unwrap();
    }

    #[test]
    #[should_panic(expected = "Validation")]
    fn fail_negative_amount() {
        Subcategory::new("Cement", -1.0, Uuid::new_v4()).unwrap();
    }
}
