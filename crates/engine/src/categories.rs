//! Category primitives.
//!
//! A `Category` belongs to a project and owns subcategories. Besides the
//! `category_id` column on each subcategory, the category keeps an ordered
//! list of its subcategory ids (`subcategory_order`, stored as a JSON array
//! of uuid strings) that records insertion order for display.
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub subcategory_order: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: &str, project_id: Uuid) -> ResultEngine<Self> {
        let name = validate_category_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            project_id,
            name,
            subcategory_order: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}

pub(crate) fn validate_category_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn encode_order(order: &[Uuid]) -> String {
    serde_json::to_string(order).unwrap_or_else(|_| "[]".to_string())
}

/// Decode an order hint, dropping entries that are not uuid strings.
pub(crate) fn decode_order(raw: &str) -> Vec<Uuid> {
    serde_json::from_str::<Vec<String>>(raw)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| Uuid::parse_str(id).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub subcategory_order: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Projects,
    #[sea_orm(has_many = "super::subcategories::Entity")]
    Subcategories,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            project_id: ActiveValue::Set(category.project_id.to_string()),
            name: ActiveValue::Set(category.name.clone()),
            subcategory_order: ActiveValue::Set(encode_order(&category.subcategory_order)),
            created_at: ActiveValue::Set(category.created_at),
            updated_at: ActiveValue::Set(category.updated_at),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("Category".to_string()))?,
            project_id: Uuid::parse_str(&model.project_id)
                .map_err(|_| EngineError::NotFound("Project".to_string()))?,
            name: model.name,
            subcategory_order: decode_order(&model.subcategory_order),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
