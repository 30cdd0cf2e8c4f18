//! Project primitives.
//!
//! A `Project` is the top-level grouping: it owns categories, which in turn
//! own the subcategories carrying planned amounts.
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub const PROJECT_NAME_MAX_LEN: usize = 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: &str) -> ResultEngine<Self> {
        let name = validate_project_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Trim and check a project name.
pub(crate) fn validate_project_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "project name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > PROJECT_NAME_MAX_LEN {
        return Err(EngineError::Validation(format!(
            "project name cannot be more than {PROJECT_NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Project> for ActiveModel {
    fn from(project: &Project) -> Self {
        Self {
            id: ActiveValue::Set(project.id.to_string()),
            name: ActiveValue::Set(project.name.clone()),
            created_at: ActiveValue::Set(project.created_at),
            updated_at: ActiveValue::Set(project.updated_at),
        }
    }
}

impl TryFrom<Model> for Project {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("Project".to_string()))?,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
