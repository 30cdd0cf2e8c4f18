use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, Statement, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Category, ResultEngine, Subcategory, categories, categories::validate_category_name, projects,
};

use super::{Engine, with_tx};

/// A category with its subcategories resolved and the owning project's name.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRecord {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
    pub project_name: String,
}

impl Engine {
    /// Add a category under an existing project.
    pub async fn create_category(&self, name: &str, project_id: Uuid) -> ResultEngine<Category> {
        let category = Category::new(name, project_id)?;
        let model: categories::ActiveModel = (&category).into();
        with_tx!(self, |db_tx| {
            self.require_project(&db_tx, project_id).await?;
            model.insert(&db_tx).await?;
            Ok(category)
        })
    }

    /// List categories with their subcategories, oldest first.
    ///
    /// An unknown `project_id` filter matches nothing and returns an empty
    /// list; listing is a query, not a constraint check.
    pub async fn categories(&self, project_id: Option<Uuid>) -> ResultEngine<Vec<CategoryRecord>> {
        with_tx!(self, |db_tx| {
            let mut query = categories::Entity::find()
                .order_by_asc(categories::Column::CreatedAt)
                .order_by_asc(categories::Column::Id);
            if let Some(project_id) = project_id {
                query = query.filter(categories::Column::ProjectId.eq(project_id.to_string()));
            }
            let models = query.all(&db_tx).await?;

            let mut project_names: HashMap<String, String> = HashMap::new();
            if !models.is_empty() {
                let ids: Vec<String> = models.iter().map(|m| m.project_id.clone()).collect();
                project_names = projects::Entity::find()
                    .filter(projects::Column::Id.is_in(ids))
                    .all(&db_tx)
                    .await?
                    .into_iter()
                    .map(|p| (p.id, p.name))
                    .collect();
            }

            let mut records = Vec::with_capacity(models.len());
            for model in models {
                let project_name = project_names
                    .get(&model.project_id)
                    .cloned()
                    .unwrap_or_default();
                let category = Category::try_from(model)?;
                let subcategories = self.subcategories_of(&db_tx, &category).await?;
                records.push(CategoryRecord {
                    category,
                    subcategories,
                    project_name,
                });
            }
            Ok(records)
        })
    }

    /// Rename a category.
    pub async fn update_category(&self, category_id: Uuid, name: &str) -> ResultEngine<Category> {
        let name = validate_category_name(name)?;
        with_tx!(self, |db_tx| {
            let model = self.require_category(&db_tx, category_id).await?;
            let mut active: categories::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            Category::try_from(updated)
        })
    }

    /// Delete a category and its subcategories.
    ///
    /// Expenditures referencing the category are only removed when the
    /// engine was built with `cascade_expenditures`.
    pub async fn delete_category(&self, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, category_id).await?;

            let backend = self.database.get_database_backend();
            let id = category_id.to_string();

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM subcategories WHERE category_id = ?;",
                    vec![id.clone().into()],
                ))
                .await?;

            if self.cascade_expenditures {
                db_tx
                    .execute(Statement::from_sql_and_values(
                        backend,
                        "DELETE FROM expenditures WHERE category_id = ?;",
                        vec![id.clone().into()],
                    ))
                    .await?;
            }

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM categories WHERE id = ?;",
                    vec![id.into()],
                ))
                .await?;

            Ok(())
        })
    }
}
