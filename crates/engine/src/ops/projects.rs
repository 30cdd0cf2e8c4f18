use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, Statement, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Project, ResultEngine, projects, projects::validate_project_name};

use super::{Engine, with_tx};

impl Engine {
    /// Add a new project.
    pub async fn create_project(&self, name: &str) -> ResultEngine<Project> {
        let project = Project::new(name)?;
        let model: projects::ActiveModel = (&project).into();
        with_tx!(self, |db_tx| {
            model.insert(&db_tx).await?;
            Ok(project)
        })
    }

    /// Return one project.
    pub async fn project(&self, project_id: Uuid) -> ResultEngine<Project> {
        with_tx!(self, |db_tx| {
            let model = self.require_project(&db_tx, project_id).await?;
            Project::try_from(model)
        })
    }

    /// List all projects, oldest first.
    pub async fn projects(&self) -> ResultEngine<Vec<Project>> {
        with_tx!(self, |db_tx| {
            let models = projects::Entity::find()
                .order_by_asc(projects::Column::CreatedAt)
                .order_by_asc(projects::Column::Id)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Project::try_from).collect()
        })
    }

    /// Rename a project.
    pub async fn update_project(&self, project_id: Uuid, name: &str) -> ResultEngine<Project> {
        let name = validate_project_name(name)?;
        with_tx!(self, |db_tx| {
            let model = self.require_project(&db_tx, project_id).await?;
            let mut active: projects::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            Project::try_from(updated)
        })
    }

    /// Delete a project and everything it owns.
    ///
    /// Children go first so no partially-cascaded parent is ever committed.
    /// Expenditures referencing the project are only removed when the engine
    /// was built with `cascade_expenditures`.
    pub async fn delete_project(&self, project_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_project(&db_tx, project_id).await?;

            let backend = self.database.get_database_backend();
            let id = project_id.to_string();

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM subcategories WHERE category_id IN \
                     (SELECT id FROM categories WHERE project_id = ?);",
                    vec![id.clone().into()],
                ))
                .await?;

            if self.cascade_expenditures {
                db_tx
                    .execute(Statement::from_sql_and_values(
                        backend,
                        "DELETE FROM expenditures WHERE project_id = ?;",
                        vec![id.clone().into()],
                    ))
                    .await?;
            }

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM categories WHERE project_id = ?;",
                    vec![id.clone().into()],
                ))
                .await?;

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM projects WHERE id = ?;",
                    vec![id.into()],
                ))
                .await?;

            Ok(())
        })
    }
}
