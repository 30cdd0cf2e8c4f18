use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Category, Expenditure, ResultEngine, Subcategory, categories, expenditures,
    reports::{self, BudgetVsSpendRow},
};

use super::{Engine, with_tx};

/// Budget-vs-spend comparison for one project.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetReport {
    pub project_id: Uuid,
    pub project_budget: f64,
    pub rows: Vec<BudgetVsSpendRow>,
}

impl Engine {
    /// Compare planned budget against recorded spend for a project.
    ///
    /// Loads a fresh snapshot and reduces it with [`crate::reports`];
    /// nothing is persisted.
    pub async fn budget_report(&self, project_id: Uuid) -> ResultEngine<BudgetReport> {
        with_tx!(self, |db_tx| {
            self.require_project(&db_tx, project_id).await?;

            let category_models = categories::Entity::find()
                .filter(categories::Column::ProjectId.eq(project_id.to_string()))
                .order_by_asc(categories::Column::CreatedAt)
                .order_by_asc(categories::Column::Id)
                .all(&db_tx)
                .await?;

            let mut snapshot: Vec<(Category, Vec<Subcategory>)> =
                Vec::with_capacity(category_models.len());
            for model in category_models {
                let category = Category::try_from(model)?;
                let subcategories = self.subcategories_of(&db_tx, &category).await?;
                snapshot.push((category, subcategories));
            }

            let spent: Vec<Expenditure> = expenditures::Entity::find()
                .filter(expenditures::Column::ProjectId.eq(project_id.to_string()))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Expenditure::try_from)
                .collect::<ResultEngine<_>>()?;

            Ok(BudgetReport {
                project_id,
                project_budget: reports::project_budget(project_id, &snapshot),
                rows: reports::budget_vs_spend(project_id, &snapshot, &spent),
            })
        })
    }
}
