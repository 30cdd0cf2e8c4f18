use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, Expenditure, ResultEngine, categories, expenditures,
    expenditures::validate_spend_amount, projects, subcategories,
};

use super::{Engine, normalize_optional_text, with_tx};

pub const DEFAULT_PAGE_LIMIT: u64 = 9;

/// A new expenditure to record.
#[derive(Clone, Debug)]
pub struct NewExpenditure {
    pub project_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
}

/// Partial update for an expenditure. Referent ids are immutable.
#[derive(Clone, Debug, Default)]
pub struct ExpenditureUpdate {
    pub amount: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Filter and page selection for listing expenditures.
#[derive(Clone, Debug)]
pub struct ExpenditureListFilter {
    pub project_id: Option<Uuid>,
    /// Return every matching record in a single page.
    pub all: bool,
    /// 1-indexed page number.
    pub page: u64,
    pub limit: u64,
}

impl Default for ExpenditureListFilter {
    fn default() -> Self {
        Self {
            project_id: None,
            all: false,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn validate_list_filter(filter: &ExpenditureListFilter) -> ResultEngine<()> {
    if filter.all {
        return Ok(());
    }
    if filter.page == 0 {
        return Err(EngineError::Validation(
            "page must be a positive integer".to_string(),
        ));
    }
    if filter.limit == 0 {
        return Err(EngineError::Validation(
            "limit must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// An expenditure with its referent names resolved.
///
/// A name is `None` when the referent was deleted after the expenditure was
/// recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenditureRecord {
    pub expenditure: Expenditure,
    pub project_name: Option<String>,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
}

/// One page of expenditures plus paging bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenditurePage {
    pub items: Vec<ExpenditureRecord>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
}

impl Engine {
    /// Record an expenditure after checking all three referents exist.
    pub async fn create_expenditure(&self, new: &NewExpenditure) -> ResultEngine<Expenditure> {
        let expenditure = Expenditure::new(
            new.project_id,
            new.category_id,
            new.subcategory_id,
            new.amount,
            new.date,
            normalize_optional_text(new.description.as_deref()),
        )?;
        let model: expenditures::ActiveModel = (&expenditure).into();
        with_tx!(self, |db_tx| {
            self.require_expenditure_referents(
                &db_tx,
                new.project_id,
                new.category_id,
                new.subcategory_id,
            )
            .await?;
            model.insert(&db_tx).await?;
            Ok(expenditure)
        })
    }

    /// Return one expenditure with referent names resolved.
    pub async fn expenditure(&self, expenditure_id: Uuid) -> ResultEngine<ExpenditureRecord> {
        with_tx!(self, |db_tx| {
            let model = self.require_expenditure(&db_tx, expenditure_id).await?;
            let expenditure = Expenditure::try_from(model)?;
            let mut records = self.resolve_referent_names(&db_tx, vec![expenditure]).await?;
            records
                .pop()
                .ok_or_else(|| EngineError::NotFound("Expenditure".to_string()))
        })
    }

    /// List expenditures, most recent date first.
    ///
    /// Ties on the date are broken by insertion order so paging is stable.
    /// A page past the end returns an empty item list, not an error.
    pub async fn list_expenditures(
        &self,
        filter: &ExpenditureListFilter,
    ) -> ResultEngine<ExpenditurePage> {
        validate_list_filter(filter)?;
        with_tx!(self, |db_tx| {
            let mut query = expenditures::Entity::find();
            if let Some(project_id) = filter.project_id {
                query = query.filter(expenditures::Column::ProjectId.eq(project_id.to_string()));
            }

            let total_count = query.clone().count(&db_tx).await?;

            query = query
                .order_by_desc(expenditures::Column::Date)
                .order_by_asc(expenditures::Column::CreatedAt)
                .order_by_asc(expenditures::Column::Id);

            let (models, current_page, total_pages) = if filter.all {
                (query.all(&db_tx).await?, 1, 1)
            } else {
                // Saturate: a huge page number is just a page past the end,
                // served without touching the database again.
                let skip = filter.page.saturating_sub(1).saturating_mul(filter.limit);
                let models = if skip >= total_count {
                    Vec::new()
                } else {
                    query.offset(skip).limit(filter.limit).all(&db_tx).await?
                };
                (models, filter.page, total_count.div_ceil(filter.limit))
            };

            let listed: Vec<Expenditure> = models
                .into_iter()
                .map(Expenditure::try_from)
                .collect::<ResultEngine<_>>()?;
            let items = self.resolve_referent_names(&db_tx, listed).await?;

            Ok(ExpenditurePage {
                items,
                current_page,
                total_pages,
                total_count,
            })
        })
    }

    /// Update amount, date, or description.
    pub async fn update_expenditure(
        &self,
        expenditure_id: Uuid,
        update: &ExpenditureUpdate,
    ) -> ResultEngine<Expenditure> {
        if let Some(amount) = update.amount {
            validate_spend_amount(amount)?;
        }
        with_tx!(self, |db_tx| {
            let model = self.require_expenditure(&db_tx, expenditure_id).await?;
            let mut active: expenditures::ActiveModel = model.into();
            if let Some(amount) = update.amount {
                active.amount = ActiveValue::Set(amount);
            }
            if let Some(date) = update.date {
                active.date = ActiveValue::Set(date);
            }
            if let Some(description) = update.description.as_deref() {
                active.description = ActiveValue::Set(normalize_optional_text(Some(description)));
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            Expenditure::try_from(updated)
        })
    }

    /// Delete one expenditure.
    pub async fn delete_expenditure(&self, expenditure_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_expenditure(&db_tx, expenditure_id).await?;
            expenditures::Entity::delete_by_id(model.id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Batch-resolve project, category, and subcategory names for listings.
    async fn resolve_referent_names(
        &self,
        db: &DatabaseTransaction,
        listed: Vec<Expenditure>,
    ) -> ResultEngine<Vec<ExpenditureRecord>> {
        if listed.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<String> = listed.iter().map(|e| e.project_id.to_string()).collect();
        let category_ids: Vec<String> = listed.iter().map(|e| e.category_id.to_string()).collect();
        let subcategory_ids: Vec<String> =
            listed.iter().map(|e| e.subcategory_id.to_string()).collect();

        let project_names: HashMap<String, String> = projects::Entity::find()
            .filter(projects::Column::Id.is_in(project_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let category_names: HashMap<String, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let subcategory_names: HashMap<String, String> = subcategories::Entity::find()
            .filter(subcategories::Column::Id.is_in(subcategory_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        Ok(listed
            .into_iter()
            .map(|expenditure| {
                let project_name = project_names.get(&expenditure.project_id.to_string()).cloned();
                let category_name = category_names
                    .get(&expenditure.category_id.to_string())
                    .cloned();
                let subcategory_name = subcategory_names
                    .get(&expenditure.subcategory_id.to_string())
                    .cloned();
                ExpenditureRecord {
                    expenditure,
                    project_name,
                    category_name,
                    subcategory_name,
                }
            })
            .collect())
    }
}
