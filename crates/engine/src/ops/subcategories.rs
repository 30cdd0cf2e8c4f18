use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Category, EngineError, ResultEngine, Subcategory, categories,
    categories::{decode_order, encode_order},
    subcategories,
    subcategories::{validate_planned_amount, validate_subcategory_name},
};

use super::{Engine, with_tx};

/// Partial update for a subcategory.
#[derive(Clone, Debug, Default)]
pub struct SubcategoryUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
}

/// Sort by position in the parent's order hint. Ids the hint does not know
/// keep their relative order after the hinted ones.
fn apply_order_hint(subcategories: &mut [Subcategory], order: &[Uuid]) {
    let position: HashMap<Uuid, usize> = order
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();
    subcategories.sort_by_key(|s| position.get(&s.id).copied().unwrap_or(usize::MAX));
}

impl Engine {
    /// Add a subcategory under a category.
    ///
    /// Inserts the row and appends its id to the parent's order hint in the
    /// same transaction, so the pair lands or rolls back together.
    pub async fn create_subcategory(
        &self,
        name: &str,
        amount: f64,
        parent_category_id: Uuid,
    ) -> ResultEngine<Subcategory> {
        let subcategory = Subcategory::new(name, amount, parent_category_id)?;
        let model: subcategories::ActiveModel = (&subcategory).into();
        with_tx!(self, |db_tx| {
            let parent = self
                .find_category(&db_tx, parent_category_id)
                .await?
                .ok_or_else(|| EngineError::NotFound("Parent category".to_string()))?;

            model.insert(&db_tx).await?;

            let mut order = decode_order(&parent.subcategory_order);
            order.push(subcategory.id);
            let mut parent_active: categories::ActiveModel = parent.into();
            parent_active.subcategory_order = ActiveValue::Set(encode_order(&order));
            parent_active.updated_at = ActiveValue::Set(Utc::now());
            parent_active.update(&db_tx).await?;

            Ok(subcategory)
        })
    }

    /// List subcategories, optionally restricted to one category.
    ///
    /// An unknown `category_id` filter matches nothing and returns an empty
    /// list.
    pub async fn subcategories(&self, category_id: Option<Uuid>) -> ResultEngine<Vec<Subcategory>> {
        with_tx!(self, |db_tx| {
            match category_id {
                Some(category_id) => match self.find_category(&db_tx, category_id).await? {
                    Some(model) => {
                        let parent = Category::try_from(model)?;
                        self.subcategories_of(&db_tx, &parent).await
                    }
                    None => Ok(Vec::new()),
                },
                None => {
                    let models = subcategories::Entity::find()
                        .order_by_asc(subcategories::Column::CreatedAt)
                        .order_by_asc(subcategories::Column::Id)
                        .all(&db_tx)
                        .await?;
                    models.into_iter().map(Subcategory::try_from).collect()
                }
            }
        })
    }

    /// Load a category's subcategories ordered by the parent's hint.
    ///
    /// Membership comes from the `category_id` column; the hint only sorts.
    pub(super) async fn subcategories_of(
        &self,
        db: &DatabaseTransaction,
        category: &Category,
    ) -> ResultEngine<Vec<Subcategory>> {
        let models = subcategories::Entity::find()
            .filter(subcategories::Column::CategoryId.eq(category.id.to_string()))
            .order_by_asc(subcategories::Column::CreatedAt)
            .order_by_asc(subcategories::Column::Id)
            .all(db)
            .await?;
        let mut resolved: Vec<Subcategory> = models
            .into_iter()
            .map(Subcategory::try_from)
            .collect::<ResultEngine<_>>()?;
        apply_order_hint(&mut resolved, &category.subcategory_order);
        Ok(resolved)
    }

    /// Update name and/or planned amount.
    pub async fn update_subcategory(
        &self,
        subcategory_id: Uuid,
        update: &SubcategoryUpdate,
    ) -> ResultEngine<Subcategory> {
        let name = update
            .name
            .as_deref()
            .map(validate_subcategory_name)
            .transpose()?;
        if let Some(amount) = update.amount {
            validate_planned_amount(amount)?;
        }
        with_tx!(self, |db_tx| {
            let model = self.require_subcategory(&db_tx, subcategory_id).await?;
            let mut active: subcategories::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(amount) = update.amount {
                active.amount = ActiveValue::Set(amount);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            Subcategory::try_from(updated)
        })
    }

    /// Delete a subcategory and drop it from the parent's order hint.
    pub async fn delete_subcategory(&self, subcategory_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_subcategory(&db_tx, subcategory_id).await?;
            let parent_id = Uuid::parse_str(&model.category_id).ok();
            subcategories::Entity::delete_by_id(model.id.clone())
                .exec(&db_tx)
                .await?;

            if let Some(parent_id) = parent_id
                && let Some(parent) = self.find_category(&db_tx, parent_id).await?
            {
                let mut order = decode_order(&parent.subcategory_order);
                order.retain(|id| *id != subcategory_id);
                let mut parent_active: categories::ActiveModel = parent.into();
                parent_active.subcategory_order = ActiveValue::Set(encode_order(&order));
                parent_active.updated_at = ActiveValue::Set(Utc::now());
                parent_active.update(&db_tx).await?;
            }

            Ok(())
        })
    }
}
