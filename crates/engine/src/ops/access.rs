use sea_orm::{DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, categories, expenditures, projects, subcategories};

use super::Engine;

/// Generates `find_*` and `require_*` lookups for an entity keyed by uuid.
macro_rules! impl_require_entity {
    ($find_fn:ident, $require_fn:ident, $entity:path, $model:path, $noun:literal) => {
        pub(super) async fn $find_fn(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<Option<$model>> {
            <$entity>::find_by_id(id.to_string())
                .one(db)
                .await
                .map_err(Into::into)
        }

        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            id: Uuid,
        ) -> ResultEngine<$model> {
            self.$find_fn(db, id)
                .await?
                .ok_or_else(|| EngineError::NotFound($noun.to_string()))
        }
    };
}

impl Engine {
    impl_require_entity!(
        find_project,
        require_project,
        projects::Entity,
        projects::Model,
        "Project"
    );

    impl_require_entity!(
        find_category,
        require_category,
        categories::Entity,
        categories::Model,
        "Category"
    );

    impl_require_entity!(
        find_subcategory,
        require_subcategory,
        subcategories::Entity,
        subcategories::Model,
        "Subcategory"
    );

    impl_require_entity!(
        find_expenditure,
        require_expenditure,
        expenditures::Entity,
        expenditures::Model,
        "Expenditure"
    );

    /// Check that all three referents of an expenditure resolve.
    pub(super) async fn require_expenditure_referents(
        &self,
        db: &DatabaseTransaction,
        project_id: Uuid,
        category_id: Uuid,
        subcategory_id: Uuid,
    ) -> ResultEngine<()> {
        if self.find_project(db, project_id).await?.is_none() {
            return Err(EngineError::Integrity("project does not exist".to_string()));
        }
        if self.find_category(db, category_id).await?.is_none() {
            return Err(EngineError::Integrity(
                "category does not exist".to_string(),
            ));
        }
        if self.find_subcategory(db, subcategory_id).await?.is_none() {
            return Err(EngineError::Integrity(
                "subcategory does not exist".to_string(),
            ));
        }
        Ok(())
    }
}
