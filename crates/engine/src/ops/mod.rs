use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod access;
mod categories;
mod expenditures;
mod projects;
mod reports;
mod subcategories;

pub use categories::CategoryRecord;
pub use expenditures::{
    DEFAULT_PAGE_LIMIT, ExpenditureListFilter, ExpenditurePage, ExpenditureRecord,
    ExpenditureUpdate, NewExpenditure,
};
pub use reports::BudgetReport;
pub use subcategories::SubcategoryUpdate;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    cascade_expenditures: bool,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    cascade_expenditures: bool,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Also delete a project's or category's expenditures when the parent is
    /// deleted. Off by default: expenditures survive as historical records
    /// with dangling referents.
    pub fn cascade_expenditures(mut self, enabled: bool) -> EngineBuilder {
        self.cascade_expenditures = enabled;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            cascade_expenditures: self.cascade_expenditures,
        })
    }
}
