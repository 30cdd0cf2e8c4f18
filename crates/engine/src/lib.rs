//! Core of the budget tracker.
//!
//! The crate owns the entity model (projects, categories, subcategories,
//! expenditures), the referential rules between entities, and the reporting
//! sums. [`Engine`] is the single entry point: it wraps the database
//! connection and exposes one method per operation, each running inside its
//! own transaction.
pub use categories::Category;
pub use error::EngineError;
pub use expenditures::Expenditure;
pub use ops::{
    BudgetReport, CategoryRecord, DEFAULT_PAGE_LIMIT, Engine, EngineBuilder,
    ExpenditureListFilter, ExpenditurePage, ExpenditureRecord, ExpenditureUpdate, NewExpenditure,
    SubcategoryUpdate,
};
pub use projects::Project;
pub use subcategories::Subcategory;

mod categories;
mod error;
mod expenditures;
mod ops;
mod projects;
pub mod reports;
mod subcategories;

type ResultEngine<T> = Result<T, EngineError>;
