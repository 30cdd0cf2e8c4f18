use chrono::{Duration, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Engine, EngineError, ExpenditureListFilter, ExpenditureUpdate, NewExpenditure,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn cascading_engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .cascade_expenditures(true)
        .build()
        .await
        .unwrap();
    (engine, db)
}

struct Fixture {
    project_id: Uuid,
    category_id: Uuid,
    subcategory_id: Uuid,
}

async fn fixture(engine: &Engine) -> Fixture {
    let project = engine.create_project("Roadworks").await.unwrap();
    let category = engine
        .create_category("Materials", project.id)
        .await
        .unwrap();
    let subcategory = engine
        .create_subcategory("Cement", 10_000.0, category.id)
        .await
        .unwrap();
    Fixture {
        project_id: project.id,
        category_id: category.id,
        subcategory_id: subcategory.id,
    }
}

fn spend(fixture: &Fixture, amount: f64, date: chrono::DateTime<Utc>) -> NewExpenditure {
    NewExpenditure {
        project_id: fixture.project_id,
        category_id: fixture.category_id,
        subcategory_id: fixture.subcategory_id,
        amount,
        date,
        description: None,
    }
}

#[tokio::test]
async fn create_resolves_referent_names() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;

    let created = engine
        .create_expenditure(&NewExpenditure {
            description: Some("  first pour  ".to_string()),
            ..spend(&fix, 4_000.0, Utc::now())
        })
        .await
        .unwrap();
    assert_eq!(created.description.as_deref(), Some("first pour"));

    let record = engine.expenditure(created.id).await.unwrap();
    assert_eq!(record.project_name.as_deref(), Some("Roadworks"));
    assert_eq!(record.category_name.as_deref(), Some("Materials"));
    assert_eq!(record.subcategory_name.as_deref(), Some("Cement"));
}

#[tokio::test]
async fn create_checks_each_referent() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;

    let err = engine
        .create_expenditure(&NewExpenditure {
            project_id: Uuid::new_v4(),
            ..spend(&fix, 10.0, Utc::now())
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Integrity("project does not exist".to_string())
    );

    let err = engine
        .create_expenditure(&NewExpenditure {
            category_id: Uuid::new_v4(),
            ..spend(&fix, 10.0, Utc::now())
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Integrity("category does not exist".to_string())
    );

    let err = engine
        .create_expenditure(&NewExpenditure {
            subcategory_id: Uuid::new_v4(),
            ..spend(&fix, 10.0, Utc::now())
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Integrity("subcategory does not exist".to_string())
    );

    let page = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn nan_amount_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;

    let err = engine
        .create_expenditure(&spend(&fix, f64::NAN, Utc::now()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("amount must be a valid number".to_string())
    );
}

#[tokio::test]
async fn pagination_splits_23_records_into_3_pages() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    for day in 0..23 {
        engine
            .create_expenditure(&spend(&fix, f64::from(day), base + Duration::days(i64::from(day))))
            .await
            .unwrap();
    }

    let page_one = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    assert_eq!(page_one.total_count, 23);
    assert_eq!(page_one.total_pages, 3);
    assert_eq!(page_one.current_page, 1);
    assert_eq!(page_one.items.len(), 9);
    // Most recent date first.
    assert_eq!(page_one.items[0].expenditure.amount, 22.0);
    assert_eq!(page_one.items[8].expenditure.amount, 14.0);

    let page_three = engine
        .list_expenditures(&ExpenditureListFilter {
            page: 3,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page_three.items.len(), 5);
    assert_eq!(page_three.current_page, 3);
    assert_eq!(page_three.items[4].expenditure.amount, 0.0);

    // A page past the end is empty, not an error.
    let page_four = engine
        .list_expenditures(&ExpenditureListFilter {
            page: 4,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page_four.items.is_empty());
    assert_eq!(page_four.total_pages, 3);
}

#[tokio::test]
async fn absurdly_large_page_numbers_do_not_overflow() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    engine
        .create_expenditure(&spend(&fix, 10.0, Utc::now()))
        .await
        .unwrap();

    // The skip arithmetic must saturate rather than wrap or panic.
    let page = engine
        .list_expenditures(&ExpenditureListFilter {
            page: u64::MAX,
            limit: 9,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.current_page, u64::MAX);
    assert_eq!(page.total_count, 1);

    let page = engine
        .list_expenditures(&ExpenditureListFilter {
            page: u64::MAX,
            limit: u64::MAX,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn same_date_ties_keep_insertion_order() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let date = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    for amount in [1.0, 2.0, 3.0] {
        engine
            .create_expenditure(&spend(&fix, amount, date))
            .await
            .unwrap();
    }

    let page = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    let amounts: Vec<f64> = page.items.iter().map(|r| r.expenditure.amount).collect();
    assert_eq!(amounts, vec![1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn all_mode_returns_everything_as_one_page() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    for day in 0..12 {
        engine
            .create_expenditure(&spend(&fix, 1.0, base + Duration::days(day)))
            .await
            .unwrap();
    }

    let page = engine
        .list_expenditures(&ExpenditureListFilter {
            all: true,
            // Ignored in all mode.
            page: 7,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 12);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_count, 12);
}

#[tokio::test]
async fn list_filters_by_project() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;

    let depot = engine.create_project("Depot").await.unwrap();
    let tooling = engine.create_category("Tooling", depot.id).await.unwrap();
    let drills = engine
        .create_subcategory("Drills", 2_000.0, tooling.id)
        .await
        .unwrap();

    engine
        .create_expenditure(&spend(&fix, 100.0, Utc::now()))
        .await
        .unwrap();
    engine
        .create_expenditure(&NewExpenditure {
            project_id: depot.id,
            category_id: tooling.id,
            subcategory_id: drills.id,
            amount: 55.0,
            date: Utc::now(),
            description: None,
        })
        .await
        .unwrap();

    let page = engine
        .list_expenditures(&ExpenditureListFilter {
            project_id: Some(depot.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].expenditure.amount, 55.0);
    assert_eq!(page.items[0].project_name.as_deref(), Some("Depot"));
}

#[tokio::test]
async fn invalid_page_or_limit_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .list_expenditures(&ExpenditureListFilter {
            page: 0,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("page must be a positive integer".to_string())
    );

    let err = engine
        .list_expenditures(&ExpenditureListFilter {
            limit: 0,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("limit must be a positive integer".to_string())
    );
}

#[tokio::test]
async fn update_touches_only_given_fields() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let date = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let created = engine
        .create_expenditure(&NewExpenditure {
            description: Some("first pour".to_string()),
            ..spend(&fix, 4_000.0, date)
        })
        .await
        .unwrap();

    let updated = engine
        .update_expenditure(
            created.id,
            &ExpenditureUpdate {
                amount: Some(4_250.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, 4_250.0);
    assert_eq!(updated.date, date);
    assert_eq!(updated.description.as_deref(), Some("first pour"));

    let err = engine
        .update_expenditure(Uuid::new_v4(), &ExpenditureUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("Expenditure".to_string()));
}

#[tokio::test]
async fn delete_removes_a_single_record() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let created = engine
        .create_expenditure(&spend(&fix, 10.0, Utc::now()))
        .await
        .unwrap();

    engine.delete_expenditure(created.id).await.unwrap();

    let err = engine.expenditure(created.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("Expenditure".to_string()));
    let err = engine.delete_expenditure(created.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("Expenditure".to_string()));
}

#[tokio::test]
async fn expenditures_outlive_their_referents_by_default() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let created = engine
        .create_expenditure(&spend(&fix, 4_000.0, Utc::now()))
        .await
        .unwrap();

    engine.delete_project(fix.project_id).await.unwrap();

    // The record survives; its referent names no longer resolve.
    let record = engine.expenditure(created.id).await.unwrap();
    assert_eq!(record.project_name, None);
    assert_eq!(record.category_name, None);
    assert_eq!(record.subcategory_name, None);

    let page = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
async fn cascade_policy_removes_expenditures_with_their_project() {
    let (engine, _db) = cascading_engine_with_db().await;
    let fix = fixture(&engine).await;
    engine
        .create_expenditure(&spend(&fix, 4_000.0, Utc::now()))
        .await
        .unwrap();

    engine.delete_project(fix.project_id).await.unwrap();

    let page = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn cascade_policy_removes_expenditures_with_their_category() {
    let (engine, _db) = cascading_engine_with_db().await;
    let fix = fixture(&engine).await;
    engine
        .create_expenditure(&spend(&fix, 4_000.0, Utc::now()))
        .await
        .unwrap();

    engine.delete_category(fix.category_id).await.unwrap();

    let page = engine
        .list_expenditures(&ExpenditureListFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn deleting_only_the_subcategory_blanks_one_name() {
    let (engine, _db) = engine_with_db().await;
    let fix = fixture(&engine).await;
    let created = engine
        .create_expenditure(&spend(&fix, 4_000.0, Utc::now()))
        .await
        .unwrap();

    engine.delete_subcategory(fix.subcategory_id).await.unwrap();

    let record = engine.expenditure(created.id).await.unwrap();
    assert_eq!(record.project_name.as_deref(), Some("Roadworks"));
    assert_eq!(record.category_name.as_deref(), Some("Materials"));
    assert_eq!(record.subcategory_name, None);
}
