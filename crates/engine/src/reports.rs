//! Budget aggregation.
//!
//! Pure functions over an in-memory snapshot of entities. Nothing here
//! touches the database or persists a total; callers load the snapshot and
//! the functions reduce it. Category membership is always derived from the
//! subcategory rows themselves, never from the parent's order hint.
//!
//! Amounts are plain `f64` sums. All summing lives behind this module so a
//! later move to fixed-point arithmetic stays local.
use serde::Serialize;
use uuid::Uuid;

use crate::{Category, Expenditure, Subcategory};

/// One line of the budget-vs-spend comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetVsSpendRow {
    pub category_name: String,
    pub budget: f64,
    pub spend: f64,
}

/// Planned budget of a category: the sum of its subcategory amounts.
///
/// A category with no subcategories has budget 0.
pub fn category_budget(subcategories: &[Subcategory]) -> f64 {
    subcategories.iter().map(|s| s.amount).sum()
}

/// Planned budget of a project: the sum of the budgets of its categories.
///
/// Categories belonging to other projects are skipped, so the snapshot may
/// hold more than one project's worth of data.
pub fn project_budget(project_id: Uuid, categories: &[(Category, Vec<Subcategory>)]) -> f64 {
    categories
        .iter()
        .filter(|(category, _)| category.project_id == project_id)
        .map(|(_, subcategories)| category_budget(subcategories))
        .sum()
}

/// Actual spend booked against a category.
///
/// Expenditures pointing at other categories are skipped, never an error.
pub fn category_spend(category_id: Uuid, expenditures: &[Expenditure]) -> f64 {
    expenditures
        .iter()
        .filter(|e| e.category_id == category_id)
        .map(|e| e.amount)
        .sum()
}

/// Budget and spend side by side, one row per category of the project.
///
/// Rows keep the order of the input snapshot. Categories without any
/// matching expenditure report spend 0 rather than being omitted.
pub fn budget_vs_spend(
    project_id: Uuid,
    categories: &[(Category, Vec<Subcategory>)],
    expenditures: &[Expenditure],
) -> Vec<BudgetVsSpendRow> {
    categories
        .iter()
        .filter(|(category, _)| category.project_id == project_id)
        .map(|(category, subcategories)| BudgetVsSpendRow {
            category_name: category.name.clone(),
            budget: category_budget(subcategories),
            spend: category_spend(category.id, expenditures),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn category(name: &str, project_id: Uuid) -> Category {
        Category::new(name, project_id).unwrap()
    }

    fn subcategory(name: &str, amount: f64, category_id: Uuid) -> Subcategory {
        Subcategory::new(name, amount, category_id).unwrap()
    }

    fn expenditure(
        project_id: Uuid,
        category_id: Uuid,
        subcategory_id: Uuid,
        amount: f64,
    ) -> Expenditure {
        Expenditure::new(project_id, category_id, subcategory_id, amount, Utc::now(), None)
            .unwrap()
    }

    #[test]
    fn empty_category_has_zero_budget() {
        assert_eq!(category_budget(&[]), 0.0);
    }

    #[test]
    fn materials_scenario() {
        let project_id = Uuid::new_v4();
        let materials = category("Materials", project_id);
        let cement = subcategory("Cement", 10_000.0, materials.id);
        let steel = subcategory("Steel", 25_000.0, materials.id);

        let snapshot = vec![(materials.clone(), vec![cement.clone(), steel])];
        assert!((category_budget(&snapshot[0].1) - 35_000.0).abs() < TOLERANCE);

        let spent = vec![expenditure(project_id, materials.id, cement.id, 4_000.0)];
        assert!((category_spend(materials.id, &spent) - 4_000.0).abs() < TOLERANCE);

        let rows = budget_vs_spend(project_id, &snapshot, &spent);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_name, "Materials");
        assert!((rows[0].budget - 35_000.0).abs() < TOLERANCE);
        assert!((rows[0].spend - 4_000.0).abs() < TOLERANCE);
    }

    #[test]
    fn adding_a_subcategory_grows_the_budget_by_its_amount() {
        let project_id = Uuid::new_v4();
        let cat = category("Materials", project_id);
        let mut subs = vec![subcategory("Cement", 10_000.0, cat.id)];
        let before = category_budget(&subs);

        subs.push(subcategory("Gravel", 123.45, cat.id));
        let after = category_budget(&subs);

        assert!((after - before - 123.45).abs() < TOLERANCE);
    }

    #[test]
    fn project_budget_ignores_category_order() {
        let project_id = Uuid::new_v4();
        let first = category("Materials", project_id);
        let second = category("Labour", project_id);
        let mut snapshot = vec![
            (first.clone(), vec![subcategory("Cement", 100.0, first.id)]),
            (second.clone(), vec![subcategory("Crew", 250.0, second.id)]),
        ];

        let forward = project_budget(project_id, &snapshot);
        snapshot.reverse();
        let backward = project_budget(project_id, &snapshot);

        assert!((forward - backward).abs() < TOLERANCE);
        assert!((forward - 350.0).abs() < TOLERANCE);
    }

    #[test]
    fn project_budget_skips_other_projects() {
        let project_id = Uuid::new_v4();
        let mine = category("Materials", project_id);
        let theirs = category("Materials", Uuid::new_v4());
        let snapshot = vec![
            (mine.clone(), vec![subcategory("Cement", 100.0, mine.id)]),
            (theirs.clone(), vec![subcategory("Cement", 999.0, theirs.id)]),
        ];

        assert!((project_budget(project_id, &snapshot) - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn unknown_category_spend_is_excluded_not_an_error() {
        let project_id = Uuid::new_v4();
        let cat = category("Materials", project_id);
        let snapshot = vec![(cat.clone(), Vec::new())];
        // Booked against a category that is not part of the snapshot.
        let stray = expenditure(project_id, Uuid::new_v4(), Uuid::new_v4(), 500.0);

        let rows = budget_vs_spend(project_id, &snapshot, &[stray]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spend, 0.0);
    }

    #[test]
    fn categories_without_expenditures_still_get_a_row() {
        let project_id = Uuid::new_v4();
        let materials = category("Materials", project_id);
        let labour = category("Labour", project_id);
        let snapshot = vec![
            (materials.clone(), Vec::new()),
            (labour.clone(), Vec::new()),
        ];
        let spent = vec![expenditure(project_id, materials.id, Uuid::new_v4(), 10.0)];

        let rows = budget_vs_spend(project_id, &snapshot, &spent);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].category_name, "Labour");
        assert_eq!(rows[1].spend, 0.0);
    }

    #[test]
    fn rows_keep_snapshot_order() {
        let project_id = Uuid::new_v4();
        let names = ["Materials", "Labour", "Permits"];
        let snapshot: Vec<(Category, Vec<Subcategory>)> = names
            .iter()
            .map(|name| (category(name, project_id), Vec::new()))
            .collect();

        let rows = budget_vs_spend(project_id, &snapshot, &[]);
        let got: Vec<&str> = rows.iter().map(|r| r.category_name.as_str()).collect();
        assert_eq!(got, names);
    }
}
