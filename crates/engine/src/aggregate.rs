//! Derived values over the store collections.
//!
//! Every function here is pure and cheap enough to be recomputed on each
//! frame. Lookups that miss never fail: a transaction whose category is gone
//! contributes nothing to the totals, is labelled `"Unknown"`, and is treated
//! as an expense when a sign is needed.
use std::collections::{HashMap, HashSet};

use api_types::{
    MoneyCents,
    budget::Budget,
    category::{Category, CategoryKind},
    transaction::Transaction,
};

/// Name shown for a transaction whose category cannot be found.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Number of rows in the dashboard's recent transactions table.
pub const DEFAULT_RECENT: usize = 5;

/// Slices below this share are drawn without a label.
pub const SLICE_LABEL_MIN_PERCENT: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub balance: MoneyCents,
}

/// One slice of a per-category chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesPoint {
    pub category_id: i64,
    pub name: String,
    pub value: MoneyCents,
}

/// Spent vs budgeted for one expense category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BudgetComparison {
    pub category_id: i64,
    pub name: String,
    pub spent: MoneyCents,
    pub budget: MoneyCents,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetStatus {
    Left,
    Over,
}

impl BudgetStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Over => "over",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetProgress {
    pub budget: MoneyCents,
    pub spent: MoneyCents,
    pub remaining: MoneyCents,
    /// True percentage, may exceed 100.
    pub percent_spent: f64,
}

impl BudgetProgress {
    pub fn new(budget: MoneyCents, spent: MoneyCents) -> Self {
        Self {
            budget,
            spent,
            remaining: remaining(budget, spent),
            percent_spent: percent_spent(budget, spent),
        }
    }

    pub fn status(&self) -> BudgetStatus {
        if self.remaining.is_negative() {
            BudgetStatus::Over
        } else {
            BudgetStatus::Left
        }
    }

    /// Percentage for progress bars, capped at 100.
    pub fn display_percent(&self) -> f64 {
        self.percent_spent.min(100.0)
    }
}

/// A row of the budgets table: every expense category, budgeted or not.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetRow {
    pub category_id: i64,
    pub name: String,
    pub budget_id: Option<i64>,
    pub progress: BudgetProgress,
}

impl BudgetRow {
    pub fn has_budget(&self) -> bool {
        self.progress.budget.is_positive()
    }
}

/// Category lookup by id. The first occurrence of an id wins, so each
/// transaction resolves to at most one category.
struct CategoryIndex<'a> {
    by_id: HashMap<i64, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            by_id.entry(category.id).or_insert(category);
        }
        Self { by_id }
    }

    fn kind(&self, id: i64) -> Option<CategoryKind> {
        self.by_id.get(&id).map(|c| c.kind)
    }
}

fn total_for(
    categories: &[Category],
    transactions: &[Transaction],
    kind: CategoryKind,
) -> MoneyCents {
    let index = CategoryIndex::new(categories);
    transactions
        .iter()
        .filter(|t| index.kind(t.category_id) == Some(kind))
        .map(|t| t.amount)
        .sum()
}

pub fn total_income(categories: &[Category], transactions: &[Transaction]) -> MoneyCents {
    total_for(categories, transactions, CategoryKind::Income)
}

pub fn total_expenses(categories: &[Category], transactions: &[Transaction]) -> MoneyCents {
    total_for(categories, transactions, CategoryKind::Expense)
}

/// Income minus expenses; not floored at zero.
pub fn balance(categories: &[Category], transactions: &[Transaction]) -> MoneyCents {
    total_income(categories, transactions) - total_expenses(categories, transactions)
}

pub fn summarize(categories: &[Category], transactions: &[Transaction]) -> Summary {
    let total_income = total_income(categories, transactions);
    let total_expenses = total_expenses(categories, transactions);
    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Sum of transaction amounts per category id.
pub fn spent_by_category(transactions: &[Transaction]) -> HashMap<i64, MoneyCents> {
    let mut sums: HashMap<i64, MoneyCents> = HashMap::new();
    for tx in transactions {
        *sums.entry(tx.category_id).or_default() += tx.amount;
    }
    sums
}

/// Categories of `kind`, in store order, skipping repeated ids.
fn categories_of(categories: &[Category], kind: CategoryKind) -> impl Iterator<Item = &Category> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .filter(move |c| seen.insert(c.id))
        .filter(move |c| c.kind == kind)
}

fn series_for(
    categories: &[Category],
    transactions: &[Transaction],
    kind: CategoryKind,
) -> Vec<SeriesPoint> {
    let sums = spent_by_category(transactions);
    categories_of(categories, kind)
        .map(|category| SeriesPoint {
            category_id: category.id,
            name: category.name.clone(),
            value: sums.get(&category.id).copied().unwrap_or_default(),
        })
        .filter(|point| !point.value.is_zero())
        .collect()
}

/// Spend per expense category; zero entries are not charted.
pub fn expense_by_category_series(
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<SeriesPoint> {
    series_for(categories, transactions, CategoryKind::Expense)
}

/// Income per income category; zero entries are not charted.
pub fn income_by_category_series(
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<SeriesPoint> {
    series_for(categories, transactions, CategoryKind::Income)
}

/// Spent vs budget per expense category, dropping categories with neither.
pub fn budget_vs_actual_series(
    categories: &[Category],
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Vec<BudgetComparison> {
    let sums = spent_by_category(transactions);
    categories_of(categories, CategoryKind::Expense)
        .map(|category| BudgetComparison {
            category_id: category.id,
            name: category.name.clone(),
            spent: sums.get(&category.id).copied().unwrap_or_default(),
            budget: budget_amount(budgets, category.id),
        })
        .filter(|item| !(item.spent.is_zero() && item.budget.is_zero()))
        .collect()
}

/// One row per expense category with its budget progress.
pub fn budget_rows(
    categories: &[Category],
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Vec<BudgetRow> {
    let sums = spent_by_category(transactions);
    categories_of(categories, CategoryKind::Expense)
        .map(|category| {
            let budget = budgets.iter().find(|b| b.category_id == category.id);
            let spent = sums.get(&category.id).copied().unwrap_or_default();
            BudgetRow {
                category_id: category.id,
                name: category.name.clone(),
                budget_id: budget.map(|b| b.id),
                progress: BudgetProgress::new(
                    budget.map(|b| b.amount).unwrap_or_default(),
                    spent,
                ),
            }
        })
        .collect()
}

/// Budgeted amount for a category, 0 when none is set.
pub fn budget_amount(budgets: &[Budget], category_id: i64) -> MoneyCents {
    budgets
        .iter()
        .find(|b| b.category_id == category_id)
        .map(|b| b.amount)
        .unwrap_or_default()
}

pub fn remaining(budget: MoneyCents, spent: MoneyCents) -> MoneyCents {
    budget - spent
}

/// `spent / budget * 100`, or 0 when nothing is budgeted.
pub fn percent_spent(budget: MoneyCents, spent: MoneyCents) -> f64 {
    if !budget.is_positive() {
        return 0.0;
    }
    spent.cents() as f64 / budget.cents() as f64 * 100.0
}

/// Share of `value` in `total`, in percent.
pub fn share_percent(value: MoneyCents, total: MoneyCents) -> f64 {
    if !total.is_positive() {
        return 0.0;
    }
    value.cents() as f64 / total.cents() as f64 * 100.0
}

/// The `n` newest transactions, newest first. Ties keep their relative order.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

pub fn resolve_category_name(categories: &[Category], id: i64) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str())
}

pub fn resolve_category_kind(categories: &[Category], id: i64) -> CategoryKind {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(CategoryKind::Expense, |c| c.kind)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn category(id: i64, name: &str, kind: CategoryKind) -> Category {
        Category {
            id,
            name: name.to_string(),
            kind,
        }
    }

    fn tx(id: i64, amount: i64, category_id: i64, day: u32) -> Transaction {
        Transaction {
            id,
            description: format!("tx {id}"),
            amount: MoneyCents::from_major(amount),
            category_id,
            date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        }
    }

    #[test]
    fn orphaned_transactions_count_nowhere() {
        let categories = vec![category(1, "Salary", CategoryKind::Income)];
        let transactions = vec![tx(1, 100, 1, 1), tx(2, 40, 99, 2)];

        let summary = summarize(&categories, &transactions);
        assert_eq!(summary.total_income, MoneyCents::from_major(100));
        assert_eq!(summary.total_expenses, MoneyCents::ZERO);
        assert_eq!(summary.balance, MoneyCents::from_major(100));
    }

    #[test]
    fn huge_server_amounts_saturate_instead_of_overflowing() {
        let categories = vec![
            category(1, "Salary", CategoryKind::Income),
            category(3, "Groceries", CategoryKind::Expense),
        ];
        let body = r#"[
            {"id":1,"description":"a","amount":50000000000000000,"categoryId":1,"date":"2025-05-01"},
            {"id":2,"description":"b","amount":50000000000000000,"categoryId":1,"date":"2025-05-02"},
            {"id":3,"description":"c","amount":50000000000000000,"categoryId":3,"date":"2025-05-03"},
            {"id":4,"description":"d","amount":50000000000000000,"categoryId":3,"date":"2025-05-04"}
        ]"#;
        let transactions: Vec<Transaction> = serde_json::from_str(body).unwrap();

        let summary = summarize(&categories, &transactions);
        assert_eq!(summary.total_income.cents(), i64::MAX);
        assert_eq!(summary.total_expenses.cents(), i64::MAX);
        assert_eq!(summary.balance, MoneyCents::ZERO);

        let spent = spent_by_category(&transactions);
        assert_eq!(spent[&3].cents(), i64::MAX);
        let series = expense_by_category_series(&categories, &transactions);
        assert_eq!(series[0].value.cents(), i64::MAX);
    }

    #[test]
    fn balance_can_go_negative() {
        let categories = vec![category(3, "Rent", CategoryKind::Expense)];
        let transactions = vec![tx(1, 1800, 3, 1)];
        assert_eq!(
            balance(&categories, &transactions),
            MoneyCents::from_major(-1800)
        );
    }

    #[test]
    fn duplicate_category_ids_resolve_to_first() {
        let categories = vec![
            category(1, "Salary", CategoryKind::Income),
            category(1, "Shadow", CategoryKind::Expense),
        ];
        let transactions = vec![tx(1, 50, 1, 1)];

        assert_eq!(
            total_income(&categories, &transactions),
            MoneyCents::from_major(50)
        );
        assert_eq!(total_expenses(&categories, &transactions), MoneyCents::ZERO);
        assert_eq!(income_by_category_series(&categories, &transactions).len(), 1);
        assert!(expense_by_category_series(&categories, &transactions).is_empty());
    }

    #[test]
    fn series_drop_zero_slices() {
        let categories = vec![
            category(3, "Groceries", CategoryKind::Expense),
            category(4, "Rent", CategoryKind::Expense),
            category(1, "Salary", CategoryKind::Income),
        ];
        let transactions = vec![tx(1, 150, 3, 1), tx(2, 50, 3, 2), tx(3, 5000, 1, 1)];

        let expenses = expense_by_category_series(&categories, &transactions);
        assert_eq!(
            expenses,
            vec![SeriesPoint {
                category_id: 3,
                name: "Groceries".to_string(),
                value: MoneyCents::from_major(200),
            }]
        );

        let income = income_by_category_series(&categories, &transactions);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].value, MoneyCents::from_major(5000));
    }

    #[test]
    fn budget_vs_actual_keeps_budget_only_categories() {
        let categories = vec![
            category(3, "Groceries", CategoryKind::Expense),
            category(4, "Rent", CategoryKind::Expense),
            category(5, "Utilities", CategoryKind::Expense),
        ];
        let transactions = vec![tx(1, 150, 3, 1)];
        let budgets = vec![Budget {
            id: 4,
            category_id: 4,
            amount: MoneyCents::from_major(1800),
        }];

        let series = budget_vs_actual_series(&categories, &transactions, &budgets);
        let ids: Vec<i64> = series.iter().map(|s| s.category_id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(series[0].budget, MoneyCents::ZERO);
        assert_eq!(series[1].spent, MoneyCents::ZERO);
    }

    #[test]
    fn overspent_budget_reports_over_and_caps_display() {
        let progress = BudgetProgress::new(MoneyCents::from_major(200), MoneyCents::from_major(300));
        assert_eq!(progress.status(), BudgetStatus::Over);
        assert_eq!(progress.remaining, MoneyCents::from_major(-100));
        assert_eq!(progress.percent_spent, 150.0);
        assert_eq!(progress.display_percent(), 100.0);
    }

    #[test]
    fn zero_budget_never_divides() {
        assert_eq!(percent_spent(MoneyCents::ZERO, MoneyCents::from_major(75)), 0.0);
        let progress = BudgetProgress::new(MoneyCents::ZERO, MoneyCents::ZERO);
        assert_eq!(progress.status(), BudgetStatus::Left);
    }

    #[test]
    fn budget_rows_cover_every_expense_category() {
        let categories = vec![
            category(1, "Salary", CategoryKind::Income),
            category(3, "Groceries", CategoryKind::Expense),
            category(6, "Fun", CategoryKind::Expense),
        ];
        let budgets = vec![Budget {
            id: 11,
            category_id: 3,
            amount: MoneyCents::from_major(600),
        }];
        let rows = budget_rows(&categories, &[], &budgets);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].budget_id, Some(11));
        assert!(rows[0].has_budget());
        assert_eq!(rows[1].budget_id, None);
        assert!(!rows[1].has_budget());
    }

    #[test]
    fn recent_sorts_by_date_and_keeps_tie_order() {
        let transactions = vec![tx(1, 1, 1, 3), tx(2, 1, 1, 5), tx(3, 1, 1, 5), tx(4, 1, 1, 1)];
        let ids: Vec<i64> = recent_transactions(&transactions, 3)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn recent_sorts_across_month_boundaries() {
        let transactions = vec![
            Transaction {
                date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
                ..tx(1, 1, 1, 1)
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(),
                ..tx(2, 1, 1, 1)
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
                ..tx(3, 1, 1, 1)
            },
        ];
        let ids: Vec<i64> = recent_transactions(&transactions, 5)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn lookups_fall_back_to_defaults() {
        let categories = vec![category(1, "Salary", CategoryKind::Income)];
        assert_eq!(resolve_category_name(&categories, 1), "Salary");
        assert_eq!(resolve_category_name(&categories, 42), UNKNOWN_CATEGORY);
        assert_eq!(resolve_category_kind(&categories, 1), CategoryKind::Income);
        assert_eq!(resolve_category_kind(&categories, 42), CategoryKind::Expense);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let total = MoneyCents::from_major(400);
        let a = share_percent(MoneyCents::from_major(100), total);
        let b = share_percent(MoneyCents::from_major(300), total);
        assert_eq!(a + b, 100.0);
        assert_eq!(share_percent(MoneyCents::from_major(1), MoneyCents::ZERO), 0.0);
    }
}
