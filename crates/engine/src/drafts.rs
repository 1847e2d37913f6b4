//! Form input as typed by the user, before validation.
use api_types::category::CategoryKind;
use chrono::NaiveDate;

/// Date format of the transaction form and of the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// When the category form goes back to its defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// After every submit, so no stale input survives a failure.
    #[default]
    Always,
    /// Only after the category was created.
    OnSuccess,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryKind,
}

impl CategoryDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub category_id: Option<i64>,
    /// `YYYY-MM-DD`.
    pub date: String,
}

impl TransactionDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category_id: None,
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Clears the form but keeps the last used category.
    pub fn reset_keeping_category(&mut self, today: NaiveDate) {
        let category_id = self.category_id;
        *self = Self::new(today);
        self.category_id = category_id;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetDraft {
    pub category_id: Option<i64>,
    pub amount: String,
}

impl BudgetDraft {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_reset_keeps_category() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
        let mut draft = TransactionDraft {
            description: "Gas".to_string(),
            amount: "60".to_string(),
            category_id: Some(7),
            date: "2025-05-01".to_string(),
        };

        draft.reset_keeping_category(today);

        assert_eq!(draft.description, "");
        assert_eq!(draft.amount, "");
        assert_eq!(draft.category_id, Some(7));
        assert_eq!(draft.date, "2025-05-07");
    }

    #[test]
    fn category_defaults_to_expense() {
        let mut draft = CategoryDraft {
            name: "Salary".to_string(),
            kind: CategoryKind::Income,
        };
        draft.reset();
        assert_eq!(draft.kind, CategoryKind::Expense);
        assert!(draft.name.is_empty());
    }
}
