use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod money;

pub use money::MoneyCents;

/// REST collections exposed by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Transactions,
    Budgets,
}

impl Resource {
    /// Collection path, relative to the backend base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Categories => "api/categories/",
            Self::Transactions => "api/transactions/",
            Self::Budgets => "api/budgets/",
        }
    }

    /// Path of a single record in the collection.
    #[must_use]
    pub fn item_path(self, id: i64) -> String {
        format!("{}{id}/", self.path())
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
        }
    }
}

pub mod category {
    use super::*;

    /// Direction of the money movements filed under a category.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryKind {
        Income,
        #[default]
        Expense,
    }

    impl CategoryKind {
        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }

        #[must_use]
        pub fn toggle(self) -> Self {
            match self {
                Self::Income => Self::Expense,
                Self::Expense => Self::Income,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
    }

    /// Request body for creating a category.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: i64,
        pub description: String,
        pub amount: MoneyCents,
        pub category_id: i64,
        /// Calendar day, `YYYY-MM-DD` on the wire.
        pub date: NaiveDate,
    }

    /// Request body for creating a transaction.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        pub description: String,
        pub amount: MoneyCents,
        pub category_id: i64,
        pub date: NaiveDate,
    }
}

pub mod budget {
    use super::*;

    /// Monthly spending ceiling for one expense category.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        pub id: i64,
        pub category_id: i64,
        pub amount: MoneyCents,
    }

    /// Request body for creating or updating a budget.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub category_id: i64,
        pub amount: MoneyCents,
    }
}

pub mod page {
    use super::*;

    /// Page envelope returned by paginated list endpoints.
    ///
    /// `next`/`previous` are absolute URLs of the neighbouring pages; only
    /// their presence is meaningful to the client.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Page<T> {
        pub count: u64,
        pub next: Option<String>,
        pub previous: Option<String>,
        pub results: Vec<T>,
    }
}

pub mod auth {
    use super::*;

    /// Token endpoint, relative to the backend base URL.
    pub const TOKEN_PATH: &str = "api/token/";

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TokenRequest {
        pub username: String,
        pub password: String,
    }

    /// Token pair issued by `POST /api/token/`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TokenPair {
        pub access: Option<String>,
        pub refresh: Option<String>,
    }
}
