#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use engine::{
    Ack, RemoteResult, Transport,
    api_types::{
        MoneyCents, Resource,
        budget::{Budget, BudgetNew},
        category::{Category, CategoryKind, CategoryNew},
        page::Page,
        transaction::{Transaction, TransactionNew},
    },
    decode_ack, decode_body, decode_record,
};
use serde_json::{Value, json};

pub const PAGE_SIZE: usize = 3;

/// A recorded transport call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListCategories,
    ListBudgets,
    ListTransactions(u32),
    CreateCategory(String),
    CreateTransaction(String),
    CreateBudget(i64),
    UpdateBudget(i64),
    Delete(Resource, i64),
}

#[derive(Default)]
struct Backend {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    next_id: i64,
    scripted: Option<Value>,
    calls: Vec<Call>,
}

/// In-memory backend answering with JSON bodies, decoded the way a real
/// transport decodes them.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Backend>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().next_id = 100;
        backend
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.inner.lock().unwrap().categories = categories;
        self
    }

    pub fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        self.inner.lock().unwrap().transactions = transactions;
        self
    }

    pub fn with_budgets(self, budgets: Vec<Budget>) -> Self {
        self.inner.lock().unwrap().budgets = budgets;
        self
    }

    /// The next call answers with `body` instead of the backend state.
    pub fn answer_next(&self, body: Value) {
        self.inner.lock().unwrap().scripted = Some(body);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn respond(&self, call: Call, handler: impl FnOnce(&mut Backend) -> Value) -> Value {
        let mut backend = self.inner.lock().unwrap();
        backend.calls.push(call);
        match backend.scripted.take() {
            Some(body) => body,
            None => handler(&mut backend),
        }
    }
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Transport for FakeBackend {
    async fn list_categories(&self) -> RemoteResult<Vec<Category>> {
        decode_body(self.respond(Call::ListCategories, |b| json!(b.categories)))
    }

    async fn list_budgets(&self) -> RemoteResult<Vec<Budget>> {
        decode_body(self.respond(Call::ListBudgets, |b| json!(b.budgets)))
    }

    async fn list_transactions(&self, page: u32) -> RemoteResult<Page<Transaction>> {
        decode_body(self.respond(Call::ListTransactions(page), |b| {
            let start = (page as usize - 1) * PAGE_SIZE;
            let results: Vec<_> = b
                .transactions
                .iter()
                .skip(start)
                .take(PAGE_SIZE)
                .cloned()
                .collect();
            let next = (start + PAGE_SIZE < b.transactions.len())
                .then(|| format!("/api/transactions/?page={}", page + 1));
            let previous = (page > 1).then(|| format!("/api/transactions/?page={}", page - 1));
            json!({
                "count": b.transactions.len(),
                "next": next,
                "previous": previous,
                "results": results,
            })
        }))
    }

    async fn create_category(&self, payload: &CategoryNew) -> RemoteResult<Category> {
        decode_record(
            self.respond(Call::CreateCategory(payload.name.clone()), |b| {
                let category = Category {
                    id: b.next_id(),
                    name: payload.name.clone(),
                    kind: payload.kind,
                };
                b.categories.push(category.clone());
                json!(category)
            }),
        )
    }

    async fn create_transaction(&self, payload: &TransactionNew) -> RemoteResult<Transaction> {
        decode_record(
            self.respond(Call::CreateTransaction(payload.description.clone()), |b| {
                let transaction = Transaction {
                    id: b.next_id(),
                    description: payload.description.clone(),
                    amount: payload.amount,
                    category_id: payload.category_id,
                    date: payload.date,
                };
                b.transactions.push(transaction.clone());
                json!(transaction)
            }),
        )
    }

    async fn create_budget(&self, payload: &BudgetNew) -> RemoteResult<Budget> {
        decode_record(
            self.respond(Call::CreateBudget(payload.category_id), |b| {
                let budget = Budget {
                    id: b.next_id(),
                    category_id: payload.category_id,
                    amount: payload.amount,
                };
                b.budgets.push(budget.clone());
                json!(budget)
            }),
        )
    }

    async fn update_budget(&self, id: i64, payload: &BudgetNew) -> RemoteResult<Budget> {
        decode_record(self.respond(Call::UpdateBudget(id), |b| {
            match b.budgets.iter_mut().find(|budget| budget.id == id) {
                Some(budget) => {
                    budget.category_id = payload.category_id;
                    budget.amount = payload.amount;
                    json!(budget)
                }
                None => json!({"detail": "Not found."}),
            }
        }))
    }

    async fn delete(&self, resource: Resource, id: i64) -> RemoteResult<Ack> {
        let body = self.respond(Call::Delete(resource, id), |b| {
            match resource {
                Resource::Categories => b.categories.retain(|c| c.id != id),
                Resource::Transactions => b.transactions.retain(|t| t.id != id),
                Resource::Budgets => b.budgets.retain(|budget| budget.id != id),
            }
            Value::Null
        });
        decode_ack(&body)
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

pub fn category(id: i64, name: &str, kind: CategoryKind) -> Category {
    Category {
        id,
        name: name.to_string(),
        kind,
    }
}

pub fn transaction(id: i64, amount: i64, category_id: i64, day: u32) -> Transaction {
    Transaction {
        id,
        description: format!("transaction {id}"),
        amount: MoneyCents::from_major(amount),
        category_id,
        date: date(day),
    }
}

pub fn budget(id: i64, category_id: i64, amount: i64) -> Budget {
    Budget {
        id,
        category_id,
        amount: MoneyCents::from_major(amount),
    }
}

/// Salary (income, 1), Groceries (expense, 3), Rent (expense, 4).
pub fn household() -> Vec<Category> {
    vec![
        category(1, "Salary", CategoryKind::Income),
        category(3, "Groceries", CategoryKind::Expense),
        category(4, "Rent", CategoryKind::Expense),
    ]
}
