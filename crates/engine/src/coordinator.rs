use api_types::{
    MoneyCents, Resource,
    budget::{Budget, BudgetNew},
    category::{Category, CategoryNew},
    transaction::{Transaction, TransactionNew},
};
use chrono::NaiveDate;

use crate::{
    Action, EngineError, RemoteFailure, ResultEngine,
    drafts::{BudgetDraft, CategoryDraft, DATE_FORMAT, ResetPolicy, TransactionDraft},
    store::{CascadeReport, PageCursor, Store},
    transport::Transport,
};

/// Outcome of [`Coordinator::add_or_update_budget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BudgetChange {
    Created(Budget),
    Updated(Budget),
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Applies user mutations: one transport call, then one store update.
///
/// Nothing guards against a second submit while the first is awaiting; each
/// operation reads the store again once its call has returned.
#[derive(Debug)]
pub struct Coordinator<T> {
    transport: T,
    store: Store,
    reset_policy: ResetPolicy,
    clock: fn() -> NaiveDate,
}

impl<T: Transport> Coordinator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            store: Store::new(),
            reset_policy: ResetPolicy::default(),
            clock: local_today,
        }
    }

    /// Sets when the category form is reset after a submit.
    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    /// Overrides the source of "today" used to reset the transaction form.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub async fn load_categories(&mut self) -> ResultEngine<()> {
        let categories = self
            .transport
            .list_categories()
            .await
            .map_err(|failure| remote(Action::LoadCategories, failure))?;
        tracing::debug!(count = categories.len(), "categories loaded");
        self.store.set_categories(categories);
        Ok(())
    }

    pub async fn load_budgets(&mut self) -> ResultEngine<()> {
        let budgets = self
            .transport
            .list_budgets()
            .await
            .map_err(|failure| remote(Action::LoadBudgets, failure))?;
        tracing::debug!(count = budgets.len(), "budgets loaded");
        self.store.set_budgets(budgets);
        Ok(())
    }

    /// Fetches a 1-based page of transactions and makes it current.
    pub async fn load_transactions(&mut self, page: u32) -> ResultEngine<()> {
        if page == 0 {
            return Err(EngineError::validation(
                Action::LoadTransactions,
                "pages start at 1",
            ));
        }

        let envelope = self
            .transport
            .list_transactions(page)
            .await
            .map_err(|failure| remote(Action::LoadTransactions, failure))?;
        let cursor = PageCursor::from_page(page, &envelope);
        tracing::debug!(
            page,
            count = envelope.results.len(),
            total = envelope.count,
            "transactions page loaded"
        );
        self.store.set_transactions(envelope.results, cursor);
        Ok(())
    }

    /// Moves to the next page. Returns `false` when there is none.
    pub async fn next_page(&mut self) -> ResultEngine<bool> {
        match self.store.cursor().next_page() {
            Some(page) => self.load_transactions(page).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Moves to the previous page. Returns `false` when there is none.
    pub async fn prev_page(&mut self) -> ResultEngine<bool> {
        match self.store.cursor().prev_page() {
            Some(page) => self.load_transactions(page).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Reloads categories, budgets and the current transaction page.
    ///
    /// Each collection is loaded independently; the first failure is
    /// returned after all three were attempted.
    pub async fn refresh(&mut self) -> ResultEngine<()> {
        let page = self.store.cursor().page;
        let categories = self.load_categories().await;
        let budgets = self.load_budgets().await;
        let transactions = self.load_transactions(page).await;
        categories.and(budgets).and(transactions)
    }

    pub async fn add_category(&mut self, draft: &mut CategoryDraft) -> ResultEngine<Category> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(EngineError::validation(
                Action::AddCategory,
                "name is required",
            ));
        }

        let payload = CategoryNew {
            name: name.to_string(),
            kind: draft.kind,
        };
        let result = self.transport.create_category(&payload).await;

        if self.reset_policy == ResetPolicy::Always || result.is_ok() {
            draft.reset();
        }

        let category = result.map_err(|failure| remote(Action::AddCategory, failure))?;
        tracing::debug!(id = category.id, name = %category.name, "category created");
        self.store.push_category(category.clone());
        Ok(category)
    }

    /// Creates a transaction. On success the form is cleared but keeps its
    /// category; on failure it is left as typed.
    pub async fn add_transaction(
        &mut self,
        draft: &mut TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let payload = transaction_payload(draft)?;

        let transaction = self
            .transport
            .create_transaction(&payload)
            .await
            .map_err(|failure| remote(Action::AddTransaction, failure))?;
        tracing::debug!(
            id = transaction.id,
            category_id = transaction.category_id,
            "transaction created"
        );

        self.store.push_transaction(transaction.clone());
        draft.reset_keeping_category(self.today());
        Ok(transaction)
    }

    /// Sets the budget of a category: updates the existing one in place, or
    /// creates it. The form is reset once the call returned.
    pub async fn add_or_update_budget(&mut self, draft: &mut BudgetDraft) -> ResultEngine<BudgetChange> {
        let Some(category_id) = draft.category_id else {
            return Err(EngineError::validation(
                Action::SetBudget,
                "category is required",
            ));
        };
        let amount = parse_amount(Action::SetBudget, &draft.amount)?;
        let payload = BudgetNew {
            category_id,
            amount,
        };

        let existing = self.store.budget_for(category_id).map(|b| b.id);
        let change = match existing {
            Some(id) => {
                let result = self.transport.update_budget(id, &payload).await;
                draft.reset();
                let budget = result.map_err(|failure| remote(Action::UpdateBudget, failure))?;
                tracing::debug!(id, category_id, amount = %budget.amount, "budget updated");
                BudgetChange::Updated(budget)
            }
            None => {
                let result = self.transport.create_budget(&payload).await;
                draft.reset();
                let budget = result.map_err(|failure| remote(Action::CreateBudget, failure))?;
                tracing::debug!(id = budget.id, category_id, "budget created");
                BudgetChange::Created(budget)
            }
        };

        let budget = match &change {
            BudgetChange::Created(budget) | BudgetChange::Updated(budget) => budget.clone(),
        };
        self.store.upsert_budget(budget);
        Ok(change)
    }

    pub async fn delete_transaction(&mut self, id: i64) -> ResultEngine<()> {
        self.transport
            .delete(Resource::Transactions, id)
            .await
            .map_err(|failure| remote(Action::DeleteTransaction, failure))?;
        let removed = self.store.remove_transaction(id);
        tracing::debug!(id, removed, "transaction deleted");
        Ok(())
    }

    /// Deletes a category and, locally, every transaction and budget filed
    /// under it. The backend is trusted to cascade on its side.
    pub async fn delete_category(&mut self, id: i64) -> ResultEngine<CascadeReport> {
        self.transport
            .delete(Resource::Categories, id)
            .await
            .map_err(|failure| remote(Action::DeleteCategory, failure))?;
        let report = self.store.remove_category_cascade(id);
        tracing::debug!(
            id,
            transactions = report.transactions,
            budgets = report.budgets,
            "category deleted"
        );
        Ok(report)
    }

    /// Deletes the budget of a category. Returns `false` when the category
    /// had none, in which case no call is made.
    pub async fn delete_budget(&mut self, category_id: i64) -> ResultEngine<bool> {
        let Some(id) = self.store.budget_for(category_id).map(|b| b.id) else {
            return Ok(false);
        };

        self.transport
            .delete(Resource::Budgets, id)
            .await
            .map_err(|failure| remote(Action::DeleteBudget, failure))?;
        self.store.remove_budget(id);
        tracing::debug!(id, category_id, "budget deleted");
        Ok(true)
    }
}

fn remote(action: Action, failure: RemoteFailure) -> EngineError {
    tracing::warn!(%action, detail = %failure.detail, "remote call failed");
    EngineError::remote(action, failure)
}

fn parse_amount(action: Action, raw: &str) -> ResultEngine<MoneyCents> {
    if raw.trim().is_empty() {
        return Err(EngineError::validation(action, "amount is required"));
    }
    let amount: MoneyCents = raw
        .parse()
        .map_err(|err| EngineError::validation(action, format!("amount: {err}")))?;
    if amount.is_negative() {
        return Err(EngineError::validation(action, "amount must not be negative"));
    }
    Ok(amount)
}

fn transaction_payload(draft: &TransactionDraft) -> ResultEngine<TransactionNew> {
    let action = Action::AddTransaction;

    let description = draft.description.trim();
    if description.is_empty() {
        return Err(EngineError::validation(action, "description is required"));
    }
    let amount = parse_amount(action, &draft.amount)?;
    let Some(category_id) = draft.category_id else {
        return Err(EngineError::validation(action, "category is required"));
    };
    let date = NaiveDate::parse_from_str(draft.date.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::validation(action, "date must be YYYY-MM-DD"))?;

    Ok(TransactionNew {
        description: description.to_string(),
        amount,
        category_id,
        date,
    })
}
