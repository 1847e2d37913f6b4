use api_types::{budget::Budget, category::Category, page::Page, transaction::Transaction};

/// Window into the server-held transaction collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based page number.
    pub page: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            total_count: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

impl PageCursor {
    /// Builds the cursor describing `envelope`, fetched as page `page`.
    pub fn from_page<T>(page: u32, envelope: &Page<T>) -> Self {
        Self {
            page,
            total_count: envelope.count,
            has_next: envelope.next.is_some(),
            has_prev: envelope.previous.is_some(),
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1 && self.has_prev
    }

    pub fn can_go_next(&self) -> bool {
        self.has_next
    }

    /// Page to fetch when moving forward, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.can_go_next().then(|| self.page.saturating_add(1))
    }

    /// Page to fetch when moving back, if any.
    pub fn prev_page(&self) -> Option<u32> {
        self.can_go_prev().then(|| self.page - 1)
    }
}

/// Dependents removed together with a category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub transactions: usize,
    pub budgets: usize,
}

/// Authoritative in-memory collections.
///
/// Writes from outside the crate replace a whole collection; the finer
/// mutations are reserved to the [`Coordinator`](crate::Coordinator), which
/// sequences them after a confirmed remote call.
#[derive(Clone, Debug, Default)]
pub struct Store {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    cursor: PageCursor,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Transactions of the current page, in server order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Replaces the current page. The last response applied wins, even if
    /// a newer page was requested meanwhile.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>, cursor: PageCursor) {
        self.transactions = transactions;
        self.cursor = cursor;
    }

    pub fn set_budgets(&mut self, budgets: Vec<Budget>) {
        self.budgets = budgets;
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn budget_for(&self, category_id: i64) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category_id == category_id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn push_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub(crate) fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Inserts `budget`, replacing any entry for the same category so the
    /// one-budget-per-category invariant survives odd server responses.
    pub(crate) fn upsert_budget(&mut self, budget: Budget) {
        let category_id = budget.category_id;
        match self
            .budgets
            .iter()
            .position(|b| b.id == budget.id || b.category_id == category_id)
        {
            Some(index) => self.budgets[index] = budget,
            None => self.budgets.push(budget),
        }

        // Position is the first entry for the category, so later ones are stale.
        let mut seen = false;
        self.budgets.retain(|b| {
            if b.category_id != category_id {
                return true;
            }
            let keep = !seen;
            seen = true;
            keep
        });
    }

    pub(crate) fn remove_transaction(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() != before
    }

    pub(crate) fn remove_budget(&mut self, id: i64) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        self.budgets.len() != before
    }

    pub(crate) fn remove_category_cascade(&mut self, id: i64) -> CascadeReport {
        self.categories.retain(|c| c.id != id);

        let transactions = self.transactions.len();
        self.transactions.retain(|t| t.category_id != id);
        let budgets = self.budgets.len();
        self.budgets.retain(|b| b.category_id != id);

        CascadeReport {
            transactions: transactions - self.transactions.len(),
            budgets: budgets - self.budgets.len(),
        }
    }
}
