//! UI-only state. Nothing here talks to the backend; the [`App`](super::App)
//! turns keys into calls on the coordinator and updates this state with the
//! outcome.
use chrono::NaiveDate;
use engine::{
    BudgetDraft, CategoryDraft, EngineError, PageCursor, TransactionDraft,
    api_types::category::{Category, CategoryKind},
};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Tracker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Transactions,
    Categories,
    Budgets,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Dashboard,
        Tab::Transactions,
        Tab::Categories,
        Tab::Budgets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Categories => "Categories",
            Self::Budgets => "Budgets",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::Dashboard => 'd',
            Self::Transactions => 't',
            Self::Categories => 'c',
            Self::Budgets => 'b',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.shortcut() == ch.to_ascii_lowercase())
    }
}

/// Chart shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    /// Expense share per category.
    #[default]
    Pie,
    /// Spent vs budget per expense category.
    Bar,
}

impl ChartKind {
    pub fn toggle(self) -> Self {
        match self {
            Self::Pie => Self::Bar,
            Self::Bar => Self::Pie,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pie => "Expenses by category",
            Self::Bar => "Budget vs actual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message shown over the current screen.
///
/// Errors block every other key until dismissed with Enter or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&EngineError> for Notice {
    fn from(err: &EngineError) -> Self {
        Self::error(err.to_string())
    }
}

/// Prev/next buttons of the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub page: u32,
    pub total_count: u64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl From<&PageCursor> for PaginationControls {
    fn from(cursor: &PageCursor) -> Self {
        Self {
            page: cursor.page,
            total_count: cursor.total_count,
            prev_enabled: cursor.can_go_prev(),
            next_enabled: cursor.can_go_next(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

impl LoginState {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            password: String::new(),
            focus: if username.is_empty() {
                LoginField::Username
            } else {
                LoginField::Password
            },
            message: None,
        }
    }

    pub fn advance_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Whether a tab is browsing its list or editing its form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Browse,
    Form,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionField {
    #[default]
    Description,
    Amount,
    Category,
    Date,
}

impl TransactionField {
    pub fn next(self) -> Self {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryField {
    #[default]
    Name,
    Kind,
}

impl CategoryField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Kind,
            Self::Kind => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BudgetField {
    #[default]
    Category,
    Amount,
}

impl BudgetField {
    pub fn next(self) -> Self {
        match self {
            Self::Category => Self::Amount,
            Self::Amount => Self::Category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionsView {
    pub selected: usize,
    pub focus: Focus,
    pub field: TransactionField,
    pub draft: TransactionDraft,
}

impl TransactionsView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected: 0,
            focus: Focus::Browse,
            field: TransactionField::default(),
            draft: TransactionDraft::new(today),
        }
    }

    /// Text of the focused field, if it is typed rather than picked.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            TransactionField::Description => Some(&mut self.draft.description),
            TransactionField::Amount => Some(&mut self.draft.amount),
            TransactionField::Date => Some(&mut self.draft.date),
            TransactionField::Category => None,
        }
    }

    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        self.draft.category_id = cycle_id(
            &transaction_category_choices(categories),
            self.draft.category_id,
            forward,
        );
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoriesView {
    pub selected: usize,
    pub focus: Focus,
    pub field: CategoryField,
    pub draft: CategoryDraft,
}

impl CategoriesView {
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            CategoryField::Name => Some(&mut self.draft.name),
            CategoryField::Kind => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetsView {
    pub selected: usize,
    pub focus: Focus,
    pub field: BudgetField,
    pub draft: BudgetDraft,
}

impl BudgetsView {
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            BudgetField::Amount => Some(&mut self.draft.amount),
            BudgetField::Category => None,
        }
    }

    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        let choices: Vec<i64> = categories
            .iter()
            .filter(|c| c.kind == CategoryKind::Expense)
            .map(|c| c.id)
            .collect();
        self.draft.category_id = cycle_id(&choices, self.draft.category_id, forward);
    }
}

/// Category ids offered by the transaction form: income first, then expense.
pub fn transaction_category_choices(categories: &[Category]) -> Vec<i64> {
    let of_kind = |kind: CategoryKind| {
        categories
            .iter()
            .filter(move |c| c.kind == kind)
            .map(|c| c.id)
    };
    of_kind(CategoryKind::Income)
        .chain(of_kind(CategoryKind::Expense))
        .collect()
}

/// Next (or previous) id after `current`, wrapping around. An unset or
/// vanished `current` starts from the first choice.
fn cycle_id(choices: &[i64], current: Option<i64>, forward: bool) -> Option<i64> {
    if choices.is_empty() {
        return None;
    }
    let position = current.and_then(|id| choices.iter().position(|c| *c == id));
    let index = match (position, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % choices.len(),
        (Some(i), false) => (i + choices.len() - 1) % choices.len(),
    };
    Some(choices[index])
}

/// Moves a list selection down, clamped to `len`.
pub fn select_next(selected: &mut usize, len: usize) {
    if len == 0 {
        *selected = 0;
        return;
    }
    *selected = (*selected + 1).min(len - 1);
}

pub fn select_prev(selected: &mut usize) {
    *selected = selected.saturating_sub(1);
}

/// Keeps a selection inside a list that may have shrunk.
pub fn clamp_selection(selected: &mut usize, len: usize) {
    *selected = (*selected).min(len.saturating_sub(1));
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub tab: Tab,
    pub chart: ChartKind,
    pub login: LoginState,
    pub transactions: TransactionsView,
    pub categories: CategoriesView,
    pub budgets: BudgetsView,
    pub notice: Option<Notice>,
    pub currency_symbol: String,
    pub recent_count: usize,
    pub base_url: String,
}

impl AppState {
    pub fn new(config: &AppConfig, screen: Screen, today: NaiveDate) -> Self {
        Self {
            screen,
            tab: Tab::Dashboard,
            chart: ChartKind::default(),
            login: LoginState::new(&config.username),
            transactions: TransactionsView::new(today),
            categories: CategoriesView::default(),
            budgets: BudgetsView::default(),
            notice: None,
            currency_symbol: config.currency_symbol.clone(),
            recent_count: config.recent_count,
            base_url: config.base_url.clone(),
        }
    }

    /// True while some form has the keyboard.
    pub fn is_editing(&self) -> bool {
        match self.screen {
            Screen::Login => true,
            Screen::Tracker => match self.tab {
                Tab::Dashboard => false,
                Tab::Transactions => self.transactions.focus == Focus::Form,
                Tab::Categories => self.categories.focus == Focus::Form,
                Tab::Budgets => self.budgets.focus == Focus::Form,
            },
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_blocking)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Goes back to the login screen with empty forms.
    pub fn logout(&mut self, today: NaiveDate) {
        self.screen = Screen::Login;
        self.tab = Tab::Dashboard;
        self.login.password.clear();
        self.login.focus = LoginField::Password;
        self.login.message = None;
        self.transactions = TransactionsView::new(today);
        self.categories = CategoriesView::default();
        self.budgets = BudgetsView::default();
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 3,
                name: "Groceries".to_string(),
                kind: CategoryKind::Expense,
            },
            Category {
                id: 1,
                name: "Salary".to_string(),
                kind: CategoryKind::Income,
            },
            Category {
                id: 4,
                name: "Rent".to_string(),
                kind: CategoryKind::Expense,
            },
        ]
    }

    #[test]
    fn pagination_controls_follow_cursor() {
        let first = PageCursor {
            page: 1,
            total_count: 30,
            has_next: true,
            has_prev: false,
        };
        let controls = PaginationControls::from(&first);
        assert!(!controls.prev_enabled);
        assert!(controls.next_enabled);

        let last = PageCursor {
            page: 3,
            total_count: 30,
            has_next: false,
            has_prev: true,
        };
        let controls = PaginationControls::from(&last);
        assert!(controls.prev_enabled);
        assert!(!controls.next_enabled);
    }

    #[test]
    fn transaction_form_lists_income_before_expense() {
        assert_eq!(transaction_category_choices(&categories()), vec![1, 3, 4]);

        let mut view = TransactionsView::new(today());
        view.cycle_category(&categories(), true);
        assert_eq!(view.draft.category_id, Some(1));
        view.cycle_category(&categories(), true);
        assert_eq!(view.draft.category_id, Some(3));
        view.cycle_category(&categories(), false);
        view.cycle_category(&categories(), false);
        assert_eq!(view.draft.category_id, Some(4));
    }

    #[test]
    fn budget_form_offers_expense_categories_only() {
        let mut view = BudgetsView::default();
        for _ in 0..3 {
            view.cycle_category(&categories(), true);
            assert_ne!(view.draft.category_id, Some(1));
        }
    }

    #[test]
    fn cycling_without_categories_clears_choice() {
        let mut view = BudgetsView::default();
        view.draft.category_id = Some(9);
        view.cycle_category(&[], true);
        assert_eq!(view.draft.category_id, None);
    }

    #[test]
    fn tabs_answer_to_their_shortcut() {
        assert_eq!(Tab::from_shortcut('b'), Some(Tab::Budgets));
        assert_eq!(Tab::from_shortcut('T'), Some(Tab::Transactions));
        assert_eq!(Tab::from_shortcut('z'), None);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut selected = 0;
        select_next(&mut selected, 2);
        select_next(&mut selected, 2);
        assert_eq!(selected, 1);
        clamp_selection(&mut selected, 1);
        assert_eq!(selected, 0);
        select_prev(&mut selected);
        assert_eq!(selected, 0);
    }

    #[test]
    fn error_notices_block_until_dismissed() {
        let config = AppConfig::default();
        let mut state = AppState::new(&config, Screen::Tracker, today());
        assert!(!state.is_editing());

        state.notice = Some(Notice::info("Category deleted"));
        assert!(!state.is_blocked());

        state.notice = Some(Notice::error("Failed to add new category: boom"));
        assert!(state.is_blocked());
        state.dismiss_notice();
        assert!(!state.is_blocked());
    }

    #[test]
    fn logout_resets_forms() {
        let config = AppConfig {
            username: "asha".to_string(),
            ..AppConfig::default()
        };
        let mut state = AppState::new(&config, Screen::Tracker, today());
        state.tab = Tab::Budgets;
        state.login.password = "secret".to_string();
        state.categories.draft.name = "Travel".to_string();

        state.logout(today());

        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.login.username, "asha");
        assert!(state.login.password.is_empty());
        assert!(state.categories.draft.name.is_empty());
        assert_eq!(state.tab, Tab::Dashboard);
    }
}
