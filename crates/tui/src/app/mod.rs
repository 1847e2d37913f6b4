use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    AuthSession, BudgetChange, Coordinator, EngineError, InitialView, aggregate,
    api_types::auth::TokenRequest,
    initial_view,
};

use crate::{
    client::HttpTransport,
    config::AppConfig,
    error::{AppError, Result},
    session::SessionStore,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub mod state;

pub use state::{AppState, ChartKind, Focus, Notice, NoticeLevel, Screen, Tab};

pub struct App {
    coordinator: Coordinator<HttpTransport>,
    session: SessionStore,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let session = SessionStore::load(&config.session_path)?;
        let mut transport = HttpTransport::new(&config.base_url)?;
        transport.set_token(session.current_token().map(str::to_string));
        let coordinator = Coordinator::new(transport);

        let screen = match initial_view(&session) {
            InitialView::Login => Screen::Login,
            InitialView::Tracker => Screen::Tracker,
        };
        let state = AppState::new(&config, screen, coordinator.today());

        Ok(Self {
            coordinator,
            session,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.state.screen == Screen::Tracker {
            self.refresh().await;
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state, self.coordinator.store()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key).await?;
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if self.state.is_blocked() {
            if matches!(action, AppAction::Submit | AppAction::Cancel) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }
        self.state.dismiss_notice();

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Tracker if self.state.is_editing() => {
                self.handle_form_key(action).await;
                Ok(())
            }
            Screen::Tracker => self.handle_browse_key(action).await,
        }
    }

    async fn handle_login_key(&mut self, action: AppAction) -> Result<()> {
        if action == AppAction::Submit {
            return self.attempt_login().await;
        }

        let login = &mut self.state.login;
        match action {
            AppAction::NextField | AppAction::Up | AppAction::Down => login.advance_focus(),
            AppAction::Backspace => {
                login.active_field_mut().pop();
            }
            AppAction::Input(ch) => login.active_field_mut().push(ch),
            AppAction::Cancel => login.message = None,
            _ => {}
        }
        Ok(())
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.clone();
        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some("Enter username and password.".to_string());
            return Ok(());
        }

        let credentials = TokenRequest { username, password };
        match self.coordinator.transport().obtain_token(&credentials).await {
            Ok(pair) => {
                let access = pair.access.unwrap_or_default();
                self.session.start(access.clone(), pair.refresh)?;
                self.coordinator.transport_mut().set_token(Some(access));
                tracing::info!(username = %credentials.username, "logged in");

                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Tracker;
                self.refresh().await;
            }
            Err(failure) => {
                tracing::warn!(detail = %failure.detail, "login refused");
                self.state.login.message = Some(format!("Failed to login: {}", failure.detail));
            }
        }
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.session.clear()?;
        self.coordinator.transport_mut().set_token(None);
        self.coordinator.store_mut().clear();
        let today = self.coordinator.today();
        self.state.logout(today);
        tracing::info!("logged out");
        Ok(())
    }

    async fn refresh(&mut self) {
        if let Err(err) = self.coordinator.refresh().await {
            self.fail(&err);
        }
        self.clamp_selections();
    }

    fn fail(&mut self, err: &EngineError) {
        self.state.notice = Some(Notice::from(err));
    }

    fn clamp_selections(&mut self) {
        let store = self.coordinator.store();
        let view = &mut self.state;
        state::clamp_selection(&mut view.transactions.selected, store.transactions().len());
        state::clamp_selection(&mut view.categories.selected, store.categories().len());
        state::clamp_selection(&mut view.budgets.selected, budget_row_count(store));
    }

    async fn handle_browse_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(),
            AppAction::Submit if self.state.tab == Tab::Budgets => self.open_form(),
            AppAction::Input(ch) => self.handle_browse_char(ch).await?,
            _ => {}
        }
        Ok(())
    }

    async fn handle_browse_char(&mut self, ch: char) -> Result<()> {
        if let Some(tab) = Tab::from_shortcut(ch) {
            self.state.tab = tab;
            return Ok(());
        }

        match ch {
            'q' => self.should_quit = true,
            'r' => self.refresh().await,
            'L' => self.logout()?,
            'j' => self.select_next(),
            'k' => self.select_prev(),
            'v' if self.state.tab == Tab::Dashboard => {
                self.state.chart = self.state.chart.toggle();
            }
            'a' if self.state.tab != Tab::Dashboard => self.open_form(),
            'x' => self.delete_selected().await,
            'n' if self.state.tab == Tab::Transactions => {
                if let Err(err) = self.coordinator.next_page().await {
                    self.fail(&err);
                }
                self.state.transactions.selected = 0;
            }
            'p' if self.state.tab == Tab::Transactions => {
                if let Err(err) = self.coordinator.prev_page().await {
                    self.fail(&err);
                }
                self.state.transactions.selected = 0;
            }
            _ => {}
        }
        Ok(())
    }

    fn select_next(&mut self) {
        let store = self.coordinator.store();
        match self.state.tab {
            Tab::Dashboard => {}
            Tab::Transactions => {
                let len = store.transactions().len();
                state::select_next(&mut self.state.transactions.selected, len);
            }
            Tab::Categories => {
                let len = store.categories().len();
                state::select_next(&mut self.state.categories.selected, len);
            }
            Tab::Budgets => {
                state::select_next(&mut self.state.budgets.selected, budget_row_count(store));
            }
        }
    }

    fn select_prev(&mut self) {
        match self.state.tab {
            Tab::Dashboard => {}
            Tab::Transactions => state::select_prev(&mut self.state.transactions.selected),
            Tab::Categories => state::select_prev(&mut self.state.categories.selected),
            Tab::Budgets => state::select_prev(&mut self.state.budgets.selected),
        }
    }

    fn open_form(&mut self) {
        let store = self.coordinator.store();
        match self.state.tab {
            Tab::Dashboard => {}
            Tab::Transactions => {
                let view = &mut self.state.transactions;
                view.focus = Focus::Form;
                view.field = state::TransactionField::default();
                if view.draft.category_id.is_none() {
                    view.cycle_category(store.categories(), true);
                }
            }
            Tab::Categories => {
                let view = &mut self.state.categories;
                view.focus = Focus::Form;
                view.field = state::CategoryField::default();
            }
            Tab::Budgets => {
                let rows = budget_rows(store);
                let view = &mut self.state.budgets;
                view.focus = Focus::Form;
                view.field = state::BudgetField::Amount;
                match rows.get(view.selected) {
                    Some(row) => {
                        view.draft.category_id = Some(row.category_id);
                        if row.has_budget() {
                            view.draft.amount = row.progress.budget.to_string();
                        }
                    }
                    None => {
                        view.field = state::BudgetField::Category;
                        view.cycle_category(store.categories(), true);
                    }
                }
            }
        }
    }

    async fn handle_form_key(&mut self, action: AppAction) {
        if action == AppAction::Submit {
            match self.state.tab {
                Tab::Dashboard => {}
                Tab::Transactions => self.submit_transaction().await,
                Tab::Categories => self.submit_category().await,
                Tab::Budgets => self.submit_budget().await,
            }
            return;
        }

        let categories = self.coordinator.store().categories();
        match self.state.tab {
            Tab::Dashboard => {}
            Tab::Transactions => {
                let view = &mut self.state.transactions;
                match action {
                    AppAction::Cancel => view.focus = Focus::Browse,
                    AppAction::NextField | AppAction::Down => view.field = view.field.next(),
                    AppAction::Left | AppAction::Right
                        if view.field == state::TransactionField::Category =>
                    {
                        view.cycle_category(categories, action == AppAction::Right);
                    }
                    AppAction::Backspace => {
                        if let Some(text) = view.active_text_mut() {
                            text.pop();
                        }
                    }
                    AppAction::Input(ch) => {
                        if let Some(text) = view.active_text_mut() {
                            text.push(ch);
                        }
                    }
                    _ => {}
                }
            }
            Tab::Categories => {
                let view = &mut self.state.categories;
                match action {
                    AppAction::Cancel => view.focus = Focus::Browse,
                    AppAction::NextField | AppAction::Down => view.field = view.field.next(),
                    AppAction::Left | AppAction::Right | AppAction::Input(' ')
                        if view.field == state::CategoryField::Kind =>
                    {
                        view.draft.kind = view.draft.kind.toggle();
                    }
                    AppAction::Backspace => {
                        if let Some(text) = view.active_text_mut() {
                            text.pop();
                        }
                    }
                    AppAction::Input(ch) => {
                        if let Some(text) = view.active_text_mut() {
                            text.push(ch);
                        }
                    }
                    _ => {}
                }
            }
            Tab::Budgets => {
                let view = &mut self.state.budgets;
                match action {
                    AppAction::Cancel => view.focus = Focus::Browse,
                    AppAction::NextField | AppAction::Down => view.field = view.field.next(),
                    AppAction::Left | AppAction::Right
                        if view.field == state::BudgetField::Category =>
                    {
                        view.cycle_category(categories, action == AppAction::Right);
                    }
                    AppAction::Backspace => {
                        if let Some(text) = view.active_text_mut() {
                            text.pop();
                        }
                    }
                    AppAction::Input(ch) => {
                        if let Some(text) = view.active_text_mut() {
                            text.push(ch);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    async fn submit_transaction(&mut self) {
        let view = &mut self.state.transactions;
        match self.coordinator.add_transaction(&mut view.draft).await {
            Ok(transaction) => {
                view.focus = Focus::Browse;
                view.field = state::TransactionField::default();
                self.state.notice = Some(Notice::info(format!(
                    "Added \"{}\"",
                    transaction.description
                )));
            }
            Err(err) => self.fail(&err),
        }
    }

    async fn submit_category(&mut self) {
        let view = &mut self.state.categories;
        match self.coordinator.add_category(&mut view.draft).await {
            Ok(category) => {
                view.focus = Focus::Browse;
                view.field = state::CategoryField::default();
                self.state.notice = Some(Notice::info(format!(
                    "Added {} category \"{}\"",
                    category.kind.as_str(),
                    category.name
                )));
            }
            Err(err) => self.fail(&err),
        }
    }

    async fn submit_budget(&mut self) {
        let view = &mut self.state.budgets;
        let result = self.coordinator.add_or_update_budget(&mut view.draft).await;
        view.field = state::BudgetField::default();
        match result {
            Ok(change) => {
                view.focus = Focus::Browse;
                let store = self.coordinator.store();
                let (verb, budget) = match &change {
                    BudgetChange::Created(budget) => ("Set", budget),
                    BudgetChange::Updated(budget) => ("Updated", budget),
                };
                self.state.notice = Some(Notice::info(format!(
                    "{verb} budget for {}: {}",
                    aggregate::resolve_category_name(store.categories(), budget.category_id),
                    budget.amount.format_with(&self.state.currency_symbol)
                )));
            }
            Err(err) => self.fail(&err),
        }
    }

    async fn delete_selected(&mut self) {
        let store = self.coordinator.store();
        match self.state.tab {
            Tab::Dashboard => {}
            Tab::Transactions => {
                let Some(id) = store
                    .transactions()
                    .get(self.state.transactions.selected)
                    .map(|t| t.id)
                else {
                    return;
                };
                match self.coordinator.delete_transaction(id).await {
                    Ok(()) => self.state.notice = Some(Notice::info("Transaction deleted")),
                    Err(err) => self.fail(&err),
                }
            }
            Tab::Categories => {
                let Some((id, name)) = store
                    .categories()
                    .get(self.state.categories.selected)
                    .map(|c| (c.id, c.name.clone()))
                else {
                    return;
                };
                match self.coordinator.delete_category(id).await {
                    Ok(report) => {
                        self.state.notice = Some(Notice::info(format!(
                            "Deleted \"{name}\" with {} transaction(s) and {} budget(s)",
                            report.transactions, report.budgets
                        )));
                    }
                    Err(err) => self.fail(&err),
                }
            }
            Tab::Budgets => {
                let rows = budget_rows(store);
                let Some((category_id, name)) = rows
                    .get(self.state.budgets.selected)
                    .map(|row| (row.category_id, row.name.clone()))
                else {
                    return;
                };
                match self.coordinator.delete_budget(category_id).await {
                    Ok(true) => {
                        self.state.notice = Some(Notice::info(format!("Removed budget for {name}")));
                    }
                    Ok(false) => {
                        self.state.notice = Some(Notice::info(format!("No budget set for {name}")));
                    }
                    Err(err) => self.fail(&err),
                }
            }
        }
        self.clamp_selections();
    }
}

fn budget_rows(store: &engine::Store) -> Vec<aggregate::BudgetRow> {
    aggregate::budget_rows(store.categories(), store.transactions(), store.budgets())
}

fn budget_row_count(store: &engine::Store) -> usize {
    budget_rows(store).len()
}
