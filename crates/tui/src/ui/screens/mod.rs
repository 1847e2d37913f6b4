pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod login;
pub mod transactions;
