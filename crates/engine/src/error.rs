//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] returned when a draft misses a required field; no remote
//!   call has been issued.
//! - [`Remote`] returned when the transport reported a failure; local state is
//!   left untouched.
//!
//! A lookup that misses (deleted category, absent budget) is never an error:
//! see [`crate::aggregate`] for the defaults.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Remote`]: EngineError::Remote
use std::fmt;

use thiserror::Error;

/// The user action an error refers to, so notices can name what failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    LoadCategories,
    LoadBudgets,
    LoadTransactions,
    AddCategory,
    AddTransaction,
    SetBudget,
    CreateBudget,
    UpdateBudget,
    DeleteTransaction,
    DeleteCategory,
    DeleteBudget,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadCategories => "load categories",
            Self::LoadBudgets => "load budgets",
            Self::LoadTransactions => "load transactions",
            Self::AddCategory => "add new category",
            Self::AddTransaction => "add new transaction",
            Self::SetBudget => "set budget",
            Self::CreateBudget => "create new budget",
            Self::UpdateBudget => "update the budget",
            Self::DeleteTransaction => "delete transaction",
            Self::DeleteCategory => "delete category",
            Self::DeleteBudget => "delete budget",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot {action}: {reason}")]
    Validation { action: Action, reason: String },
    #[error("Failed to {action}: {detail}")]
    Remote { action: Action, detail: String },
}

impl EngineError {
    pub(crate) fn validation(action: Action, reason: impl Into<String>) -> Self {
        Self::Validation {
            action,
            reason: reason.into(),
        }
    }

    pub(crate) fn remote(action: Action, failure: crate::RemoteFailure) -> Self {
        Self::Remote {
            action,
            detail: failure.detail,
        }
    }

    /// The action that failed.
    pub fn action(&self) -> Action {
        match self {
            Self::Validation { action, .. } | Self::Remote { action, .. } => *action,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
