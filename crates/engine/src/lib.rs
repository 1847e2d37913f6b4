//! Client-side core of the budget tracker.
//!
//! The [`Store`] holds the collections fetched from the backend, the
//! [`aggregate`] functions derive totals and chart series from them, and the
//! [`Coordinator`] applies user mutations through a [`Transport`].
pub use api_types;

pub use coordinator::{BudgetChange, Coordinator};
pub use drafts::{BudgetDraft, CategoryDraft, DATE_FORMAT, ResetPolicy, TransactionDraft};
pub use error::{Action, EngineError};
pub use session::{AuthSession, InitialView, initial_view};
pub use store::{CascadeReport, PageCursor, Store};
pub use transport::{
    Ack, RemoteFailure, RemoteResult, Transport, decode_ack, decode_body, decode_record, detail_of,
};

pub mod aggregate;
mod coordinator;
mod drafts;
mod error;
mod session;
mod store;
mod transport;

pub type ResultEngine<T> = Result<T, EngineError>;
