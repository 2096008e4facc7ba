//! Event sourced personal finance ledger.
//!
//! The [`Engine`] validates requests against the current [`State`], turns
//! them into typed [`Action`]s and hands them to the [`Store`], which appends
//! each one to an [`EventLog`] before applying it. On startup the store
//! replays the log to rebuild the state.
//!
//! ```rust
//! use engine::{Engine, Fields};
//! use serde_json::json;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut engine = Engine::builder().build().await?;
//!
//! let data = json!({"name": "Checking", "initialBalance": 500});
//! let account = engine.create_account(data.as_object().unwrap())?;
//! assert_eq!(engine.account_balance(account.id)?.cents(), 500);
//! # Ok::<(), engine::EngineError>(())
//! # }).unwrap();
//! ```

pub use accounts::{Account, AccountPatch};
pub use categories::{Category, CategoryPatch};
pub use error::EngineError;
pub use event::{Action, Change, Delete, Event, Record, Update};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use persistence::{
    EventLog, FilePersistence, MemoryPersistence, Persistence, PersistenceError,
};
pub use query::ListQuery;
pub use state::State;
pub use stats::{MonthlyTotals, Statistics, Summary};
pub use store::Store;
pub use transactions::{Transaction, TransactionKind, TransactionPatch};
pub use transfers::{Transfer, TransferPatch};

mod accounts;
mod categories;
mod error;
mod event;
mod money;
mod ops;
mod persistence;
mod query;
mod state;
mod stats;
mod store;
mod transactions;
mod transfers;
mod util;
pub mod validate;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Raw request fields, as decoded from a JSON object.
pub type Fields = serde_json::Map<String, serde_json::Value>;
