//! Canonical in-memory state and the reducers that mutate it.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    Account, Category, EngineError, ResultEngine, Transaction, TransactionKind, Transfer,
    event::{Action, Change, Record},
};

/// One collection per entity, keyed by id.
///
/// Ids are UUIDv7, so iteration order is creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct State {
    pub accounts: BTreeMap<Uuid, Account>,
    pub categories: BTreeMap<Uuid, Category>,
    pub income: BTreeMap<Uuid, Transaction>,
    pub expenses: BTreeMap<Uuid, Transaction>,
    pub transfers: BTreeMap<Uuid, Transfer>,
}

impl State {
    #[must_use]
    pub fn transactions(&self, kind: TransactionKind) -> &BTreeMap<Uuid, Transaction> {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
        }
    }

    /// Run the reducer matching `action`.
    ///
    /// Fails with `Fatal` when an update or delete targets a missing record,
    /// which only a corrupt log can produce.
    pub fn apply(&mut self, action: &Action) -> ResultEngine<()> {
        match action {
            Action::Accounts(change) => reduce(&mut self.accounts, change, "accounts"),
            Action::Categories(change) => reduce(&mut self.categories, change, "categories"),
            Action::Income(change) => reduce(&mut self.income, change, "income"),
            Action::Expenses(change) => reduce(&mut self.expenses, change, "expenses"),
            Action::Transfers(change) => reduce(&mut self.transfers, change, "transfers"),
        }
    }
}

fn reduce<T>(
    collection: &mut BTreeMap<Uuid, T>,
    change: &Change<T, T::Patch>,
    label: &str,
) -> ResultEngine<()>
where
    T: Record + Clone,
{
    match change {
        Change::Create(record) => {
            collection.insert(record.id(), record.clone());
        }
        Change::Update(update) => {
            let record = collection.get_mut(&update.id).ok_or_else(|| {
                EngineError::Fatal(format!("{label}/update: missing record {}", update.id))
            })?;
            record.apply(&update.patch);
        }
        Change::Delete(delete) => {
            collection.remove(&delete.id).ok_or_else(|| {
                EngineError::Fatal(format!("{label}/delete: missing record {}", delete.id))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccountPatch, MoneyCents,
        event::{Delete, Update},
    };

    fn account(name: &str) -> Account {
        Account {
            id: Uuid::now_v7(),
            name: name.to_string(),
            initial_balance: MoneyCents::new(500),
        }
    }

    #[test]
    fn reducers_insert_merge_remove() {
        let mut state = State::default();
        let first = account("A");
        let second = account("B");
        state
            .apply(&Action::Accounts(Change::Create(first.clone())))
            .unwrap();
        state
            .apply(&Action::Accounts(Change::Create(second.clone())))
            .unwrap();
        let names: Vec<_> = state.accounts.values().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);

        state
            .apply(&Action::Accounts(Change::Update(Update {
                id: first.id,
                patch: AccountPatch {
                    initial_balance: Some(MoneyCents::new(10)),
                    ..Default::default()
                },
            })))
            .unwrap();
        assert_eq!(state.accounts[&first.id].name, "A");
        assert_eq!(state.accounts[&first.id].initial_balance, MoneyCents::new(10));

        state
            .apply(&Action::Accounts(Change::Delete(Delete { id: second.id })))
            .unwrap();
        assert!(!state.accounts.contains_key(&second.id));
    }

    #[test]
    fn missing_target_is_fatal() {
        let mut state = State::default();
        let err = state
            .apply(&Action::Transfers(Change::Delete(Delete {
                id: Uuid::now_v7(),
            })))
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
