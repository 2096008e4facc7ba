use uuid::Uuid;

use crate::{
    Account, Fields, ResultEngine, accounts,
    error::not_found,
    event::{Action, Change},
    persistence::EventLog,
};

use super::{Engine, written};

impl<L: EventLog> Engine<L> {
    /// Return an account by id.
    pub fn account(&self, id: Uuid) -> ResultEngine<Account> {
        self.state()
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(accounts::LABEL, id))
    }

    /// Every account, in creation order.
    #[must_use]
    pub fn list_accounts(&self) -> Vec<Account> {
        self.state().accounts.values().cloned().collect()
    }

    /// Open a new account.
    ///
    /// Requires `name` (non empty) and `initialBalance` (integer, `>= 0`).
    pub fn create_account(&mut self, data: &Fields) -> ResultEngine<Account> {
        let account = accounts::create_payload(data)?;
        self.dispatch(Action::Accounts(Change::Create(account.clone())))?;
        Ok(account)
    }

    /// Change `name` and/or `initialBalance`.
    ///
    /// Nothing is written when the values match the stored ones.
    pub fn update_account(&mut self, id: Uuid, data: &Fields) -> ResultEngine<Account> {
        match accounts::update_payload(&self.state().accounts, id, data)? {
            Some(update) => self.dispatch(Action::Accounts(Change::Update(update)))?,
            None => return self.account(id),
        }
        written(&self.state().accounts, id, accounts::LABEL)
    }

    /// Remove an account. Income, expenses and transfers referencing it are
    /// kept but disappear from statistics.
    pub fn delete_account(&mut self, id: Uuid) -> ResultEngine<Account> {
        let delete = accounts::delete_payload(&self.state().accounts, id)?;
        let removed = self.account(id)?;
        self.dispatch(Action::Accounts(Change::Delete(delete)))?;
        Ok(removed)
    }
}
