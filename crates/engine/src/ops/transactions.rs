use uuid::Uuid;

use crate::{
    Fields, ListQuery, ResultEngine, Transaction, TransactionKind,
    error::not_found,
    event::{Action, Change, Delete, Update},
    persistence::EventLog,
    transactions::{TransactionPatch, create_payload, delete_payload, update_payload},
};

use super::{Engine, written};

fn action(kind: TransactionKind, change: Change<Transaction, TransactionPatch>) -> Action {
    match kind {
        TransactionKind::Income => Action::Income(change),
        TransactionKind::Expense => Action::Expenses(change),
    }
}

impl<L: EventLog> Engine<L> {
    pub fn income(&self, id: Uuid) -> ResultEngine<Transaction> {
        self.transaction(TransactionKind::Income, id)
    }

    pub fn expense(&self, id: Uuid) -> ResultEngine<Transaction> {
        self.transaction(TransactionKind::Expense, id)
    }

    /// Income matching `query`, in creation order.
    #[must_use]
    pub fn list_income(&self, query: &ListQuery) -> Vec<Transaction> {
        self.list_transactions(TransactionKind::Income, query)
    }

    /// Expenses matching `query`, in creation order.
    #[must_use]
    pub fn list_expenses(&self, query: &ListQuery) -> Vec<Transaction> {
        self.list_transactions(TransactionKind::Expense, query)
    }

    /// Record an income.
    ///
    /// Requires `amount`, `accountID`, `categoryID` and `transactionDate`;
    /// `description` is optional. Both references must exist.
    pub fn create_income(&mut self, data: &Fields) -> ResultEngine<Transaction> {
        self.create_transaction(TransactionKind::Income, data)
    }

    /// Record an expense. Same fields as [`Engine::create_income`].
    pub fn create_expense(&mut self, data: &Fields) -> ResultEngine<Transaction> {
        self.create_transaction(TransactionKind::Expense, data)
    }

    pub fn update_income(&mut self, id: Uuid, data: &Fields) -> ResultEngine<Transaction> {
        self.update_transaction(TransactionKind::Income, id, data)
    }

    pub fn update_expense(&mut self, id: Uuid, data: &Fields) -> ResultEngine<Transaction> {
        self.update_transaction(TransactionKind::Expense, id, data)
    }

    pub fn delete_income(&mut self, id: Uuid) -> ResultEngine<Transaction> {
        self.delete_transaction(TransactionKind::Income, id)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> ResultEngine<Transaction> {
        self.delete_transaction(TransactionKind::Expense, id)
    }

    fn transaction(&self, kind: TransactionKind, id: Uuid) -> ResultEngine<Transaction> {
        self.state()
            .transactions(kind)
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(kind.label(), id))
    }

    fn list_transactions(&self, kind: TransactionKind, query: &ListQuery) -> Vec<Transaction> {
        self.state()
            .transactions(kind)
            .values()
            .filter(|transaction| query.matches_transaction(transaction))
            .cloned()
            .collect()
    }

    fn create_transaction(
        &mut self,
        kind: TransactionKind,
        data: &Fields,
    ) -> ResultEngine<Transaction> {
        let transaction = create_payload(self.state(), data)?;
        self.dispatch(action(kind, Change::Create(transaction.clone())))?;
        Ok(transaction)
    }

    fn update_transaction(
        &mut self,
        kind: TransactionKind,
        id: Uuid,
        data: &Fields,
    ) -> ResultEngine<Transaction> {
        let update: Option<Update<TransactionPatch>> =
            update_payload(self.state(), kind, id, data)?;
        match update {
            Some(update) => self.dispatch(action(kind, Change::Update(update)))?,
            None => return self.transaction(kind, id),
        }
        written(self.state().transactions(kind), id, kind.label())
    }

    fn delete_transaction(&mut self, kind: TransactionKind, id: Uuid) -> ResultEngine<Transaction> {
        let delete: Delete = delete_payload(self.state(), kind, id)?;
        let removed = self.transaction(kind, id)?;
        self.dispatch(action(kind, Change::Delete(delete)))?;
        Ok(removed)
    }
}
