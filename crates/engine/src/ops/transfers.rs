use uuid::Uuid;

use crate::{
    Fields, ListQuery, ResultEngine, Transfer,
    error::not_found,
    event::{Action, Change},
    persistence::EventLog,
    transfers,
};

use super::{Engine, written};

impl<L: EventLog> Engine<L> {
    pub fn transfer(&self, id: Uuid) -> ResultEngine<Transfer> {
        self.state()
            .transfers
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(transfers::LABEL, id))
    }

    /// Transfers matching `query`. An account filter matches both the source
    /// and the destination; the category filter does not apply.
    #[must_use]
    pub fn list_transfers(&self, query: &ListQuery) -> Vec<Transfer> {
        self.state()
            .transfers
            .values()
            .filter(|transfer| query.matches_transfer(transfer))
            .cloned()
            .collect()
    }

    /// Move `amount` from `fromID` to `toID`.
    pub fn create_transfer(&mut self, data: &Fields) -> ResultEngine<Transfer> {
        let transfer = transfers::create_payload(self.state(), data)?;
        self.dispatch(Action::Transfers(Change::Create(transfer.clone())))?;
        Ok(transfer)
    }

    pub fn update_transfer(&mut self, id: Uuid, data: &Fields) -> ResultEngine<Transfer> {
        match transfers::update_payload(self.state(), id, data)? {
            Some(update) => self.dispatch(Action::Transfers(Change::Update(update)))?,
            None => return self.transfer(id),
        }
        written(&self.state().transfers, id, transfers::LABEL)
    }

    pub fn delete_transfer(&mut self, id: Uuid) -> ResultEngine<Transfer> {
        let delete = transfers::delete_payload(self.state(), id)?;
        let removed = self.transfer(id)?;
        self.dispatch(Action::Transfers(Change::Delete(delete)))?;
        Ok(removed)
    }
}
