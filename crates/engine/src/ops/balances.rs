use uuid::Uuid;

use crate::{MoneyCents, ResultEngine, Statistics, persistence::EventLog, stats};

use super::Engine;

impl<L: EventLog> Engine<L> {
    /// Current balance of an account.
    ///
    /// `initialBalance` plus income, minus expenses, minus outgoing and plus
    /// incoming transfers. A transfer to the same account cancels out.
    pub fn account_balance(&self, id: Uuid) -> ResultEngine<MoneyCents> {
        let account = self.account(id)?;
        stats::account_balance(self.state(), &account)
    }

    /// Global, per account and per category rollups.
    pub fn statistics(&self) -> ResultEngine<Statistics> {
        Statistics::compute(self.state())
    }
}
