use uuid::Uuid;

use crate::{
    Persistence, ResultEngine,
    event::Action,
    persistence::EventLog,
    state::State,
    store::Store,
};

mod accounts;
mod balances;
mod categories;
mod transactions;
mod transfers;

/// Application façade over the store.
///
/// Every write validates the request against the current state, builds the
/// event payload and dispatches it; reads are served from memory.
#[derive(Debug)]
pub struct Engine<L = Persistence> {
    store: Store<L>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<L: EventLog> Engine<L> {
    /// Current state, read only.
    #[must_use]
    pub fn state(&self) -> &State {
        self.store.state()
    }

    fn dispatch(&mut self, action: Action) -> ResultEngine<()> {
        self.store.dispatch(action)
    }
}

/// Retrieve a record that was just written, by construction present.
fn written<T: Clone>(
    collection: &std::collections::BTreeMap<Uuid, T>,
    id: Uuid,
    label: &str,
) -> ResultEngine<T> {
    collection
        .get(&id)
        .cloned()
        .ok_or_else(|| crate::EngineError::Fatal(format!("{label} {id} missing after write")))
}

/// The builder for `Engine`
#[derive(Debug, Default)]
pub struct EngineBuilder<L = Persistence> {
    log: L,
}

impl<L: EventLog> EngineBuilder<L> {
    /// Pass the event log backing the engine
    pub fn persistence<M: EventLog>(self, log: M) -> EngineBuilder<M> {
        EngineBuilder { log }
    }

    /// Replay the log and construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine<L>> {
        Ok(Engine {
            store: Store::hydrate(self.log).await?,
        })
    }
}
