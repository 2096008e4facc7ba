//! Single writer dispatcher over [`State`].

use tracing::{debug, error, info};

use crate::{
    EngineError, ResultEngine,
    event::{Action, Event},
    persistence::EventLog,
    state::State,
};

/// Owns the canonical state and the log that makes it durable.
///
/// A `Store` can only be obtained through [`Store::hydrate`], so every live
/// dispatch happens after the log has been fully replayed.
#[derive(Debug)]
pub struct Store<L> {
    state: State,
    log: L,
    poisoned: bool,
}

impl<L: EventLog> Store<L> {
    /// Rebuild the state from every event stored in `log`.
    pub async fn hydrate(log: L) -> ResultEngine<Self> {
        let mut state = State::default();
        let mut replayed = 0usize;
        log.replay(|event| {
            state.apply(&event.action)?;
            replayed += 1;
            Ok(())
        })
        .await
        .inspect_err(|err| error!("hydration failed: {err}"))?;

        info!(
            events = replayed,
            accounts = state.accounts.len(),
            categories = state.categories.len(),
            income = state.income.len(),
            expenses = state.expenses.len(),
            transfers = state.transfers.len(),
            "store hydrated"
        );
        Ok(Self {
            state,
            log,
            poisoned: false,
        })
    }

    /// Append `action` to the log, then apply it.
    ///
    /// Any failure poisons the store: later dispatches fail without touching
    /// the log.
    pub fn dispatch(&mut self, action: Action) -> ResultEngine<()> {
        if self.poisoned {
            return Err(EngineError::Fatal(
                "store is poisoned by an earlier failure".to_string(),
            ));
        }

        let event = Event::new(action);
        let kind = event.action.kind();
        let result = self
            .log
            .append(&event)
            .map_err(EngineError::from)
            .and_then(|()| self.state.apply(&event.action));

        match result {
            Ok(()) => {
                debug!(id = %event.id, kind = %kind, "event dispatched");
                Ok(())
            }
            Err(err) => {
                self.poisoned = true;
                error!(id = %event.id, kind = %kind, "dispatch failed, store poisoned: {err}");
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}
