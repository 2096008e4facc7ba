//! Durable storage of the event log.
//!
//! A log only needs two operations: [`EventLog::append`] is the synchronous
//! durability point of every write, [`EventLog::replay`] streams the stored
//! events back in append order when the store hydrates.

use std::{
    fs::{File, OpenOptions},
    future::Future,
    io::Write,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{ResultEngine, event::Event};

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("event log i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot encode event: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid event at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub trait EventLog: Send + Sync {
    /// Store `event`; the call returns only once the event is durable.
    fn append(&mut self, event: &Event) -> Result<(), PersistenceError>;

    /// Visit every stored event in append order.
    ///
    /// The first error, from the log or from `visitor`, stops the replay.
    fn replay<F>(&self, visitor: F) -> impl Future<Output = ResultEngine<()>> + Send
    where
        F: FnMut(Event) -> ResultEngine<()> + Send;
}

/// Keeps nothing. State lives as long as the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryPersistence;

impl EventLog for MemoryPersistence {
    fn append(&mut self, _event: &Event) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn replay<F>(&self, _visitor: F) -> ResultEngine<()>
    where
        F: FnMut(Event) -> ResultEngine<()> + Send,
    {
        Ok(())
    }
}

/// Newline delimited JSON file, one event per line.
#[derive(Debug)]
pub struct FilePersistence {
    path: PathBuf,
    file: File,
}

impl FilePersistence {
    /// Open the log at `path`, creating an empty one when missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for FilePersistence {
    fn append(&mut self, event: &Event) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(event).map_err(PersistenceError::Encode)?;
        self.file.write_all(format!("\n{encoded}").as_bytes())?;
        self.file.sync_data()?;
        Ok(())
    }

    async fn replay<F>(&self, mut visitor: F) -> ResultEngine<()>
    where
        F: FnMut(Event) -> ResultEngine<()> + Send,
    {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(PersistenceError::from)?;
        let mut lines = BufReader::new(file).lines();
        let mut number = 0;
        while let Some(line) = lines.next_line().await.map_err(PersistenceError::from)? {
            number += 1;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| PersistenceError::Parse {
                line: number,
                source,
            })?;
            visitor(event)?;
        }
        Ok(())
    }
}

/// Log backend chosen at startup.
#[derive(Debug)]
pub enum Persistence {
    Memory(MemoryPersistence),
    File(FilePersistence),
}

impl Default for Persistence {
    fn default() -> Self {
        Self::Memory(MemoryPersistence)
    }
}

impl From<MemoryPersistence> for Persistence {
    fn from(value: MemoryPersistence) -> Self {
        Self::Memory(value)
    }
}

impl From<FilePersistence> for Persistence {
    fn from(value: FilePersistence) -> Self {
        Self::File(value)
    }
}

impl EventLog for Persistence {
    fn append(&mut self, event: &Event) -> Result<(), PersistenceError> {
        match self {
            Self::Memory(log) => log.append(event),
            Self::File(log) => log.append(event),
        }
    }

    async fn replay<F>(&self, visitor: F) -> ResultEngine<()>
    where
        F: FnMut(Event) -> ResultEngine<()> + Send,
    {
        match self {
            Self::Memory(log) => log.replay(visitor).await,
            Self::File(log) => log.replay(visitor).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{
        Category, EngineError,
        event::{Action, Change},
    };

    fn category_created(name: &str) -> Event {
        Event::new(Action::Categories(Change::Create(Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
        })))
    }

    async fn collect(log: &impl EventLog) -> ResultEngine<Vec<Event>> {
        let mut events = Vec::new();
        log.replay(|event| {
            events.push(event);
            Ok(())
        })
        .await?;
        Ok(events)
    }

    #[tokio::test]
    async fn memory_replays_nothing() {
        let mut log = MemoryPersistence;
        log.append(&category_created("Food")).unwrap();
        assert!(collect(&log).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_replays_in_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.ndjson");
        let first = category_created("Food");
        let second = category_created("Rent");

        let mut log = FilePersistence::open(&path).unwrap();
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with('\n'));
        assert_eq!(raw.lines().filter(|l| !l.is_empty()).count(), 2);

        let reopened = FilePersistence::open(&path).unwrap();
        assert_eq!(collect(&reopened).await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.ndjson");
        let event = category_created("Food");
        let line = serde_json::to_string(&event).unwrap();
        std::fs::write(&path, format!("\n\n   \n{line}\n\n")).unwrap();

        let log = FilePersistence::open(&path).unwrap();
        assert_eq!(collect(&log).await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn corrupt_line_reports_its_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.ndjson");
        let line = serde_json::to_string(&category_created("Food")).unwrap();
        std::fs::write(&path, format!("\n{line}\n{{not json")).unwrap();

        let log = FilePersistence::open(&path).unwrap();
        let err = collect(&log).await.unwrap_err();
        assert!(matches!(&err, EngineError::Fatal(msg) if msg.contains("line 3")), "{err}");
    }

    #[tokio::test]
    async fn visitor_error_stops_replay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.ndjson");
        let mut log = Persistence::from(FilePersistence::open(&path).unwrap());
        log.append(&category_created("Food")).unwrap();
        log.append(&category_created("Rent")).unwrap();

        let mut seen = 0;
        let err = log
            .replay(|_| {
                seen += 1;
                Err(EngineError::Fatal("stop".to_string()))
            })
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::Fatal("stop".to_string()));
        assert_eq!(seen, 1);
    }
}
