//! Typed mutation records.
//!
//! Every accepted write is an [`Event`]: an [`Action`] stamped with a unique
//! id and a timestamp. On the wire an event is a flat JSON object:
//!
//! ```json
//! {"id":"…","type":"accounts/create","payload":{…},"timestamp":"2021-06-05T19:58:37.863Z"}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    Account, AccountPatch, Category, CategoryPatch, Transaction, TransactionPatch, Transfer,
    TransferPatch,
};

/// A record stored in one of the state collections.
pub trait Record {
    /// Partial update with one optional slot per mutable field.
    type Patch;

    fn id(&self) -> Uuid;

    /// Merge every present slot of `patch` into `self`.
    fn apply(&mut self, patch: &Self::Patch);
}

/// Payload of an update: the record id plus the changed fields only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update<P> {
    pub id: Uuid,
    #[serde(flatten)]
    pub patch: P,
}

/// Payload of a delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    pub id: Uuid,
}

/// The three operations every entity supports.
#[derive(Clone, Debug, PartialEq)]
pub enum Change<T, P> {
    Create(T),
    Update(Update<P>),
    Delete(Delete),
}

impl<T, P> Change<T, P>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + DeserializeOwned,
{
    fn operation(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }

    fn payload(&self) -> serde_json::Result<Value> {
        match self {
            Self::Create(record) => serde_json::to_value(record),
            Self::Update(update) => serde_json::to_value(update),
            Self::Delete(delete) => serde_json::to_value(delete),
        }
    }

    fn from_parts(operation: &str, payload: Value) -> Result<Self, String> {
        let decoded = match operation {
            "create" => serde_json::from_value(payload).map(Self::Create),
            "update" => serde_json::from_value(payload).map(Self::Update),
            "delete" => serde_json::from_value(payload).map(Self::Delete),
            other => return Err(format!("unknown operation: {other}")),
        };
        decoded.map_err(|err| err.to_string())
    }
}

/// Every mutation the ledger knows about.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Accounts(Change<Account, AccountPatch>),
    Categories(Change<Category, CategoryPatch>),
    Income(Change<Transaction, TransactionPatch>),
    Expenses(Change<Transaction, TransactionPatch>),
    Transfers(Change<Transfer, TransferPatch>),
}

impl Action {
    /// Every wire type string, in declaration order.
    pub const KINDS: [&'static str; 15] = [
        "accounts/create",
        "accounts/update",
        "accounts/delete",
        "categories/create",
        "categories/update",
        "categories/delete",
        "income/create",
        "income/update",
        "income/delete",
        "expenses/create",
        "expenses/update",
        "expenses/delete",
        "transfers/create",
        "transfers/update",
        "transfers/delete",
    ];

    fn entity(&self) -> &'static str {
        match self {
            Self::Accounts(_) => "accounts",
            Self::Categories(_) => "categories",
            Self::Income(_) => "income",
            Self::Expenses(_) => "expenses",
            Self::Transfers(_) => "transfers",
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            Self::Accounts(change) => change.operation(),
            Self::Categories(change) => change.operation(),
            Self::Income(change) => change.operation(),
            Self::Expenses(change) => change.operation(),
            Self::Transfers(change) => change.operation(),
        }
    }

    /// Wire type string, e.g. `accounts/create`.
    #[must_use]
    pub fn kind(&self) -> String {
        format!("{}/{}", self.entity(), self.operation())
    }

    fn payload(&self) -> serde_json::Result<Value> {
        match self {
            Self::Accounts(change) => change.payload(),
            Self::Categories(change) => change.payload(),
            Self::Income(change) => change.payload(),
            Self::Expenses(change) => change.payload(),
            Self::Transfers(change) => change.payload(),
        }
    }

    fn from_parts(kind: &str, payload: Value) -> Result<Self, String> {
        let (entity, operation) = kind
            .split_once('/')
            .ok_or_else(|| format!("unknown event type: {kind}"))?;
        match entity {
            "accounts" => Change::from_parts(operation, payload).map(Self::Accounts),
            "categories" => Change::from_parts(operation, payload).map(Self::Categories),
            "income" => Change::from_parts(operation, payload).map(Self::Income),
            "expenses" => Change::from_parts(operation, payload).map(Self::Expenses),
            "transfers" => Change::from_parts(operation, payload).map(Self::Transfers),
            _ => Err(format!("unknown event type: {kind}")),
        }
    }
}

/// An accepted mutation, the unit of durability.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub id: Uuid,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Stamp `action` with a fresh time-ordered id and the current time.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            id: Uuid::now_v7(),
            action,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawEvent {
    id: Uuid,
    #[serde(rename = "type")]
    kind: String,
    payload: Value,
    timestamp: DateTime<Utc>,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            action: Action::from_parts(&raw.kind, raw.payload)?,
            timestamp: raw.timestamp,
        })
    }
}

impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let raw = RawEvent {
            id: self.id,
            kind: self.action.kind(),
            payload: self.action.payload().map_err(serde::ser::Error::custom)?,
            timestamp: self.timestamp,
        };
        raw.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::MoneyCents;

    fn account() -> Account {
        Account {
            id: Uuid::now_v7(),
            name: "Trips".to_string(),
            initial_balance: MoneyCents::new(100),
        }
    }

    #[test]
    fn kinds_are_unique() {
        let unique: HashSet<_> = Action::KINDS.iter().collect();
        assert_eq!(unique.len(), Action::KINDS.len());
    }

    #[test]
    fn kind_strings_match_declared_kinds() {
        let id = Uuid::now_v7();
        let delete = Delete { id };
        let actions = [
            Action::Accounts(Change::Delete(delete)),
            Action::Categories(Change::Delete(delete)),
            Action::Income(Change::Delete(delete)),
            Action::Expenses(Change::Delete(delete)),
            Action::Transfers(Change::Delete(delete)),
        ];
        for action in actions {
            assert!(Action::KINDS.contains(&action.kind().as_str()), "{action:?}");
        }
        let create = Action::Accounts(Change::Create(account()));
        assert_eq!(create.kind(), "accounts/create");
    }

    #[test]
    fn event_wire_shape() {
        let account = account();
        let event = Event::new(Action::Accounts(Change::Create(account.clone())));
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "accounts/create");
        assert_eq!(value["id"], event.id.to_string());
        assert_eq!(value["payload"]["name"], "Trips");
        assert_eq!(value["payload"]["initialBalance"], 100);
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));

        let decoded: Event = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn update_payload_carries_changed_fields_only() {
        let id = Uuid::now_v7();
        let action = Action::Income(Change::Update(Update {
            id,
            patch: TransactionPatch {
                transaction_date: NaiveDate::from_ymd_opt(2020, 6, 1),
                ..Default::default()
            },
        }));
        let payload = action.payload().unwrap();
        assert_eq!(
            payload,
            json!({"id": id.to_string(), "transactionDate": "2020-06-01"})
        );
        let decoded = Action::from_parts("income/update", payload).unwrap();
        assert_eq!(decoded, action);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let raw = json!({
            "id": Uuid::now_v7().to_string(),
            "type": "budgets/create",
            "payload": {},
            "timestamp": "2021-06-05T19:58:37.863Z",
        });
        let err = serde_json::from_value::<Event>(raw).unwrap_err();
        assert!(err.to_string().contains("unknown event type: budgets/create"));

        assert!(Action::from_parts("accounts/archive", json!({})).is_err());
        assert!(Action::from_parts("accounts", json!({})).is_err());
    }
}
