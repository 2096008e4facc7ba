//! The module contains the `Account` record and its payload builders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Fields, MoneyCents, ResultEngine,
    error::not_found,
    event::{Delete, Record, Update},
    util::{changed, ensure_supported, optional, required},
    validate::{ValidationError, validate},
};

pub(crate) const LABEL: &str = "account";

const FIELDS: [&str; 2] = ["name", "initialBalance"];

/// A place where money is kept: a bank account, a wallet, a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub initial_balance: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<MoneyCents>,
}

impl AccountPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.initial_balance.is_none()
    }
}

impl Record for Account {
    type Patch = AccountPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: &AccountPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(initial_balance) = patch.initial_balance {
            self.initial_balance = initial_balance;
        }
    }
}

fn name(value: &serde_json::Value) -> Result<String, ValidationError> {
    Ok(validate(value).string()?.not_empty()?.value().to_string())
}

fn initial_balance(value: &serde_json::Value) -> Result<MoneyCents, ValidationError> {
    Ok(MoneyCents::new(
        validate(value)
            .integer()?
            .bigger_or_equal_than(0)?
            .smaller_or_equal_than(MoneyCents::MAX.cents())?
            .value(),
    ))
}

pub(crate) fn create_payload(data: &Fields) -> ResultEngine<Account> {
    ensure_supported(data, &FIELDS)?;
    Ok(Account {
        id: Uuid::now_v7(),
        name: required(data, "name", name)?,
        initial_balance: required(data, "initialBalance", initial_balance)?,
    })
}

pub(crate) fn update_payload(
    accounts: &BTreeMap<Uuid, Account>,
    id: Uuid,
    data: &Fields,
) -> ResultEngine<Option<Update<AccountPatch>>> {
    let original = accounts.get(&id).ok_or_else(|| not_found(LABEL, id))?;
    ensure_supported(data, &FIELDS)?;

    let patch = AccountPatch {
        name: changed(optional(data, "name", name)?, &original.name),
        initial_balance: changed(
            optional(data, "initialBalance", initial_balance)?,
            &original.initial_balance,
        ),
    };
    Ok((!patch.is_empty()).then_some(Update { id, patch }))
}

pub(crate) fn delete_payload(accounts: &BTreeMap<Uuid, Account>, id: Uuid) -> ResultEngine<Delete> {
    if !accounts.contains_key(&id) {
        return Err(not_found(LABEL, id));
    }
    Ok(Delete { id })
}
