//! Money moved between two accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Fields, MoneyCents, ResultEngine, accounts,
    error::not_found,
    event::{Delete, Record, Update},
    state::State,
    transactions::{amount, transaction_date},
    util::{changed, ensure_supported, optional, reference, required},
};

pub(crate) const LABEL: &str = "transfer";

const FIELDS: [&str; 4] = ["amount", "fromID", "toID", "transactionDate"];

/// A transfer from `from_id` to `to_id`.
///
/// Source and destination may be the same account; the balance is unchanged
/// in that case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: Uuid,
    pub amount: MoneyCents,
    #[serde(rename = "fromID")]
    pub from_id: Uuid,
    #[serde(rename = "toID")]
    pub to_id: Uuid,
    pub transaction_date: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MoneyCents>,
    #[serde(default, rename = "fromID", skip_serializing_if = "Option::is_none")]
    pub from_id: Option<Uuid>,
    #[serde(default, rename = "toID", skip_serializing_if = "Option::is_none")]
    pub to_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
}

impl TransferPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.from_id.is_none()
            && self.to_id.is_none()
            && self.transaction_date.is_none()
    }
}

impl Record for Transfer {
    type Patch = TransferPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: &TransferPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(from_id) = patch.from_id {
            self.from_id = from_id;
        }
        if let Some(to_id) = patch.to_id {
            self.to_id = to_id;
        }
        if let Some(transaction_date) = patch.transaction_date {
            self.transaction_date = transaction_date;
        }
    }
}

impl Transfer {
    /// Returns `true` when `account_id` is the source or the destination.
    #[must_use]
    pub fn touches(&self, account_id: Uuid) -> bool {
        self.from_id == account_id || self.to_id == account_id
    }
}

pub(crate) fn create_payload(state: &State, data: &Fields) -> ResultEngine<Transfer> {
    ensure_supported(data, &FIELDS)?;
    let account = |v: &serde_json::Value| reference(&state.accounts, accounts::LABEL, v);
    Ok(Transfer {
        id: Uuid::now_v7(),
        amount: required(data, "amount", amount)?,
        from_id: required(data, "fromID", account)?,
        to_id: required(data, "toID", account)?,
        transaction_date: required(data, "transactionDate", transaction_date)?,
    })
}

pub(crate) fn update_payload(
    state: &State,
    id: Uuid,
    data: &Fields,
) -> ResultEngine<Option<Update<TransferPatch>>> {
    let original = state.transfers.get(&id).ok_or_else(|| not_found(LABEL, id))?;
    ensure_supported(data, &FIELDS)?;

    let account = |v: &serde_json::Value| reference(&state.accounts, accounts::LABEL, v);
    let patch = TransferPatch {
        amount: changed(optional(data, "amount", amount)?, &original.amount),
        from_id: changed(optional(data, "fromID", account)?, &original.from_id),
        to_id: changed(optional(data, "toID", account)?, &original.to_id),
        transaction_date: changed(
            optional(data, "transactionDate", transaction_date)?,
            &original.transaction_date,
        ),
    };
    Ok((!patch.is_empty()).then_some(Update { id, patch }))
}

pub(crate) fn delete_payload(state: &State, id: Uuid) -> ResultEngine<Delete> {
    if !state.transfers.contains_key(&id) {
        return Err(not_found(LABEL, id));
    }
    Ok(Delete { id })
}
