//! Income and expense records.
//!
//! Both kinds share the same shape and validation rules; they live in separate
//! collections and dispatch separate actions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    Fields, MoneyCents, ResultEngine, accounts, categories,
    error::not_found,
    event::{Delete, Record, Update},
    state::State,
    util::{changed, ensure_supported, optional, reference, required},
    validate::{ValidationError, validate},
};

const FIELDS: [&str; 5] = [
    "amount",
    "accountID",
    "categoryID",
    "transactionDate",
    "description",
];

/// Direction of a [`Transaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Entity name used in error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// A single income or expense.
///
/// `amount` is always positive; the direction is given by the collection the
/// record belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: MoneyCents,
    #[serde(rename = "accountID")]
    pub account_id: Uuid,
    #[serde(rename = "categoryID")]
    pub category_id: Uuid,
    pub transaction_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MoneyCents>,
    #[serde(default, rename = "accountID", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, rename = "categoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.account_id.is_none()
            && self.category_id.is_none()
            && self.transaction_date.is_none()
            && self.description.is_none()
    }
}

impl Record for Transaction {
    type Patch = TransactionPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(account_id) = patch.account_id {
            self.account_id = account_id;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(transaction_date) = patch.transaction_date {
            self.transaction_date = transaction_date;
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}

pub(crate) fn amount(value: &Value) -> Result<MoneyCents, ValidationError> {
    Ok(MoneyCents::new(
        validate(value)
            .integer()?
            .bigger_than(0)?
            .smaller_or_equal_than(MoneyCents::MAX.cents())?
            .value(),
    ))
}

pub(crate) fn transaction_date(value: &Value) -> Result<NaiveDate, ValidationError> {
    validate(value).day_string()
}

fn description(value: &Value) -> Result<String, ValidationError> {
    Ok(validate(value).string()?.value().to_string())
}

pub(crate) fn create_payload(state: &State, data: &Fields) -> ResultEngine<Transaction> {
    ensure_supported(data, &FIELDS)?;
    Ok(Transaction {
        id: Uuid::now_v7(),
        amount: required(data, "amount", amount)?,
        account_id: required(data, "accountID", |v| {
            reference(&state.accounts, accounts::LABEL, v)
        })?,
        category_id: required(data, "categoryID", |v| {
            reference(&state.categories, categories::LABEL, v)
        })?,
        transaction_date: required(data, "transactionDate", transaction_date)?,
        description: optional(data, "description", description)?,
    })
}

pub(crate) fn update_payload(
    state: &State,
    kind: TransactionKind,
    id: Uuid,
    data: &Fields,
) -> ResultEngine<Option<Update<TransactionPatch>>> {
    let original = state
        .transactions(kind)
        .get(&id)
        .ok_or_else(|| not_found(kind.label(), id))?;
    ensure_supported(data, &FIELDS)?;

    let patch = TransactionPatch {
        amount: changed(optional(data, "amount", amount)?, &original.amount),
        account_id: changed(
            optional(data, "accountID", |v| {
                reference(&state.accounts, accounts::LABEL, v)
            })?,
            &original.account_id,
        ),
        category_id: changed(
            optional(data, "categoryID", |v| {
                reference(&state.categories, categories::LABEL, v)
            })?,
            &original.category_id,
        ),
        transaction_date: changed(
            optional(data, "transactionDate", transaction_date)?,
            &original.transaction_date,
        ),
        description: optional(data, "description", description)?
            .filter(|value| original.description.as_ref() != Some(value)),
    };
    Ok((!patch.is_empty()).then_some(Update { id, patch }))
}

pub(crate) fn delete_payload(
    state: &State,
    kind: TransactionKind,
    id: Uuid,
) -> ResultEngine<Delete> {
    if !state.transactions(kind).contains_key(&id) {
        return Err(not_found(kind.label(), id));
    }
    Ok(Delete { id })
}
