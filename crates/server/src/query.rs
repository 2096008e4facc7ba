//! Path and query string parsing shared by the handlers.

use std::collections::BTreeSet;

use axum::extract::{Query, rejection::QueryRejection};
use chrono::NaiveDate;
use engine::{EngineError, ListQuery, validate::validate};
use serde::Deserialize;
use uuid::Uuid;

use crate::ServerError;

/// Parse a path id. Anything that is not a UUID cannot name a record.
pub(crate) fn path_id(raw: &str, label: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw)
        .map_err(|_| EngineError::NotFound(format!("no {label} with id: {raw}")).into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    from_date: Option<String>,
    to_date: Option<String>,
    #[serde(rename = "accountIDs")]
    account_ids: Option<String>,
    #[serde(rename = "categoryIDs")]
    category_ids: Option<String>,
}

impl TryFrom<ListParams> for ListQuery {
    type Error = ServerError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        Ok(ListQuery {
            from_date: params.from_date.map(|raw| day("fromDate", raw)).transpose()?,
            to_date: params.to_date.map(|raw| day("toDate", raw)).transpose()?,
            account_ids: params
                .account_ids
                .map(|raw| ids("accountIDs", &raw))
                .transpose()?,
            category_ids: params
                .category_ids
                .map(|raw| ids("categoryIDs", &raw))
                .transpose()?,
        })
    }
}

pub(crate) fn list_query(
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ListQuery, ServerError> {
    let Query(params) = params?;
    ListQuery::try_from(params)
}

fn day(key: &str, raw: String) -> Result<NaiveDate, ServerError> {
    validate(&serde_json::Value::String(raw))
        .day_string()
        .map_err(|err| ServerError::Generic(format!("{key}: {err}")))
}

/// Comma separated ids; an empty value is the empty set.
fn ids(key: &str, raw: &str) -> Result<BTreeSet<Uuid>, ServerError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            Uuid::parse_str(id)
                .map_err(|_| ServerError::Generic(format!("{key}: invalid id: {id}")))
        })
        .collect()
}
