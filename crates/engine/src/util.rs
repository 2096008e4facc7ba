//! Internal helpers for payload builders.
//!
//! These utilities are **not** part of the public API. They centralize
//! field lookup and error wrapping so every entity reports invalid input the
//! same way: `"<field>: <reason>"`.

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::{EngineError, Fields, ResultEngine, validate::ValidationError};

/// Reject any field name outside `allowed`.
pub(crate) fn ensure_supported(data: &Fields, allowed: &[&str]) -> ResultEngine<()> {
    match data.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(EngineError::InvalidRequest(format!(
            "field is not supported: {key}"
        ))),
        None => Ok(()),
    }
}

/// Parse a field that must be present.
pub(crate) fn required<T>(
    data: &Fields,
    key: &str,
    parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
) -> ResultEngine<T> {
    let value = data
        .get(key)
        .ok_or_else(|| EngineError::InvalidRequest(format!("missing required field: {key}")))?;
    parse(value).map_err(|err| invalid_field(key, err))
}

/// Parse a field when present.
pub(crate) fn optional<T>(
    data: &Fields,
    key: &str,
    parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
) -> ResultEngine<Option<T>> {
    data.get(key)
        .map(|value| parse(value).map_err(|err| invalid_field(key, err)))
        .transpose()
}

/// Keep `candidate` only when it differs from `current`.
pub(crate) fn changed<T: PartialEq>(candidate: Option<T>, current: &T) -> Option<T> {
    candidate.filter(|value| value != current)
}

/// Resolve a foreign key against an entity collection.
pub(crate) fn reference<T>(
    collection: &BTreeMap<Uuid, T>,
    label: &str,
    value: &Value,
) -> Result<Uuid, ValidationError> {
    let raw = crate::validate::validate(value).string()?.value();
    Uuid::parse_str(raw)
        .ok()
        .filter(|id| collection.contains_key(id))
        .ok_or_else(|| ValidationError::new(format!("no {label} with id: {raw}")))
}

fn invalid_field(key: &str, err: ValidationError) -> EngineError {
    EngineError::InvalidRequest(format!("{key}: {err}"))
}
