//! Category records used to group income and expenses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Fields, ResultEngine,
    error::not_found,
    event::{Delete, Record, Update},
    util::{changed, ensure_supported, optional, required},
    validate::{ValidationError, validate},
};

pub(crate) const LABEL: &str = "category";

const FIELDS: [&str; 1] = ["name"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CategoryPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl Record for Category {
    type Patch = CategoryPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
    }
}

fn name(value: &serde_json::Value) -> Result<String, ValidationError> {
    Ok(validate(value).string()?.not_empty()?.value().to_string())
}

pub(crate) fn create_payload(data: &Fields) -> ResultEngine<Category> {
    ensure_supported(data, &FIELDS)?;
    Ok(Category {
        id: Uuid::now_v7(),
        name: required(data, "name", name)?,
    })
}

pub(crate) fn update_payload(
    categories: &BTreeMap<Uuid, Category>,
    id: Uuid,
    data: &Fields,
) -> ResultEngine<Option<Update<CategoryPatch>>> {
    let original = categories.get(&id).ok_or_else(|| not_found(LABEL, id))?;
    ensure_supported(data, &FIELDS)?;

    let patch = CategoryPatch {
        name: changed(optional(data, "name", name)?, &original.name),
    };
    Ok((!patch.is_empty()).then_some(Update { id, patch }))
}

pub(crate) fn delete_payload(
    categories: &BTreeMap<Uuid, Category>,
    id: Uuid,
) -> ResultEngine<Delete> {
    if !categories.contains_key(&id) {
        return Err(not_found(LABEL, id));
    }
    Ok(Delete { id })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::EngineError;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn create_and_rename() {
        let category = create_payload(&fields(json!({"name": "Food"}))).unwrap();
        assert_eq!(category.name, "Food");
        let categories = BTreeMap::from([(category.id, category.clone())]);

        let update = update_payload(&categories, category.id, &fields(json!({"name": "Groceries"})))
            .unwrap()
            .unwrap();
        assert_eq!(update.patch.name.as_deref(), Some("Groceries"));

        assert!(
            update_payload(&categories, category.id, &fields(json!({"name": "Food"})))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn name_must_be_a_non_empty_string() {
        assert_eq!(
            create_payload(&fields(json!({"name": 42}))).unwrap_err(),
            EngineError::InvalidRequest("name: must be a string".to_string())
        );
        assert_eq!(
            create_payload(&fields(json!({}))).unwrap_err(),
            EngineError::InvalidRequest("missing required field: name".to_string())
        );
    }

    #[test]
    fn unknown_category_is_not_found() {
        let categories = BTreeMap::new();
        let id = Uuid::now_v7();
        assert_eq!(
            delete_payload(&categories, id).unwrap_err(),
            EngineError::NotFound(format!("no category with id: {id}"))
        );
    }
}
