use uuid::Uuid;

use crate::{
    Category, Fields, ResultEngine, categories,
    error::not_found,
    event::{Action, Change},
    persistence::EventLog,
};

use super::{Engine, written};

impl<L: EventLog> Engine<L> {
    pub fn category(&self, id: Uuid) -> ResultEngine<Category> {
        self.state()
            .categories
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(categories::LABEL, id))
    }

    #[must_use]
    pub fn list_categories(&self) -> Vec<Category> {
        self.state().categories.values().cloned().collect()
    }

    pub fn create_category(&mut self, data: &Fields) -> ResultEngine<Category> {
        let category = categories::create_payload(data)?;
        self.dispatch(Action::Categories(Change::Create(category.clone())))?;
        Ok(category)
    }

    pub fn update_category(&mut self, id: Uuid, data: &Fields) -> ResultEngine<Category> {
        match categories::update_payload(&self.state().categories, id, data)? {
            Some(update) => self.dispatch(Action::Categories(Change::Update(update)))?,
            None => return self.category(id),
        }
        written(&self.state().categories, id, categories::LABEL)
    }

    /// Remove a category. Records using it stay in place.
    pub fn delete_category(&mut self, id: Uuid) -> ResultEngine<Category> {
        let delete = categories::delete_payload(&self.state().categories, id)?;
        let removed = self.category(id)?;
        self.dispatch(Action::Categories(Change::Delete(delete)))?;
        Ok(removed)
    }
}
