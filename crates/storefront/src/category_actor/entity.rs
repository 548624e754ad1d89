use super::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryQuery, CategoryUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;

const MAX_NAME_LEN: usize = 100;

/// Trims the name and checks it is non-blank and at most 100 characters.
pub(crate) fn normalize_name(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::Validation("name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CategoryError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Action = ();
    type ActionResult = ();
    type Query = CategoryQuery;
    type SortField = ();
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, Self::Error> {
        let name = normalize_name(&params.name)?;
        Ok(Self::new(id, name, params.description))
    }

    fn matches(&self, query: &CategoryQuery) -> bool {
        match query {
            CategoryQuery::All => true,
        }
    }

    fn compare_by(&self, other: &Self, _field: &()) -> Ordering {
        self.id.cmp(&other.id)
    }

    /// Names are unique across categories.
    fn conflicts_with(&self, other: &Self) -> Option<CategoryError> {
        (self.name == other.name).then(|| CategoryError::Duplicate(self.name.clone()))
    }

    async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
        self.name = normalize_name(&update.name)?;
        self.description = update.description;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
