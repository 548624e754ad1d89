//! # Category Client
//!
//! Category service: CRUD over the category store with unique names.
use super::ProductClient;
use crate::category_actor::CategoryError;
use crate::model::{Category, CategoryCreate, CategoryId, CategoryQuery, CategoryUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

#[async_trait]
impl ActorClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CategoryError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CategoryError::NotFound(id),
            Err(other) => CategoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }

    /// Fails with `Duplicate` if the name is taken.
    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryCreate) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, CategoryError> {
        self.get(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    /// All categories in id order.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        self.inner
            .find(CategoryQuery::All)
            .await
            .map_err(Self::map_error)
    }

    /// Replaces name and description. A new name must not belong to another category.
    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Refused with `InUse` while `products` still lists a product in the category.
    #[instrument(skip(self, products))]
    pub async fn delete_category(
        &self,
        id: CategoryId,
        products: &ProductClient,
    ) -> Result<(), CategoryError> {
        let in_use = products
            .category_in_use(id)
            .await
            .map_err(|e| CategoryError::ActorCommunicationError(e.to_string()))?;
        if in_use {
            warn!(category_id = %id, "Refusing to delete a category that still has products");
            return Err(CategoryError::InUse(id.to_string()));
        }
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};
    use actor_framework::mock::MockClient;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product_in(category_id: CategoryId) -> Product {
        Product {
            id: ProductId(1),
            name: "Atlas".into(),
            description: None,
            price: Decimal::TEN,
            stock: 1,
            category_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_get(CategoryId(7)).return_ok(None);

        let client = CategoryClient::new(mock.client());
        let err = client.get_category(CategoryId(7)).await.unwrap_err();
        assert_eq!(err, CategoryError::NotFound("category_7".into()));

        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_errors_survive_the_actor_boundary() {
        let mut mock = MockClient::<Category>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(CategoryError::Duplicate(
                "Books".into(),
            ))));
        mock.expect_delete(CategoryId(3))
            .return_err(FrameworkError::NotFound("category_3".into()));
        mock.expect_find().return_err(FrameworkError::ActorClosed);

        let mut product_mock = MockClient::<Product>::new();
        product_mock.expect_find().return_ok(vec![]);
        let products = ProductClient::new(product_mock.client());

        let client = CategoryClient::new(mock.client());
        let err = client
            .create_category(CategoryCreate {
                name: "Books".into(),
                description: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::Duplicate("Books".into()));

        let err = client
            .delete_category(CategoryId(3), &products)
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::NotFound("category_3".into()));

        let err = client.list_categories().await.unwrap_err();
        assert!(matches!(err, CategoryError::ActorCommunicationError(_)));

        mock.verify();
        product_mock.verify();
    }

    #[tokio::test]
    async fn test_category_with_products_is_not_deleted() {
        // No delete expected: the category store must not be asked
        let mock = MockClient::<Category>::new();
        let mut product_mock = MockClient::<Product>::new();
        product_mock
            .expect_find()
            .return_ok(vec![product_in(CategoryId(2))]);

        let client = CategoryClient::new(mock.client());
        let products = ProductClient::new(product_mock.client());
        let err = client
            .delete_category(CategoryId(2), &products)
            .await
            .unwrap_err();
        assert_eq!(err, CategoryError::InUse("category_2".into()));

        mock.verify();
        product_mock.verify();
    }
}
