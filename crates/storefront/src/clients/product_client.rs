//! # Product Client
//!
//! Product catalog service. Wraps a `ResourceClient<Product>` and exposes CRUD, the filtered
//! catalog reads and the multi-line stock operations used by the order actor.
use crate::model::{
    CategoryId, Product, ProductCreate, ProductId, ProductQuery, ProductSortField, ProductUpdate,
    StockReservation,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, Page, PageRequest, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::InvalidPage(msg)) => ProductError::Validation(msg),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: &ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// The referenced category must exist.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, ProductError> {
        self.find_page(ProductQuery::All, page).await
    }

    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, ProductError> {
        self.find_page(ProductQuery::Category(category_id), page)
            .await
    }

    /// Products priced within `[min, max]`, both ends included.
    #[instrument(skip(self))]
    pub async fn products_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, ProductError> {
        if min > max {
            return Err(ProductError::Validation(format!(
                "minimum price {min} is greater than maximum price {max}"
            )));
        }
        self.find_page(ProductQuery::PriceBetween { min, max }, page)
            .await
    }

    /// Products with stock strictly below `threshold`, in id order.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<Product>, ProductError> {
        self.inner
            .find(ProductQuery::StockBelow(threshold))
            .await
            .map_err(Self::map_error)
    }

    async fn find_page(
        &self,
        query: ProductQuery,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, ProductError> {
        self.inner
            .find_page(query, page)
            .await
            .map_err(Self::map_error)
    }

    /// Whether any product still belongs to `category_id`.
    #[instrument(skip(self))]
    pub async fn category_in_use(&self, category_id: CategoryId) -> Result<bool, ProductError> {
        self.inner
            .find(ProductQuery::Category(category_id))
            .await
            .map(|products| !products.is_empty())
            .map_err(Self::map_error)
    }

    /// Reserves every `(product, quantity)` line in one transaction.
    ///
    /// Lines are checked in order; the first missing product or short line fails the call and
    /// no stock changes. A product listed twice must cover both lines together.
    #[instrument(skip(self))]
    pub async fn reserve_all(
        &self,
        lines: &[(ProductId, u32)],
    ) -> Result<Vec<StockReservation>, ProductError> {
        debug!(lines = lines.len(), "Reserving stock");
        let actions = lines
            .iter()
            .map(|&(id, quantity)| (id, ProductAction::Reserve(quantity)))
            .collect();
        self.inner
            .transact(actions)
            .await
            .map_err(Self::map_error)?
            .into_iter()
            .map(|result| match result {
                ProductActionResult::Reserved(reservation) => Ok(reservation),
                other => Err(unexpected(&other)),
            })
            .collect()
    }

    /// Puts every `(product, quantity)` line back into stock in one transaction.
    ///
    /// Products deleted since the stock was taken are skipped with a warning and the
    /// transaction is sent again with the lines that are left.
    #[instrument(skip(self))]
    pub async fn restock_all(&self, lines: &[(ProductId, u32)]) -> Result<(), ProductError> {
        let mut lines = lines.to_vec();
        while !lines.is_empty() {
            debug!(lines = lines.len(), "Restoring stock");
            let actions = lines
                .iter()
                .map(|&(id, quantity)| (id, ProductAction::Restock(quantity)))
                .collect();
            match self.inner.transact(actions).await {
                Ok(_) => return Ok(()),
                Err(FrameworkError::NotFound(missing)) => {
                    let before = lines.len();
                    lines.retain(|(id, _)| id.to_string() != missing);
                    if lines.len() == before {
                        return Err(ProductError::NotFound(missing));
                    }
                    warn!(product_id = %missing, "Product no longer exists, skipping restock");
                }
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Ok(())
    }
}
