use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::clients::CategoryClient;
use crate::model::{
    CategoryId, Product, ProductCreate, ProductId, ProductQuery, ProductSortField, ProductUpdate,
    StockReservation,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::cmp::Ordering;

const MAX_NAME_LEN: usize = 100;
const MAX_PRICE_SCALE: u32 = 2;

pub(crate) fn normalize_name(name: &str) -> Result<String, ProductError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::Validation("name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ProductError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Prices are non-negative with at most two fractional digits (`10.50`, not `10.505`).
pub(crate) fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(ProductError::Validation(format!(
            "price must have at most {MAX_PRICE_SCALE} decimal places, got {price}"
        )));
    }
    Ok(())
}

async fn ensure_category(ctx: &CategoryClient, id: CategoryId) -> Result<(), ProductError> {
    let exists = ctx
        .exists(id)
        .await
        .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
    if exists {
        Ok(())
    } else {
        Err(ProductError::CategoryNotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Query = ProductQuery;
    type SortField = ProductSortField;
    type Context = CategoryClient;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let name = normalize_name(&params.name)?;
        validate_price(params.price)?;
        let mut product = Self::new(id, name, params.price, params.stock, params.category_id);
        product.description = params.description;
        Ok(product)
    }

    fn matches(&self, query: &ProductQuery) -> bool {
        match query {
            ProductQuery::All => true,
            ProductQuery::Category(category_id) => self.category_id == *category_id,
            ProductQuery::PriceBetween { min, max } => self.price >= *min && self.price <= *max,
            ProductQuery::StockBelow(threshold) => self.stock < *threshold,
        }
    }

    fn compare_by(&self, other: &Self, field: &ProductSortField) -> Ordering {
        match field {
            ProductSortField::Id => self.id.cmp(&other.id),
            ProductSortField::Name => self.name.cmp(&other.name),
            ProductSortField::Price => self.price.cmp(&other.price),
            ProductSortField::Stock => self.stock.cmp(&other.stock),
            ProductSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    /// The category must exist.
    async fn on_create(&mut self, ctx: &CategoryClient) -> Result<(), Self::Error> {
        ensure_category(ctx, self.category_id).await
    }

    /// Handles updates to the Product entity. Every field is optional; a new category must
    /// exist.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        ctx: &CategoryClient,
    ) -> Result<(), Self::Error> {
        if let Some(category_id) = update.category_id {
            ensure_category(ctx, category_id).await?;
            self.category_id = category_id;
        }
        if let Some(name) = update.name {
            self.name = normalize_name(&name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `Reserve`: Decrements stock if enough is on hand, returns the reservation snapshot
    /// - `Restock`: Increments stock, returns the new level
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &CategoryClient,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::Reserve(quantity) => {
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        product: self.name.clone(),
                        available: self.stock,
                        requested: quantity,
                    });
                }
                self.stock -= quantity;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::Reserved(StockReservation {
                    product_id: self.id,
                    product_name: self.name.clone(),
                    unit_price: self.price,
                    quantity,
                }))
            }
            ProductAction::Restock(quantity) => {
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::Validation(format!(
                        "restocking {quantity} units of {} would overflow its stock",
                        self.name
                    ))
                })?;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::Restocked(self.stock))
            }
        }
    }
}
