//! Query-string parameters.
//!
//! Everything arrives as text and is parsed here so a bad value turns into a `Validation`
//! error with a readable message instead of a generic rejection.

use crate::config::ApiConfig;
use crate::error::ServiceError;
use crate::model::{CategoryId, OrderStatus, OrderSortField, ProductSortField};
use actor_framework::{Direction, PageRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// `page`, `size`, `sortBy` and `direction`, shared by every paged listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

fn parse_field<T>(name: &str, value: Option<&str>) -> Result<Option<T>, ServiceError>
where
    T: FromStr,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::Validation(format!("Invalid value for {name}: '{raw}'"))),
    }
}

impl Paging {
    /// Resolves the request against the defaults. `size` is capped at the configured maximum
    /// and an unknown `sortBy` is rejected; `direction` falls back to `default_direction`
    /// when absent and to ascending when unrecognised.
    pub fn resolve<S>(
        &self,
        api: &ApiConfig,
        default_sort: S,
        default_direction: Direction,
    ) -> Result<PageRequest<S>, ServiceError>
    where
        S: FromStr<Err = String>,
    {
        let page = parse_field::<usize>("page", self.page.as_deref())?.unwrap_or(0);
        let size = parse_field::<usize>("size", self.size.as_deref())?
            .unwrap_or(api.default_page_size);
        if size == 0 {
            return Err(ServiceError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => default_sort,
            Some(raw) => raw.parse().map_err(ServiceError::Validation)?,
        };
        let direction = match self.direction.as_deref() {
            None => default_direction,
            Some(raw) => Direction::parse_lenient(raw.trim()),
        };

        Ok(PageRequest::new(
            page,
            size.min(api.max_page_size),
            sort_by,
            direction,
        ))
    }
}

/// `GET /api/products`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub category_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// What `GET /api/products` should list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    All,
    Category(CategoryId),
    PriceBetween { min: Decimal, max: Decimal },
}

impl ProductListParams {
    /// A category wins over a price range; a range needs both bounds, otherwise it is ignored.
    pub fn filter(&self) -> Result<ProductFilter, ServiceError> {
        if let Some(id) = parse_field::<u32>("categoryId", self.category_id.as_deref())? {
            return Ok(ProductFilter::Category(CategoryId(id)));
        }
        let min = parse_field::<Decimal>("minPrice", self.min_price.as_deref())?;
        let max = parse_field::<Decimal>("maxPrice", self.max_price.as_deref())?;
        Ok(match (min, max) {
            (Some(min), Some(max)) => ProductFilter::PriceBetween { min, max },
            _ => ProductFilter::All,
        })
    }

    pub fn page_request(
        &self,
        api: &ApiConfig,
    ) -> Result<PageRequest<ProductSortField>, ServiceError> {
        self.paging
            .resolve(api, ProductSortField::Id, Direction::Asc)
    }
}

/// `GET /api/products/low-stock`
#[derive(Debug, Default, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<String>,
}

impl LowStockParams {
    pub fn threshold(&self, api: &ApiConfig) -> Result<u32, ServiceError> {
        Ok(parse_field("threshold", self.threshold.as_deref())?.unwrap_or(api.low_stock_threshold))
    }
}

/// `GET /api/orders`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListParams {
    pub status: Option<String>,
    pub customer_email: Option<String>,
    #[serde(flatten)]
    pub paging: Paging,
}

/// What `GET /api/orders` should list.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    All,
    Status(OrderStatus),
    CustomerEmail(String),
}

impl OrderListParams {
    /// A status wins over a customer email.
    pub fn filter(&self) -> Result<OrderFilter, ServiceError> {
        if let Some(raw) = self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return raw
                .parse()
                .map(OrderFilter::Status)
                .map_err(ServiceError::Validation);
        }
        Ok(match self.customer_email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => OrderFilter::CustomerEmail(email.to_string()),
            _ => OrderFilter::All,
        })
    }

    pub fn page_request(
        &self,
        api: &ApiConfig,
    ) -> Result<PageRequest<OrderSortField>, ServiceError> {
        self.paging
            .resolve(api, OrderSortField::CreatedAt, Direction::Desc)
    }
}

/// `PATCH /api/orders/:id/status`
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}

impl StatusParams {
    pub fn status(&self) -> Result<OrderStatus, ServiceError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Err(ServiceError::Validation(
                "Query parameter 'status' is required".to_string(),
            )),
            Some(raw) => raw.parse().map_err(ServiceError::Validation),
        }
    }
}
