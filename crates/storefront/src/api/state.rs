use crate::clients::{CategoryClient, OrderClient, ProductClient};
use crate::config::ApiConfig;
use crate::lifecycle::StoreSystem;

/// Application state shared across all HTTP handlers.
///
/// Holds clones of the store clients. The router must be dropped before
/// [`StoreSystem::shutdown`] can finish, since these clones keep the actors alive.
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub api: ApiConfig,
}

impl AppState {
    pub fn new(system: &StoreSystem, api: ApiConfig) -> Self {
        Self {
            categories: system.category_client.clone(),
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            api,
        }
    }
}
