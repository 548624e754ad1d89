use crate::clients::{CategoryClient, OrderClient, ProductClient};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

/// The running store: one actor per resource, plus a client for each.
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::new(32);
///
/// let category = system.category_client.create_category(params).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub category_client: CategoryClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,

    /// Task handles of the running actors, awaited on shutdown
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns the Category, Product and Order actors, each with a mailbox of
    /// `channel_capacity` requests. Must be called inside a tokio runtime.
    pub fn new(channel_capacity: usize) -> Self {
        let (category_actor, category_client) = crate::category_actor::new(channel_capacity);
        let (product_actor, product_client) = crate::product_actor::new(channel_capacity);
        let (order_actor, order_client) = crate::order_actor::new(channel_capacity);

        let category_client = CategoryClient::new(category_client);
        let product_client = ProductClient::new(product_client);
        let order_client = OrderClient::new(order_client);

        let category_handle = tokio::spawn(category_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(category_client.clone()));
        let order_handle = tokio::spawn(order_actor.run(product_client.clone()));

        info!(channel_capacity, "Store system started");

        Self {
            category_client,
            product_client,
            order_client,
            handles: vec![order_handle, product_handle, category_handle],
        }
    }

    /// Drops the clients and waits for every actor to finish.
    ///
    /// Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down store system...");

        drop(self.order_client);
        drop(self.product_client);
        drop(self.category_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}
