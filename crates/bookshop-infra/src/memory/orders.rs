use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookshop_core::domain::Order;
use bookshop_core::error::RepoError;
use bookshop_core::ports::{BaseRepository, OrderRepository};

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Order, Uuid> for InMemoryOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn save(&self, order: Order) -> Result<Order, RepoError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.orders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    /// Newest first.
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, RepoError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.account_id == account_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
