use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{Order, OrderStatus};
use crate::error::DomainError;
use crate::ports::{BookRepository, OrderRepository, OrderService};

/// Order placement and history for a single account.
pub struct Orders {
    orders: Arc<dyn OrderRepository>,
    books: Arc<dyn BookRepository>,
}

impl Orders {
    pub fn new(orders: Arc<dyn OrderRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { orders, books }
    }
}

#[async_trait]
impl OrderService for Orders {
    async fn place_order(
        &self,
        _ctx: &RequestContext,
        account_id: Uuid,
        book_id: Uuid,
    ) -> Result<Order, DomainError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "book",
                id: book_id,
            })?;

        let order = self.orders.save(Order::place(account_id, &book)).await?;
        tracing::info!(order_id = %order.id, %account_id, %book_id, "Order placed");
        Ok(order)
    }

    async fn get_user_orders(
        &self,
        _ctx: &RequestContext,
        account_id: Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self.orders.find_by_account(account_id).await?)
    }

    async fn cancel_order(
        &self,
        _ctx: &RequestContext,
        account_id: Uuid,
        order_id: Uuid,
    ) -> Result<Order, DomainError> {
        // Someone else's order is reported as missing.
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .filter(|o| o.account_id == account_id)
            .ok_or(DomainError::NotFound {
                entity_type: "order",
                id: order_id,
            })?;

        if order.status == OrderStatus::Cancelled {
            return Err(DomainError::Validation(
                "order is already cancelled".to_string(),
            ));
        }

        order.status = OrderStatus::Cancelled;
        Ok(self.orders.save(order).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::domain::{Book, Page, Paged};
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    use super::*;

    #[derive(Default)]
    struct Shelf {
        books: Mutex<HashMap<Uuid, Book>>,
        orders: Mutex<HashMap<Uuid, Order>>,
    }

    #[async_trait]
    impl BaseRepository<Book, Uuid> for Shelf {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, RepoError> {
            Ok(self.books.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, book: Book) -> Result<Book, RepoError> {
            self.books.lock().unwrap().insert(book.id, book.clone());
            Ok(book)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.books.lock().unwrap().remove(&id).map(drop).ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl BookRepository for Shelf {
        async fn search(&self, _query: &str) -> Result<Vec<Book>, RepoError> {
            Ok(Vec::new())
        }

        async fn list(&self, page: Page) -> Result<Paged<Book>, RepoError> {
            Ok(Paged::new(Vec::new(), 0, page))
        }
    }

    #[async_trait]
    impl BaseRepository<Order, Uuid> for Shelf {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, order: Order) -> Result<Order, RepoError> {
            self.orders.lock().unwrap().insert(order.id, order.clone());
            Ok(order)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.orders.lock().unwrap().remove(&id).map(drop).ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl OrderRepository for Shelf {
        async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, RepoError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.account_id == account_id)
                .cloned()
                .collect())
        }
    }

    fn book() -> Book {
        Book {
            id: Uuid::new_v4(),
            isbn: "9780131103627".to_string(),
            title: "The C Programming Language".to_string(),
            authors: vec!["Kernighan".to_string(), "Ritchie".to_string()],
            genres: vec!["programming".to_string()],
            tags: Vec::new(),
            publication_year: 1988,
            price: 4_500,
            currency: "EUR".to_string(),
            sample_url: None,
        }
    }

    fn orders_with(book: &Book) -> (Orders, Arc<Shelf>) {
        let shelf = Arc::new(Shelf::default());
        shelf
            .books
            .lock()
            .unwrap()
            .insert(book.id, book.clone());
        (Orders::new(shelf.clone(), shelf.clone()), shelf)
    }

    fn ctx() -> RequestContext {
        RequestContext::new("orders-test")
    }

    #[tokio::test]
    async fn test_place_order_copies_price() {
        let book = book();
        let (orders, _) = orders_with(&book);
        let buyer = Uuid::new_v4();

        let order = orders.place_order(&ctx(), buyer, book.id).await.unwrap();

        assert_eq!(order.total, 4_500);
        assert_eq!(order.currency, "EUR");
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(orders.get_user_orders(&ctx(), buyer).await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_place_order_for_missing_book() {
        let (orders, _) = orders_with(&book());
        let missing = Uuid::new_v4();

        let result = orders.place_order(&ctx(), Uuid::new_v4(), missing).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "book", id }) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_cancel_someone_elses_order_is_not_found() {
        let book = book();
        let (orders, shelf) = orders_with(&book);
        let owner = Uuid::new_v4();
        let order = orders.place_order(&ctx(), owner, book.id).await.unwrap();

        let result = orders.cancel_order(&ctx(), Uuid::new_v4(), order.id).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound { entity_type: "order", id }) if id == order.id
        ));
        let stored = shelf.orders.lock().unwrap()[&order.id].clone();
        assert_eq!(stored.status, OrderStatus::Placed);
    }

    #[tokio::test]
    async fn test_cancel_twice_is_rejected() {
        let book = book();
        let (orders, _) = orders_with(&book);
        let owner = Uuid::new_v4();
        let order = orders.place_order(&ctx(), owner, book.id).await.unwrap();

        let cancelled = orders.cancel_order(&ctx(), owner, order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        assert!(matches!(
            orders.cancel_order(&ctx(), owner, order.id).await,
            Err(DomainError::Validation(_))
        ));
    }
}
