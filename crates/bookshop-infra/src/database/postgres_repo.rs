//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use bookshop_core::domain::{Account, Book, Order, Page, Paged};
use bookshop_core::error::RepoError;
use bookshop_core::ports::{AccountRepository, BookRepository, OrderRepository};

use super::entity::account::{self, Entity as AccountEntity};
use super::entity::book::{self, Entity as BookEntity};
use super::entity::order::{self, Entity as OrderEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL account repository.
pub type PostgresAccountRepository = PostgresBaseRepository<AccountEntity>;

/// PostgreSQL book repository.
pub type PostgresBookRepository = PostgresBaseRepository<BookEntity>;

/// PostgreSQL order repository.
pub type PostgresOrderRepository = PostgresBaseRepository<OrderEntity>;

/// Keep the first character of the local part, for logs without PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 1 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        tracing::debug!(email = %mask_email(email), "Finding account by email");

        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_reset_key(&self, reset_key: &str) -> Result<Option<Account>, RepoError> {
        let result = AccountEntity::find()
            .filter(account::Column::ResetKey.eq(reset_key))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, page: Page) -> Result<Paged<Account>, RepoError> {
        let total = AccountEntity::find()
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let items = AccountEntity::find()
            .order_by_asc(account::Column::CreatedAt)
            .order_by_asc(account::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(Paged::new(
            items.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    /// Title substring or exact ISBN.
    async fn search(&self, query: &str) -> Result<Vec<Book>, RepoError> {
        let result = BookEntity::find()
            .filter(
                Condition::any()
                    .add(book::Column::Title.contains(query))
                    .add(book::Column::Isbn.eq(query)),
            )
            .order_by_asc(book::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list(&self, page: Page) -> Result<Paged<Book>, RepoError> {
        let total = BookEntity::find()
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let items = BookEntity::find()
            .order_by_asc(book::Column::Title)
            .order_by_asc(book::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(Paged::new(
            items.into_iter().map(Into::into).collect(),
            total,
            page,
        ))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, RepoError> {
        let result = OrderEntity::find()
            .filter(order::Column::AccountId.eq(account_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("reader@example.com"), "r***@example.com");
        assert_eq!(mask_email("r@example.com"), "***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
