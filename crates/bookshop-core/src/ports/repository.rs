use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Book, Order, Page, Paged};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Account repository - the credential store.
#[async_trait]
pub trait AccountRepository: BaseRepository<Account, Uuid> {
    /// Find an account by its normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError>;

    async fn find_by_reset_key(&self, reset_key: &str) -> Result<Option<Account>, RepoError>;

    async fn list(&self, page: Page) -> Result<Paged<Account>, RepoError>;
}

/// Book repository.
#[async_trait]
pub trait BookRepository: BaseRepository<Book, Uuid> {
    /// Books whose title, isbn, authors or tags match `query`.
    async fn search(&self, query: &str) -> Result<Vec<Book>, RepoError>;

    async fn list(&self, page: Page) -> Result<Paged<Book>, RepoError>;
}

/// Order repository.
#[async_trait]
pub trait OrderRepository: BaseRepository<Order, Uuid> {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, RepoError>;
}
