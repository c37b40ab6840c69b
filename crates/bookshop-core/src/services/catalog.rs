use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{Book, Page, Paged};
use crate::error::DomainError;
use crate::ports::{BookRepository, CatalogService};

/// Read-only view over the book catalog.
pub struct Catalog {
    books: Arc<dyn BookRepository>,
}

impl Catalog {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl CatalogService for Catalog {
    async fn search(&self, _ctx: &RequestContext, query: &str) -> Result<Vec<Book>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::Validation("search query is empty".to_string()));
        }
        Ok(self.books.search(query).await?)
    }

    async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Book, DomainError> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "book",
                id,
            })
    }

    async fn list(&self, _ctx: &RequestContext, page: Page) -> Result<Paged<Book>, DomainError> {
        Ok(self.books.list(page).await?)
    }
}
