use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookshop_core::domain::{Book, Page, Paged};
use bookshop_core::error::RepoError;
use bookshop_core::ports::{BaseRepository, BookRepository};

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<HashMap<Uuid, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `books`.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: RwLock::new(books.into_iter().map(|b| (b.id, b)).collect()),
        }
    }

    async fn sorted(&self) -> Vec<Book> {
        let mut all: Vec<Book> = self.books.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        all
    }
}

#[async_trait]
impl BaseRepository<Book, Uuid> for InMemoryBookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, RepoError> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn save(&self, book: Book) -> Result<Book, RepoError> {
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.books
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn search(&self, query: &str) -> Result<Vec<Book>, RepoError> {
        Ok(self
            .sorted()
            .await
            .into_iter()
            .filter(|b| b.matches(query))
            .collect())
    }

    async fn list(&self, page: Page) -> Result<Paged<Book>, RepoError> {
        Ok(super::paginate(&self.sorted().await, page))
    }
}
