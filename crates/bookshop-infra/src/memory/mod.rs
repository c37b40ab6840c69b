//! In-memory repositories - used when no database is configured and in tests.
//! Data is lost on process restart.

mod accounts;
mod books;
mod orders;

pub use accounts::InMemoryAccountRepository;
pub use books::InMemoryBookRepository;
pub use orders::InMemoryOrderRepository;

use bookshop_core::domain::{Page, Paged};

/// Slice a full, already ordered result set into one page.
fn paginate<T: Clone>(all: &[T], page: Page) -> Paged<T> {
    let items = all
        .iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .cloned()
        .collect();
    Paged::new(items, all.len() as u64, page)
}
