//! Domain entities - the core business objects.

mod account;
mod book;
mod claim;
mod order;
mod page;

pub use account::{Account, MIN_PASSWORD_LEN, NewAccount, normalize_email};
pub use book::Book;
pub use claim::{Bundle, Claim, session_key};
pub use order::{Order, OrderStatus};
pub use page::{Page, Paged};
