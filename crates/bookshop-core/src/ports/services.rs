//! Service capability sets exposed to the transport layer.
//!
//! Each trait is implemented once by the concrete service in
//! [`crate::services`] and once by the observability wrapper in the
//! infrastructure crate, so a decorated service is a drop-in replacement
//! for the base one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{Account, Book, Bundle, Claim, NewAccount, Order, Page, Paged};
use crate::error::DomainError;
use crate::ports::AuthError;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, ctx: &RequestContext, input: NewAccount)
    -> Result<Account, AuthError>;

    async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<Bundle, AuthError>;

    async fn validate_token(&self, ctx: &RequestContext, token: &str) -> Result<Claim, AuthError>;

    async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), AuthError>;

    async fn change_password(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    async fn request_password_reset(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<(), AuthError>;

    async fn reset_password(
        &self,
        ctx: &RequestContext,
        reset_key: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    async fn impersonate(
        &self,
        ctx: &RequestContext,
        caller: &Claim,
        account_id: Uuid,
    ) -> Result<Bundle, AuthError>;
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Book>, DomainError>;

    async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Book, DomainError>;

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Paged<Book>, DomainError>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn place_order(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        book_id: Uuid,
    ) -> Result<Order, DomainError>;

    async fn get_user_orders(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> Result<Vec<Order>, DomainError>;

    async fn cancel_order(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        order_id: Uuid,
    ) -> Result<Order, DomainError>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Account, DomainError>;

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Paged<Account>, DomainError>;
}
