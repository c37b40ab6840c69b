//! Service trait implementations for [`Observed`]. Each method forwards to
//! the inner service through the observer under its own name.

use async_trait::async_trait;
use uuid::Uuid;

use bookshop_core::RequestContext;
use bookshop_core::domain::{Account, Book, Bundle, Claim, NewAccount, Order, Page, Paged};
use bookshop_core::error::DomainError;
use bookshop_core::ports::{AuthError, AuthService, CatalogService, OrderService, UserService};

use super::observer::{Observed, Observer};

#[async_trait]
impl<S: AuthService, O: Observer> AuthService for Observed<S, O> {
    async fn register(
        &self,
        ctx: &RequestContext,
        input: NewAccount,
    ) -> Result<Account, AuthError> {
        self.observer
            .observe("register", self.inner.register(ctx, input))
            .await
    }

    async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<Bundle, AuthError> {
        self.observer
            .observe("login", self.inner.login(ctx, email, password))
            .await
    }

    async fn validate_token(&self, ctx: &RequestContext, token: &str) -> Result<Claim, AuthError> {
        self.observer
            .observe("validate_token", self.inner.validate_token(ctx, token))
            .await
    }

    async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), AuthError> {
        self.observer
            .observe("logout", self.inner.logout(ctx, token))
            .await
    }

    async fn change_password(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.observer
            .observe(
                "change_password",
                self.inner
                    .change_password(ctx, account_id, old_password, new_password),
            )
            .await
    }

    async fn request_password_reset(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<(), AuthError> {
        self.observer
            .observe(
                "request_password_reset",
                self.inner.request_password_reset(ctx, email),
            )
            .await
    }

    async fn reset_password(
        &self,
        ctx: &RequestContext,
        reset_key: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.observer
            .observe(
                "reset_password",
                self.inner.reset_password(ctx, reset_key, new_password),
            )
            .await
    }

    async fn impersonate(
        &self,
        ctx: &RequestContext,
        caller: &Claim,
        account_id: Uuid,
    ) -> Result<Bundle, AuthError> {
        self.observer
            .observe(
                "impersonate",
                self.inner.impersonate(ctx, caller, account_id),
            )
            .await
    }
}

#[async_trait]
impl<S: CatalogService, O: Observer> CatalogService for Observed<S, O> {
    async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Book>, DomainError> {
        self.observer
            .observe("search", self.inner.search(ctx, query))
            .await
    }

    async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Book, DomainError> {
        self.observer.observe("get", self.inner.get(ctx, id)).await
    }

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Paged<Book>, DomainError> {
        self.observer.observe("list", self.inner.list(ctx, page)).await
    }
}

#[async_trait]
impl<S: OrderService, O: Observer> OrderService for Observed<S, O> {
    async fn place_order(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        book_id: Uuid,
    ) -> Result<Order, DomainError> {
        self.observer
            .observe(
                "place_order",
                self.inner.place_order(ctx, account_id, book_id),
            )
            .await
    }

    async fn get_user_orders(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        self.observer
            .observe(
                "get_user_orders",
                self.inner.get_user_orders(ctx, account_id),
            )
            .await
    }

    async fn cancel_order(
        &self,
        ctx: &RequestContext,
        account_id: Uuid,
        order_id: Uuid,
    ) -> Result<Order, DomainError> {
        self.observer
            .observe(
                "cancel_order",
                self.inner.cancel_order(ctx, account_id, order_id),
            )
            .await
    }
}

#[async_trait]
impl<S: UserService, O: Observer> UserService for Observed<S, O> {
    async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Account, DomainError> {
        self.observer.observe("get", self.inner.get(ctx, id)).await
    }

    async fn list(&self, ctx: &RequestContext, page: Page) -> Result<Paged<Account>, DomainError> {
        self.observer.observe("list", self.inner.list(ctx, page)).await
    }
}
