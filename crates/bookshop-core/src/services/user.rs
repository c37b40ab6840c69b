use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::domain::{Account, Page, Paged};
use crate::error::DomainError;
use crate::ports::{AccountRepository, UserService};

pub struct Users {
    accounts: Arc<dyn AccountRepository>,
}

impl Users {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl UserService for Users {
    async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "account",
                id,
            })
    }

    async fn list(&self, _ctx: &RequestContext, page: Page) -> Result<Paged<Account>, DomainError> {
        Ok(self.accounts.list(page).await?)
    }
}
