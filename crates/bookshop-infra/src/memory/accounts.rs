use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bookshop_core::domain::{Account, Page, Paged};
use bookshop_core::error::RepoError;
use bookshop_core::ports::{AccountRepository, BaseRepository};

/// Account store keyed by id, enforcing unique emails like the database does.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Account, Uuid> for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, RepoError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.email == account.email && a.id != account.id)
        {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_reset_key(&self, reset_key: &str) -> Result<Option<Account>, RepoError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.reset_key.as_deref() == Some(reset_key))
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Paged<Account>, RepoError> {
        let mut all: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(super::paginate(&all, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_rejects_duplicate_email() {
        let repo = InMemoryAccountRepository::new();
        repo.save(Account::new("reader@example.com".into(), "h1".into()))
            .await
            .unwrap();

        let result = repo
            .save(Account::new("reader@example.com".into(), "h2".into()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_reset_key() {
        let repo = InMemoryAccountRepository::new();
        let mut account = Account::new("reader@example.com".into(), "hash".into());
        account.reset_key = Some("reset-123".into());
        let id = repo.save(account).await.unwrap().id;

        let by_email = repo.find_by_email("reader@example.com").await.unwrap();
        assert_eq!(by_email.map(|a| a.id), Some(id));

        let by_key = repo.find_by_reset_key("reset-123").await.unwrap();
        assert_eq!(by_key.map(|a| a.id), Some(id));
        assert!(repo.find_by_reset_key("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_pages() {
        let repo = InMemoryAccountRepository::new();
        for i in 0..5 {
            repo.save(Account::new(format!("reader{i}@example.com"), "hash".into()))
                .await
                .unwrap();
        }

        let page = repo.list(Page::new(Some(2), Some(4))).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 1);
    }
}
