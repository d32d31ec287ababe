//! In-memory store. Backs the service when no PostgreSQL instance is
//! configured and doubles the port in router tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Account, AccountStore, AssetBalance};
use crate::error::Result;

#[derive(Default)]
struct Tables {
    accounts: HashMap<String, Account>,
    balances: HashMap<(String, String), f64>,
}

/// In-memory [`AccountStore`] implementation.
#[derive(Default, Clone)]
pub struct MemStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemStore {
    /// Create an empty [`MemStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemStore {
    async fn insert_account(&self, account: &Account) -> Result<()> {
        self.tables
            .write()
            .await
            .accounts
            .insert(account.account_id.clone(), account.clone());

        Ok(())
    }

    async fn find_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>> {
        Ok(self.tables.read().await.accounts.get(account_id).cloned())
    }

    async fn add_balance(
        &self,
        account_id: &str,
        asset_id: &str,
        quantity: f64,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        *tables
            .balances
            .entry((account_id.to_owned(), asset_id.to_owned()))
            .or_insert(0.0) += quantity;

        Ok(())
    }

    async fn find_balance(
        &self,
        account_id: &str,
        asset_id: &str,
    ) -> Result<Option<AssetBalance>> {
        Ok(self
            .tables
            .read()
            .await
            .balances
            .get(&(account_id.to_owned(), asset_id.to_owned()))
            .map(|&quantity| AssetBalance {
                account_id: account_id.to_owned(),
                asset_id: asset_id.to_owned(),
                quantity,
            }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn account(account_id: &str) -> Account {
        Account {
            account_id: account_id.to_owned(),
            name: "John Doe".to_owned(),
            email: "john.doe@gmail.com".to_owned(),
            document: "97456321558".to_owned(),
            password: "asdQWE123".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_account_roundtrip() {
        let store = MemStore::new();
        store.insert_account(&account("abc")).await.unwrap();

        let found = store.find_account("abc").await.unwrap().unwrap();
        assert_eq!(found.name, "John Doe");
        assert!(store.find_account("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deposits_accumulate() {
        let store = MemStore::new();
        store.add_balance("abc", "BTC", 10.0).await.unwrap();
        store.add_balance("abc", "BTC", 2.5).await.unwrap();

        let balance =
            store.find_balance("abc", "BTC").await.unwrap().unwrap();
        assert_eq!(balance.quantity, 12.5);
    }

    #[tokio::test]
    async fn test_balances_are_per_pair() {
        let store = MemStore::new();
        store.add_balance("abc", "BTC", 1.0).await.unwrap();

        assert!(store.find_balance("abc", "USD").await.unwrap().is_none());
        assert!(store.find_balance("def", "BTC").await.unwrap().is_none());
    }
}
