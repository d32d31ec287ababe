//! Account and balance persistence.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A registered account row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub name: String,
    pub email: String,
    pub document: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Accumulated balance for one `(account_id, asset_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub account_id: String,
    pub asset_id: String,
    pub quantity: f64,
}

/// Port for account and balance persistence operations.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a freshly created account.
    async fn insert_account(&self, account: &Account) -> Result<()>;

    /// Find an account by its id.
    async fn find_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>>;

    /// Accumulate `quantity` into the balance for the pair, creating the
    /// row when absent. The implementation owns atomicity.
    async fn add_balance(
        &self,
        account_id: &str,
        asset_id: &str,
        quantity: f64,
    ) -> Result<()>;

    /// Find the balance row for an `(account_id, asset_id)` pair.
    async fn find_balance(
        &self,
        account_id: &str,
        asset_id: &str,
    ) -> Result<Option<AssetBalance>>;
}
