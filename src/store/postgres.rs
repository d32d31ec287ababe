//! PostgreSQL implementation of the account store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{Account, AccountStore, AssetBalance};
use crate::error::Result;

pub const DEFAULT_CREDENTIALS: &str = "postgres";
pub const DEFAULT_DATABASE_NAME: &str = "passbook";
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// sqlx-backed store sharing one pool for the process lifetime.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a [`PgStore`] over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Init database connection.
    pub async fn connect(
        hostname: &str,
        username: &str,
        password: &str,
        db: &str,
        pool: u32,
    ) -> std::result::Result<Self, sqlx::Error> {
        let addr = format!("postgres://{username}:{password}@{hostname}/{db}");
        let pool = PgPoolOptions::new()
            .max_connections(pool)
            .connect(&addr)
            .await?;

        tracing::info!(%hostname, %db, "postgres connected");

        Ok(Self { pool })
    }

    /// Underlying pool, used for startup migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO account (account_id, name, email, document, password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&account.account_id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.document)
        .bind(&account.password)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_account(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, name, email, document, password, created_at
            FROM account
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn add_balance(
        &self,
        account_id: &str,
        asset_id: &str,
        quantity: f64,
    ) -> Result<()> {
        // Accumulation is atomic at the row level, concurrent deposits on
        // the same pair cannot lose increments.
        sqlx::query(
            r#"
            INSERT INTO account_asset (account_id, asset_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, asset_id)
            DO UPDATE SET quantity = account_asset.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(account_id)
        .bind(asset_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_balance(
        &self,
        account_id: &str,
        asset_id: &str,
    ) -> Result<Option<AssetBalance>> {
        let balance = sqlx::query_as::<_, AssetBalance>(
            r#"
            SELECT account_id, asset_id, quantity
            FROM account_asset
            WHERE account_id = $1 AND asset_id = $2
            "#,
        )
        .bind(account_id)
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(balance)
    }
}
