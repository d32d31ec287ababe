//! Get account by id.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Result;
use crate::store::Account;

/// Handler returning the full account record, or `null` for an unknown id.
/// Missing-id shaping is deliberately left at that.
pub async fn handler(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Option<Account>>> {
    let account = state.store.find_account(&account_id).await?;

    Ok(Json(account))
}
