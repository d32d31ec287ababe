use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::{Field, Result, ServerError};
use crate::validation;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub account_id: String,
    pub asset_id: String,
    pub quantity: f64,
}

/// Handler to credit an asset balance. No upper bound on the amount.
pub async fn handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Body>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(body) = payload?;

    if !validation::is_valid_asset_id(&body.asset_id) {
        return Err(ServerError::Invalid(Field::AssetId));
    }
    if !validation::is_valid_quantity(body.quantity) {
        return Err(ServerError::Invalid(Field::Quantity));
    }
    if state.store.find_account(&body.account_id).await?.is_none() {
        return Err(ServerError::Invalid(Field::AccountId));
    }

    state
        .store
        .add_balance(&body.account_id, &body.asset_id, body.quantity)
        .await?;

    tracing::info!(
        account_id = %body.account_id,
        asset_id = %body.asset_id,
        quantity = body.quantity,
        "deposit recorded"
    );

    Ok(StatusCode::NO_CONTENT)
}
