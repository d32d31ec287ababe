//! Instance status document.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    name: String,
    version: String,
}

pub async fn handler(
    State(config): State<Arc<Configuration>>,
) -> Json<Response> {
    Json(Response {
        name: config.name.clone(),
        version: config.version.clone(),
    })
}
