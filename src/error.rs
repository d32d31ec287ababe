//! Error handler for passbook.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Field a guard check failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Document,
    Password,
    AssetId,
    Quantity,
    AccountId,
    Withdraw,
}

impl Field {
    /// Wire message for this field. Stable: the same invalid input always
    /// produces the same message.
    pub fn message(&self) -> &'static str {
        match self {
            Field::Name => "Invalid name",
            Field::Email => "Invalid email",
            Field::Document => "Invalid document",
            Field::Password => "Invalid password",
            Field::AssetId => "Invalid assetId",
            Field::Quantity => "Invalid quantity",
            Field::AccountId => "Invalid accountId",
            Field::Withdraw => "Invalid withdraw",
        }
    }
}

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{}", .0.message())]
    Invalid(Field),

    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("SQL request failed: {0}")]
    Sql(#[from] sqlx::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Invalid(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                field.message().to_owned(),
            ),

            ServerError::Axum(rejection) => {
                (rejection.status(), rejection.body_text())
            },

            ServerError::Sql(err) => {
                tracing::error!(error = %err, "server returned 500 status");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            },
        };

        json_error(status, &message)
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "error": message,
            })
            .to_string()
            .into(),
        )
        .unwrap_or_else(|_| Response::new("Internal server error".into()))
}
