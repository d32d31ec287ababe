use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::Utc;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::{Field, Result, ServerError};
use crate::store::Account;
use crate::validation;

#[derive(Debug, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    pub email: String,
    pub document: String,
    pub password: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub account_id: String,
}

/// Opaque account identifier from OS randomness.
fn fresh_account_id() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Handler to register an account.
///
/// Fields are checked in order, the first failing one answers alone.
pub async fn handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Body>, JsonRejection>,
) -> Result<Json<Response>> {
    let Json(body) = payload?;

    if !validation::is_valid_name(&body.name) {
        return Err(ServerError::Invalid(Field::Name));
    }
    if !validation::is_valid_email(&body.email) {
        return Err(ServerError::Invalid(Field::Email));
    }
    if !validation::is_valid_document(&body.document) {
        return Err(ServerError::Invalid(Field::Document));
    }
    if !validation::is_valid_password(&body.password) {
        return Err(ServerError::Invalid(Field::Password));
    }

    let account = Account {
        account_id: fresh_account_id(),
        name: body.name,
        email: body.email,
        document: body.document,
        password: body.password,
        created_at: Utc::now(),
    };
    state.store.insert_account(&account).await?;

    tracing::info!(account_id = %account.account_id, "account created");

    Ok(Json(Response {
        account_id: account.account_id,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use super::*;
    use crate::{app, make_request, router};

    fn valid_body() -> Value {
        json!({
            "name": "John Doe",
            "email": "john.doe@gmail.com",
            "document": "97456321558",
            "password": "asdQWE123",
        })
    }

    #[tokio::test]
    async fn test_signup_handler() {
        let app = app(router::state());

        let response =
            make_request(app, Method::POST, "/signup", valid_body().to_string())
                .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Response = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.account_id.len(), 32);
        assert!(body.account_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_account_ids_are_unique() {
        let app = app(router::state());

        let first = router::create_account(app.clone()).await;
        let second = router::create_account(app).await;
        assert_ne!(first, second);
    }

    async fn assert_rejected(field: &str, value: &str, message: &str) {
        let app = app(router::state());

        let mut body = valid_body();
        body[field] = json!(value);

        let response =
            make_request(app, Method::POST, "/signup", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], message);
    }

    #[tokio::test]
    async fn test_signup_with_invalid_name() {
        assert_rejected("name", "John", "Invalid name").await;
    }

    #[tokio::test]
    async fn test_signup_with_invalid_email() {
        assert_rejected("email", "john.doe", "Invalid email").await;
    }

    #[tokio::test]
    async fn test_signup_with_invalid_document() {
        for document in ["111", "abc", "7897897897", "11111111111"] {
            assert_rejected("document", document, "Invalid document").await;
        }
    }

    #[tokio::test]
    async fn test_signup_with_invalid_password() {
        assert_rejected("password", "asdQWE", "Invalid password").await;
    }

    #[tokio::test]
    async fn test_first_failing_field_wins() {
        // Both name and password are wrong, name is checked first.
        let mut body = valid_body();
        body["name"] = json!("John");
        body["password"] = json!("asdQWE");

        let app = app(router::state());
        let response =
            make_request(app, Method::POST, "/signup", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Invalid name");
    }
}
