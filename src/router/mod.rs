//! Ledger HTTP API.

pub mod accounts;
pub mod deposit;
pub mod signup;
pub mod status;
pub mod withdraw;

#[cfg(test)]
pub(crate) fn state() -> crate::AppState {
    use std::sync::Arc;

    crate::AppState {
        config: Arc::new(crate::config::Configuration::default()),
        store: Arc::new(crate::store::memory::MemStore::new()),
    }
}

/// Register a valid account and return its id.
#[cfg(test)]
pub(crate) async fn create_account(app: axum::Router) -> String {
    use axum::http::Method;
    use http_body_util::BodyExt;
    use serde_json::json;

    let body = json!({
        "name": "John Doe",
        "email": "john.doe@gmail.com",
        "document": "97456321558",
        "password": "asdQWE123",
    });
    let response =
        crate::make_request(app, Method::POST, "/signup", body.to_string())
            .await;

    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice::<signup::Response>(&body)
        .unwrap()
        .account_id
}
