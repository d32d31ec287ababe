//! Passbook is a minimal account ledger: validated signups, asset deposits
//! and withdrawal checks over HTTP.

pub mod config;
pub mod error;
pub mod router;
pub mod store;
pub mod telemetry;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, middleware as AxumMiddleware};
pub use error::{Result, ServerError};
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: Method,
    path: &str,
    body: String,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use axum::http::header;
    use tower::util::ServiceExt;

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub store: Arc<dyn store::AccountStore>,
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().latency_unit(LatencyUnit::Micros)),
        )
        // Set a timeout.
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        // Add CORS preflight support.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        );

    Router::new()
        // `GET /status.json` goes to `status`.
        .route("/status.json", get(router::status::handler))
        // `POST /signup` goes to `signup`.
        .route("/signup", post(router::signup::handler))
        // `GET /accounts/{account_id}` goes to `accounts`.
        .route("/accounts/{account_id}", get(router::accounts::handler))
        // `POST /deposit` goes to `deposit`.
        .route("/deposit", post(router::deposit::handler))
        // `POST /withdraw` goes to `withdraw`.
        .route("/withdraw", post(router::withdraw::handler))
        .with_state(state)
        .route_layer(AxumMiddleware::from_fn(telemetry::track))
        .layer(middleware)
}

/// Initialize the application state.
pub async fn initialize_state() -> std::result::Result<AppState, Box<dyn std::error::Error>>
{
    // read configuration file. let it in memory.
    let config = config::Configuration::default().read();

    let store: Arc<dyn store::AccountStore> = match config.postgres {
        Some(ref cfg) => {
            let store = store::postgres::PgStore::connect(
                &cfg.address,
                &cfg.username
                    .clone()
                    .unwrap_or(store::postgres::DEFAULT_CREDENTIALS.into()),
                &cfg.password
                    .clone()
                    .unwrap_or(store::postgres::DEFAULT_CREDENTIALS.into()),
                &cfg.database
                    .clone()
                    .unwrap_or(store::postgres::DEFAULT_DATABASE_NAME.into()),
                cfg.pool_size.unwrap_or(store::postgres::DEFAULT_POOL_SIZE),
            )
            .await?;

            // execute migrations scripts on start.
            sqlx::migrate!().run(store.pool()).await?;

            Arc::new(store)
        },
        None => {
            tracing::warn!(
                "missing `postgres` entry on `config.yaml` file, ledger rows are kept in memory"
            );
            Arc::new(store::memory::MemStore::new())
        },
    };

    Ok(AppState { config, store })
}
