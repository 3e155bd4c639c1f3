use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wechat_jssdk::types::{RemoteStatus, access_token_of, ticket_of};
use wechat_jssdk::{
    BridgeConfig, ClientConfig, CredentialRequest, Error, SignedPayload, TicketRequest,
    WechatClient, compute_signature, signable_url,
};

/// Server configuration
struct ServerConfig {
    port: u16,
    app_id: String,
    app_secret: String,
    api_base: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            app_id: env::var("WECHAT_APP_ID").context("WECHAT_APP_ID must be set")?,
            app_secret: env::var("WECHAT_APP_SECRET").context("WECHAT_APP_SECRET must be set")?,
            api_base: env::var("WECHAT_API_BASE").ok(),
        })
    }
}

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    client: WechatClient,
    credentials: Arc<CredentialRequest>,
    metrics: Arc<Metrics>,
}

/// Server metrics
struct Metrics {
    total_requests: AtomicU64,
    requests_in_flight: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    fn enter(&self) -> RequestGuard<'_> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_in_flight.fetch_add(1, Ordering::Relaxed);
        RequestGuard(&self.requests_in_flight)
    }
}

/// RAII guard for tracking in-flight requests
struct RequestGuard<'a>(&'a AtomicU64);

impl<'a> Drop for RequestGuard<'a> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,wechat_jssdk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let client = WechatClient::with_config(ClientConfig {
        base_url: config.api_base.clone(),
        proxy: None,
    })
    .context("Failed to initialize WeChat client")?;
    tracing::info!("Using API base {}", client.base_url());

    let credentials = CredentialRequest::client_credential(config.app_id, config.app_secret);
    let app = build_app(client, credentials);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the Axum application with routes and middleware
fn build_app(client: WechatClient, credentials: CredentialRequest) -> Router {
    let metrics = Arc::new(Metrics {
        total_requests: AtomicU64::new(0),
        requests_in_flight: AtomicU64::new(0),
        start_time: Instant::now(),
    });

    let state = AppState {
        client,
        credentials: Arc::new(credentials),
        metrics,
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/jssdk/config", get(jssdk_config))
        .route("/api/signature", post(sign_url))
        .route("/api/metrics", get(get_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Token -> ticket -> signature for one page URL.
///
/// Nothing is cached, so every call hits both upstream endpoints.
async fn jssdk_config(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let _guard = state.metrics.enter();

    let url = signable_url(&query.url);
    if url.is_empty() {
        return Err(Error::InvalidArgument("url").into());
    }
    tracing::info!("Signing page {}", url);

    let token = state.client.fetch_access_token(&state.credentials).await?;
    let access_token =
        access_token_of(&token).ok_or_else(|| upstream_error(&token, "token response"))?;

    let ticket = state
        .client
        .fetch_jsapi_ticket(&TicketRequest::jsapi(access_token))
        .await?;
    if let Some(status) = RemoteStatus::from_json(&ticket)
        && !status.is_ok()
    {
        return Err(upstream_error(&ticket, "ticket response"));
    }
    let jsapi_ticket =
        ticket_of(&ticket).ok_or_else(|| upstream_error(&ticket, "ticket response"))?;

    let payload = compute_signature(jsapi_ticket, url)?;

    Ok(Json(ConfigResponse {
        success: true,
        data: payload.bridge_config(state.credentials.app_id.as_str()),
    }))
}

#[derive(Deserialize)]
struct ConfigQuery {
    #[serde(default)]
    url: String,
}

#[derive(Serialize)]
struct ConfigResponse {
    success: bool,
    data: BridgeConfig,
}

/// Sign a URL with a caller-supplied ticket
async fn sign_url(
    State(state): State<AppState>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignResponse>, ApiError> {
    let _guard = state.metrics.enter();

    let payload = compute_signature(&request.jsapi_ticket, &request.url)?;
    Ok(Json(SignResponse {
        success: true,
        data: payload,
    }))
}

#[derive(Deserialize)]
struct SignRequest {
    #[serde(default)]
    jsapi_ticket: String,
    #[serde(default)]
    url: String,
}

#[derive(Serialize)]
struct SignResponse {
    success: bool,
    data: SignedPayload,
}

/// Get server metrics
async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        total_requests: state.metrics.total_requests.load(Ordering::Relaxed),
        requests_in_flight: state.metrics.requests_in_flight.load(Ordering::Relaxed),
        uptime_seconds: state.metrics.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    total_requests: u64,
    requests_in_flight: u64,
    uptime_seconds: u64,
}

/// Prefer the platform's own `errmsg` when it sent one.
fn upstream_error(body: &Value, what: &str) -> ApiError {
    match RemoteStatus::from_json(body) {
        Some(status) if !status.is_ok() => ApiError::BadGateway(status.to_string()),
        _ => ApiError::BadGateway(format!("unexpected {what}")),
    }
}

/// API error types
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    BadGateway(String),
    InternalError(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument(field) => {
                ApiError::BadRequest(format!("{field} must not be empty"))
            }
            Error::Network(e) => {
                tracing::error!("Upstream error: {}", e);
                ApiError::BadGateway(e.to_string())
            }
            Error::Config(msg) => ApiError::InternalError(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}
