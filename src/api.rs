//! HTTP surface of the description service.

use std::sync::Arc;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    dispatcher::{DescriptionRequest, DescriptionResponse, GENERATE_PATH},
    providers::{DescriptionProvider, ProviderError},
};

#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn DescriptionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn DescriptionProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate_description))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(bind: &str, provider: Arc<dyn DescriptionProvider>) -> Result<()> {
    let provider_name = provider.name();
    let app = router(AppState::new(provider));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!(%bind, provider = provider_name, "description service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("description service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

#[derive(Serialize)]
struct HealthResp { status: &'static str, provider: &'static str }

async fn health(State(st): State<AppState>) -> Json<HealthResp> {
    Json(HealthResp { status: "ok", provider: st.provider.name() })
}

async fn generate_description(
    State(st): State<AppState>,
    Json(req): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>, ApiErr> {
    if req.product_name.trim().is_empty() {
        return Err(ApiErr::bad_request("Product name is required"));
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id, provider = st.provider.name(), tone = %req.tone, language = %req.language);
    async move {
        let description = st.provider.generate(&req).await.map_err(|e| {
            tracing::warn!(error = %e, "provider failed");
            ApiErr::from(e)
        })?;
        tracing::info!(chars = description.chars().count(), "description generated");
        Ok::<_, ApiErr>(Json(DescriptionResponse { description }))
    }
    .instrument(span)
    .await
}

#[derive(Debug)]
struct ApiErr {
    status: StatusCode,
    code: String,
    message: String,
}

impl ApiErr {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request".to_string(),
            message: message.into(),
        }
    }
}

impl From<ProviderError> for ApiErr {
    fn from(e: ProviderError) -> Self {
        let (status, code) = match &e {
            ProviderError::RateLimited => (StatusCode::SERVICE_UNAVAILABLE, "upstream_rate_limited"),
            ProviderError::Http(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            ProviderError::Fatal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        Self { status, code: code.to_string(), message: e.to_string() }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            code: String,
        }
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                code: self.code,
            }),
        )
            .into_response()
    }
}
