use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::{fetch_transcript, LanguagePreference};
use crate::youtube::TranscriptSource;

pub const MISSING_VIDEO_ID_ERROR: &str = "Missing videoId parameter";

/// State shared by every request. Nothing in it is mutated after startup.
pub struct AppState {
    pub source: Arc<dyn TranscriptSource>,
    pub preference: LanguagePreference,
}

impl AppState {
    pub fn new(source: Arc<dyn TranscriptSource>, preference: LanguagePreference) -> Self {
        Self { source, preference }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/transcript", get(get_transcript))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(video_id) = params.get("videoId").filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(json!({
                "success": false,
                "error": MISSING_VIDEO_ID_ERROR,
            })),
        )
            .into_response();
    };

    info!(video_id = %video_id, "received transcript request");
    let result = fetch_transcript(state.source.as_ref(), video_id, &state.preference).await;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    info!(
        video_id = %video_id,
        status = status.as_u16(),
        segment_count = result.segments.len(),
        "transcript request completed"
    );

    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(result),
    )
        .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
