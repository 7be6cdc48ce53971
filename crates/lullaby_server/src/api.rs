//! HTTP API for story and poem generation.

use crate::ApiError;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use lullaby_core::{Format, GenerationRequest};
use lullaby_pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

/// API server state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline shared by every request.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Creates a new API state.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Successful generation response.
///
/// Poems are returned under the `story` key as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// The final adjusted text
    pub story: String,
}

/// Creates the API router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate-story", post(generate_story))
        .route("/generate-poem", post(generate_poem))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS policy: everything when no origins are listed, otherwise only the
/// listed origins with the methods and headers the frontend needs.
fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    cors.max_age(Duration::from_secs(3600))
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generate a story, or a poem when the body asks for `"format": "poem"`.
#[instrument(skip_all, fields(body_len = body.len()))]
async fn generate_story(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoryResponse>, ApiError> {
    let request = GenerationRequest::from_json(&body)?;
    generate(&state, request).await
}

/// Generate a poem regardless of any `format` field in the body.
#[instrument(skip_all, fields(body_len = body.len()))]
async fn generate_poem(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoryResponse>, ApiError> {
    let request = GenerationRequest::from_json(&body)?.with_format(Format::Poem);
    generate(&state, request).await
}

async fn generate(
    state: &AppState,
    request: GenerationRequest,
) -> Result<Json<StoryResponse>, ApiError> {
    info!(
        format = %request.format(),
        diary_len = request.diary().len(),
        "Accepted generation request"
    );
    let story = state.pipeline.run(request).await?;
    Ok(Json(StoryResponse { story }))
}
