use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use term_annotator::{EnrichedText, Enricher};

/// Upper bound on source + translated text per request
pub const MAX_REQUEST_TEXT: usize = 64 * 1024;

#[derive(Serialize, Deserialize)]
pub struct EnrichRequest {
    pub source: String,
    pub translated: String,
}

#[derive(Serialize, Deserialize)]
pub struct TermsResponse {
    pub terms: usize,
    pub locale: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub enricher: Arc<Enricher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/enrich", post(enrich_text))
        .route("/api/terms", get(describe_terms))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn enrich_text(
    State(state): State<AppState>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<EnrichedText>, (StatusCode, Json<ErrorResponse>)> {
    if request.source.len() + request.translated.len() > MAX_REQUEST_TEXT {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!("Texts exceed {} bytes combined", MAX_REQUEST_TEXT),
            }),
        ));
    }

    let enricher = Arc::clone(&state.enricher);
    let EnrichRequest { source, translated } = request;
    let result = tokio::task::spawn_blocking(move || enricher.enrich(&source, &translated))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Annotation task failed: {}", e),
                }),
            )
        })?;

    info!(
        "Enriched {} → {} bytes",
        result.enriched_source.len(),
        result.enriched_translation.len()
    );
    Ok(Json(result))
}

async fn describe_terms(State(state): State<AppState>) -> Json<TermsResponse> {
    Json(TermsResponse {
        terms: state.enricher.dictionary().len(),
        locale: state.enricher.get_locale().to_string(),
    })
}
