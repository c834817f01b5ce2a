use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::RecommendationRequest;
use super::service::{RecommendationError, RecommendationService};
use super::source::CatalogSource;

/// Router builder exposing the recommendation engine over HTTP.
pub fn recommendation_router<C>(service: Arc<RecommendationService<C>>) -> Router
where
    C: CatalogSource + 'static,
{
    Router::new()
        .route("/api/v1/recommendations/cards", post(cards_handler::<C>))
        .route(
            "/api/v1/recommendations/strategies",
            post(strategies_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn cards_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    C: CatalogSource + 'static,
{
    match service.recommend_cards(&request) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn strategies_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    C: CatalogSource + 'static,
{
    match service.recommend_strategies(&request) {
        Ok(recommendations) => (StatusCode::OK, axum::Json(recommendations)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RecommendationError) -> Response {
    let status = match &error {
        RecommendationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendationError::Catalog(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
