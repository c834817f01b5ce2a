use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryCatalogSource};
use crate::routes::with_recommendation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cardwise::config::AppConfig;
use cardwise::engine::RecommendationService;
use cardwise::error::AppError;
use cardwise::telemetry;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let as_of = Local::now().date_naive();
    let snapshot = load_catalog(&config.catalog, as_of)?;
    info!(%as_of, offers = snapshot.offers.len(), "card catalog loaded");

    let source = Arc::new(InMemoryCatalogSource::new(snapshot));
    let recommendation_service = Arc::new(RecommendationService::new(source));

    let app = with_recommendation_routes(recommendation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "card recommendation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
