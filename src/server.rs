use crate::cli::ServeArgs;
use crate::infra::{AppState, AugmentService};
use crate::routes::augment_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use eq_augs::catalog::Catalog;
use eq_augs::config::AppConfig;
use eq_augs::error::AppError;
use eq_augs::telemetry;
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
    if let Some(path) = args.catalog.take() {
        config.analysis.catalog_path = path;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(Catalog::from_path(&config.analysis.catalog_path)?);
    info!(
        path = %config.analysis.catalog_path.display(),
        items = catalog.len(),
        "catalog ready"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(AugmentService::new(catalog, config.analysis.clone()));
    let app = augment_router(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "augmentation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
