//! Application state

use errata_db::{Database, ErrorRepository, PairRepository, ResponseRepository};

/// Prometheus recorder handle used by the `/metrics` route
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub errors: ErrorRepository,
    pub responses: ResponseRepository,
    pub pairs: PairRepository,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            errors: db.errors(),
            responses: db.responses(),
            pairs: db.pairs(),
            db,
        }
    }
}
