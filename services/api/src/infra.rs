use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Clap value parser for `YYYY-MM-DD` arguments.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    injury_comp::router::parse_date(raw)
}
