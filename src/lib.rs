pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod model;

use std::sync::Arc;

use crate::api::assets::PageAssets;
use crate::config::AppConfig;
use crate::model::Classify;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classify>,
    pub config: AppConfig,
    pub assets: Arc<PageAssets>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
