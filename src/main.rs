use std::sync::Arc;

use spam_detector::api::assets::PageAssets;
use spam_detector::api::router::create_router;
use spam_detector::config::AppConfig;
use spam_detector::metrics::init_metrics;
use spam_detector::model::SpamClassifier;
use spam_detector::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();

    // --- Model state: loaded once, read-only for the process lifetime ---
    tracing::info!(
        model = %config.model_path.display(),
        vectorizer = %config.vectorizer_path.display(),
        "Loading model artifacts..."
    );
    let classifier = SpamClassifier::load(&config.model_paths()).map_err(|e| {
        tracing::error!(error = %e, "Model artifacts unavailable, refusing to start");
        e
    })?;

    let assets = PageAssets::load(&config.assets_dir);
    let metrics_handle = init_metrics();

    let state = AppState {
        classifier: Arc::new(classifier),
        config,
        assets: Arc::new(assets),
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
