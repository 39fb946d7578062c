//! Binary entry point: load, aggregate, build, serve.

use anyhow::Context;
use propdash::data::Dataset;
use propdash::stats::Summary;
use propdash::view::build_view;
use propdash::{server, DATA_FILE, DEFAULT_PORT};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("propdash=info,tower_http=info")),
        )
        .init();

    let dataset =
        Dataset::load(DATA_FILE).with_context(|| format!("failed to load {DATA_FILE}"))?;
    let summary = Summary::compute(&dataset)
        .with_context(|| format!("failed to summarize {}", dataset.path()))?;
    let view = build_view(&dataset, &summary)
        .with_context(|| format!("failed to build the dashboard from {}", dataset.path()))?;

    tracing::info!(
        rows = summary.count,
        columns = dataset.columns().len(),
        "dataset loaded from {DATA_FILE}"
    );

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    server::serve(view, port).await
}
