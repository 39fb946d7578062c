//! Server module - binds the view tree to an HTTP listener

mod page;

pub use page::render_page;

use crate::view::DashboardView;
use anyhow::Result;
use axum::{extract::State, response::Html, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router. The page is rendered exactly once here; every request
/// serves the same prerendered HTML, and all interactivity is client-side.
pub fn router(view: &DashboardView) -> Result<Router> {
    let page = Arc::new(render_page(view)?);
    Ok(Router::new()
        .route("/", get(index))
        .layer(TraceLayer::new_for_http())
        .with_state(page))
}

async fn index(State(page): State<Arc<String>>) -> Html<String> {
    Html(page.as_ref().clone())
}

/// Bind 0.0.0.0 on the given port and serve until the process is killed.
pub async fn serve(view: DashboardView, port: u16) -> Result<()> {
    let app = router(&view)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("dashboard listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
