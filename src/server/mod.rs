//! Development server with on-demand post generation
//!
//! Serves the public directory. A `/post/:uid` page that isn't on disk yet
//! goes through the detail flow before being served.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::{Generator, PostOutcome};
use crate::prismic::{CmsClient, PrismicClient};

/// Start the development server
pub async fn start(generator: Generator<PrismicClient>, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let app = router(Arc::new(generator));

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes of the development server
pub fn router<C: CmsClient + 'static>(generator: Arc<Generator<C>>) -> Router {
    let static_files =
        ServeDir::new(generator.public_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/post/:uid", get(post_handler::<C>))
        .route("/post/:uid/", get(post_handler::<C>))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

/// Serve a post page, generating it first when it isn't on disk
async fn post_handler<C: CmsClient + 'static>(
    State(generator): State<Arc<Generator<C>>>,
    Path(uid): Path<String>,
) -> Response {
    if let Some(path) = generator.post_path(&uid) {
        if let Ok(html) = tokio::fs::read_to_string(&path).await {
            return Html(html).into_response();
        }
    }

    tracing::info!("Generating post on demand: {}", uid);
    match generator.generate_post(&uid).await {
        Ok(PostOutcome::Generated { html, .. }) => Html(html).into_response(),
        Ok(PostOutcome::NotFound) => not_found(&generator, &uid),
        Err(e) => {
            tracing::error!("Failed to generate post {}: {}", uid, e);
            (StatusCode::BAD_GATEWAY, "Failed to generate page").into_response()
        }
    }
}

fn not_found<C: CmsClient>(generator: &Generator<C>, uid: &str) -> Response {
    match generator.render_not_found(uid) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
