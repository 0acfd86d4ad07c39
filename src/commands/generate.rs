//! Generate static files

use anyhow::{Context, Result};

use crate::Blog;

/// Build the listing page (detail pages are generated on demand)
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = blog.generator()?;
    let pagination = generator
        .generate_index()
        .await
        .context("Failed to generate the listing page")?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated listing ({} posts) in {:.2}s",
        pagination.results.len(),
        duration.as_secs_f64()
    );

    Ok(())
}
