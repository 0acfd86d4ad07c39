//! List posts from the CMS

use anyhow::{Context, Result};
use std::collections::HashSet;

use crate::content::{self, DateStyle, PostsPagination};
use crate::prismic::CmsClient;
use crate::Blog;

/// Print the listing; with `all`, keep following next-page tokens
pub async fn run(blog: &Blog, all: bool) -> Result<()> {
    let generator = blog.generator()?;
    let pagination =
        fetch_pages(generator.client(), generator.doc_type(), generator.dates(), all).await?;

    print_listing(&pagination);
    Ok(())
}

/// First listing page, plus every following page when `all` is set
///
/// Stops at a token that was already followed.
pub async fn fetch_pages<C: CmsClient>(
    client: &C,
    doc_type: &str,
    dates: &DateStyle,
    all: bool,
) -> Result<PostsPagination> {
    let mut pagination = content::fetch_listing(client, doc_type, dates)
        .await
        .context("Failed to fetch the listing")?;

    let mut followed = HashSet::new();
    while all {
        let Some(token) = pagination.next_page.clone() else {
            break;
        };
        if !followed.insert(token.clone()) {
            tracing::warn!("CMS returned an already followed page token, stopping");
            pagination.next_page = None;
            break;
        }
        let next = content::fetch_next_page(client, &token, dates)
            .await
            .context("Failed to fetch the next listing page")?;
        pagination.extend(next);
    }

    Ok(pagination)
}

fn print_listing(pagination: &PostsPagination) {
    println!("Posts ({}):", pagination.results.len());
    for post in &pagination.results {
        println!(
            "  {} - {} by {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("unpublished"),
            post.data.title,
            post.data.author,
            post.uid
        );
    }
    if pagination.next_page.is_some() {
        println!("  ... more posts available (use --all)");
    }
}
