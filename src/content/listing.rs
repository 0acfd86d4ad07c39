//! Listing flow: a page of post summaries plus the next-page token

use super::{DateStyle, PostSummary, PostUid, PostsPagination, SummaryData};
use crate::error::{ContentError, Result};
use crate::prismic::{CmsClient, Document, QueryOptions, SearchResponse, SummaryFields};

/// Posts per listing page
pub const LISTING_PAGE_SIZE: usize = 6;

/// Query of the listing: title, subtitle and author only
pub fn listing_options(doc_type: &str) -> QueryOptions {
    QueryOptions::new()
        .fetch(
            ["title", "subtitle", "author"]
                .iter()
                .map(|field| format!("{}.{}", doc_type, field)),
        )
        .page_size(LISTING_PAGE_SIZE)
}

/// Project one summary document
pub fn project_summary(
    doc: Document<SummaryFields>,
    dates: &DateStyle,
) -> std::result::Result<PostSummary, ContentError> {
    let uid = PostUid::from_slugs(&doc.id, &doc.slugs)?;
    let first_publication_date = dates.format(doc.first_publication_date.as_deref())?;

    Ok(PostSummary {
        uid,
        first_publication_date,
        data: SummaryData {
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
        },
    })
}

/// Project a listing response, keeping the CMS order and token
pub fn project_listing(
    response: SearchResponse<SummaryFields>,
    dates: &DateStyle,
) -> std::result::Result<PostsPagination, ContentError> {
    let results = response
        .results
        .into_iter()
        .map(|doc| project_summary(doc, dates))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(PostsPagination {
        next_page: response.next_page,
        results,
    })
}

/// Fetch and project the first listing page
pub async fn fetch_listing<C: CmsClient>(
    client: &C,
    doc_type: &str,
    dates: &DateStyle,
) -> Result<PostsPagination> {
    let response: SearchResponse<SummaryFields> = client
        .get_by_type(doc_type, &listing_options(doc_type))
        .await?;
    let pagination = project_listing(response, dates)?;
    tracing::info!(
        "Fetched {} posts (more: {})",
        pagination.results.len(),
        pagination.next_page.is_some()
    );
    Ok(pagination)
}

/// Fetch and project the page a next-page token points to
pub async fn fetch_next_page<C: CmsClient>(
    client: &C,
    token: &str,
    dates: &DateStyle,
) -> Result<PostsPagination> {
    let response: SearchResponse<SummaryFields> = client.get_next_page(token).await?;
    let pagination = project_listing(response, dates)?;
    tracing::debug!("Fetched {} more posts", pagination.results.len());
    Ok(pagination)
}
