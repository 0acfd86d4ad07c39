//! Detail flow: one post with its banner and content sections

use super::{Banner, DateStyle, Paragraph, PostData, PostDetail, PostUid, Section};
use crate::error::{ContentError, Result};
use crate::prismic::{CmsClient, DetailFields, Document, QueryOptions};

/// Project a full post document
pub fn project_detail(
    doc: Document<DetailFields>,
    dates: &DateStyle,
) -> std::result::Result<PostDetail, ContentError> {
    let uid = PostUid::from_slugs(&doc.id, &doc.slugs)?;
    let first_publication_date = dates.format(doc.first_publication_date.as_deref())?;
    let banner_url = doc
        .data
        .banner
        .and_then(|image| image.url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ContentError::MissingBanner {
            document_id: doc.id.clone(),
        })?;

    let content = doc
        .data
        .content
        .into_iter()
        .map(|block| Section {
            heading: block.heading,
            body: block
                .body
                .into_iter()
                .map(|node| Paragraph { text: node.text })
                .collect(),
        })
        .collect();

    Ok(PostDetail {
        uid,
        first_publication_date,
        data: PostData {
            title: doc.data.title,
            author: doc.data.author,
            banner: Banner { url: banner_url },
            content,
        },
    })
}

/// Fetch and project the post whose UID is `uid`
///
/// `Ok(None)` means the CMS has no such post.
pub async fn fetch_detail<C: CmsClient>(
    client: &C,
    doc_type: &str,
    uid: &str,
    dates: &DateStyle,
) -> Result<Option<PostDetail>> {
    let doc: Option<Document<DetailFields>> = client
        .get_by_uid(doc_type, uid, &QueryOptions::default())
        .await?;
    let Some(doc) = doc else {
        return Ok(None);
    };

    Ok(Some(project_detail(doc, dates)?))
}
