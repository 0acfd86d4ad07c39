//! Display-ready post models, serialized as the page props

use serde::Serialize;
use std::fmt;

use crate::error::ContentError;

/// Canonical identifier of a post
///
/// Only built from a non-empty slug-alias list, whose first entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostUid(String);

impl PostUid {
    pub fn from_slugs(document_id: &str, slugs: &[String]) -> Result<Self, ContentError> {
        slugs
            .first()
            .map(|slug| Self(slug.clone()))
            .ok_or_else(|| ContentError::MissingSlug {
                document_id: document_id.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub uid: PostUid,
    /// `DD mon YYYY`, `None` when the post was never published
    pub first_publication_date: Option<String>,
    pub data: SummaryData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsPagination {
    /// CMS token for the following page, passed through untouched
    #[serde(rename = "nextPage")]
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

impl PostsPagination {
    /// Append a following page, taking over its token
    pub fn extend(&mut self, next: PostsPagination) {
        self.results.extend(next.results);
        self.next_page = next.next_page;
    }
}

/// A post as shown on its own page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub uid: PostUid,
    pub first_publication_date: Option<String>,
    pub data: PostData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostData {
    pub title: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub url: String,
}

/// A heading and its paragraphs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub text: String,
}
