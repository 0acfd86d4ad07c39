//! Prismic CMS access
//!
//! [`CmsClient`] is the seam the generation flows depend on;
//! [`PrismicClient`] implements it over the REST API v2.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod model;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use client::PrismicClient;
pub use error::PrismicError;
pub use model::{
    ApiRef, ApiRoot, ContentBlock, DetailFields, Document, Image, RichTextNode, SearchResponse,
    SummaryFields,
};

/// Options of a document query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Fields to return, as `<type>.<field>`; empty means all fields
    pub fetch: Vec<String>,
    /// Results per page; the API default applies when unset
    pub page_size: Option<usize>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Read access to the content repository
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Documents of one custom type
    async fn get_by_type<D>(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send;

    /// The document of `doc_type` whose UID is `uid`, `None` when there is none
    async fn get_by_uid<D>(
        &self,
        doc_type: &str,
        uid: &str,
        options: &QueryOptions,
    ) -> Result<Option<Document<D>>, PrismicError>
    where
        D: DeserializeOwned + Send;

    /// Follow a `next_page` token from an earlier response
    async fn get_next_page<D>(&self, token: &str) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send;
}
