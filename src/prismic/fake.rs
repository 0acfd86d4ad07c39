//! In-memory [`CmsClient`] for tests, fed with Prismic JSON

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{CmsClient, Document, PrismicError, QueryOptions, SearchResponse};

#[derive(Default)]
pub(crate) struct FakeCms {
    /// Response of the listing query
    pub listing: Option<Value>,
    /// Responses keyed by next-page token
    pub pages: HashMap<String, Value>,
    /// Documents keyed by UID
    pub posts: HashMap<String, Value>,
    /// Answer every call with HTTP 503
    pub down: bool,
    /// `(doc_type, options)` of each `get_by_type` call
    pub queries: Mutex<Vec<(String, QueryOptions)>>,
}

impl FakeCms {
    pub fn with_listing(listing: Value) -> Self {
        Self {
            listing: Some(listing),
            ..Self::default()
        }
    }

    pub fn with_post(mut self, uid: &str, doc: Value) -> Self {
        self.posts.insert(uid.to_string(), doc);
        self
    }

    pub fn with_page(mut self, token: &str, page: Value) -> Self {
        self.pages.insert(token.to_string(), page);
        self
    }

    pub fn unavailable() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    fn check_up(&self) -> Result<(), PrismicError> {
        if self.down {
            return Err(PrismicError::Status {
                url: "fake://prismic".to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, PrismicError> {
    serde_json::from_value(value.clone()).map_err(|source| PrismicError::Decode {
        url: "fake://prismic".to_string(),
        source,
    })
}

fn empty_page() -> Value {
    serde_json::json!({ "page": 1, "next_page": null, "results": [] })
}

#[async_trait]
impl CmsClient for FakeCms {
    async fn get_by_type<D>(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        self.check_up()?;
        self.queries
            .lock()
            .unwrap()
            .push((doc_type.to_string(), options.clone()));
        decode(self.listing.as_ref().unwrap_or(&empty_page()))
    }

    async fn get_by_uid<D>(
        &self,
        _doc_type: &str,
        uid: &str,
        _options: &QueryOptions,
    ) -> Result<Option<Document<D>>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        self.check_up()?;
        self.posts.get(uid).map(decode).transpose()
    }

    async fn get_next_page<D>(&self, token: &str) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        self.check_up()?;
        decode(self.pages.get(token).unwrap_or(&empty_page()))
    }
}
