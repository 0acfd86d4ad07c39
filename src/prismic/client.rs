//! Prismic REST API v2 client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::model::{ApiRoot, Document, SearchResponse};
use super::{CmsClient, PrismicError, QueryOptions};
use crate::config::SiteConfig;

/// HTTP client for one Prismic repository
#[derive(Clone)]
pub struct PrismicClient {
    http: reqwest::Client,
    /// API root, e.g. `https://myblog.cdn.prismic.io/api/v2`
    endpoint: String,
    access_token: Option<String>,
}

impl PrismicClient {
    /// Create a client for the repository at `endpoint`
    pub fn new(
        endpoint: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PrismicError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PrismicError::Client)?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Create a client from the site configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self, PrismicError> {
        Self::new(
            &config.api_endpoint,
            config.access_token.clone(),
            config.timeout(),
        )
    }

    /// API root this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, PrismicError> {
        let shown = without_query(url);
        let mut request = self.http.get(url).query(query);
        if let Some(token) = &self.access_token {
            // Tokens handed back by the API already carry it
            if !url.contains("access_token=") {
                request = request.query(&[("access_token", token)]);
            }
        }

        tracing::debug!("GET {}", shown);
        let response = request
            .send()
            .await
            .map_err(|source| PrismicError::Request {
                url: shown.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrismicError::Status {
                url: shown,
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| PrismicError::Request {
                url: shown.clone(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|source| PrismicError::Decode { url: shown, source })
    }

    /// Reference of the currently published content
    async fn master_ref(&self) -> Result<String, PrismicError> {
        let root: ApiRoot = self.get_json(&self.endpoint, &[]).await?;
        root.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| PrismicError::MissingMasterRef {
                endpoint: self.endpoint.clone(),
            })
    }

    /// Run a search against the master ref
    async fn search<D: DeserializeOwned>(
        &self,
        predicate: String,
        options: &QueryOptions,
    ) -> Result<SearchResponse<D>, PrismicError> {
        let master_ref = self.master_ref().await?;

        let mut query = vec![("ref", master_ref), ("q", format!("[{}]", predicate))];
        if !options.fetch.is_empty() {
            query.push(("fetch", options.fetch.join(",")));
        }
        if let Some(page_size) = options.page_size {
            query.push(("pageSize", page_size.to_string()));
        }

        let url = format!("{}/documents/search", self.endpoint);
        self.get_json(&url, &query).await
    }
}

#[async_trait]
impl CmsClient for PrismicClient {
    async fn get_by_type<D>(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        let predicate = format!("[at(document.type,\"{}\")]", escape_literal(doc_type));
        self.search(predicate, options).await
    }

    async fn get_by_uid<D>(
        &self,
        doc_type: &str,
        uid: &str,
        options: &QueryOptions,
    ) -> Result<Option<Document<D>>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        let predicate = format!(
            "[at(my.{}.uid,\"{}\")]",
            doc_type,
            escape_literal(uid)
        );
        let options = QueryOptions {
            page_size: Some(1),
            ..options.clone()
        };
        let response: SearchResponse<D> = self.search(predicate, &options).await?;
        Ok(response.results.into_iter().next())
    }

    async fn get_next_page<D>(&self, token: &str) -> Result<SearchResponse<D>, PrismicError>
    where
        D: DeserializeOwned + Send,
    {
        self.get_json(token, &[]).await
    }
}

/// Quote-safe string literal for a predicate
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// URL without its query string, so tokens never reach logs or errors
fn without_query(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prismic::{DetailFields, SummaryFields};
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Stand-in for a Prismic repository, recording every search query
    struct FakeRepo {
        base: String,
        searches: Mutex<Vec<HashMap<String, String>>>,
    }

    async fn api_root() -> Json<serde_json::Value> {
        Json(json!({
            "refs": [
                { "id": "preview", "ref": "preview-ref", "label": "Preview", "isMasterRef": false },
                { "id": "master", "ref": "master-ref", "label": "Master", "isMasterRef": true }
            ]
        }))
    }

    async fn unavailable() -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
    }

    fn summary(id: &str, slug: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "uid": slug,
            "type": "posts",
            "slugs": [slug],
            "first_publication_date": "2021-03-25T19:25:28+0000",
            "data": { "title": title, "subtitle": "sub", "author": "Danilo Vieira" }
        })
    }

    async fn search(
        State(repo): State<Arc<FakeRepo>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        repo.searches.lock().unwrap().push(params.clone());
        let q = params.get("q").cloned().unwrap_or_default();

        let body = if params.get("page").map(String::as_str) == Some("2") {
            json!({ "page": 2, "next_page": null, "results": [summary("c", "third", "Third")] })
        } else if q.contains("document.type") {
            json!({
                "page": 1,
                "next_page": format!("{}/api/v2/documents/search?ref=master-ref&page=2", repo.base),
                "results": [summary("a", "first", "First"), summary("b", "second", "Second")]
            })
        } else if q.contains("\"known-post\"") {
            json!({
                "page": 1,
                "next_page": null,
                "results": [{
                    "id": "k",
                    "uid": "known-post",
                    "slugs": ["known-post"],
                    "first_publication_date": "2021-03-25T19:25:28+0000",
                    "data": {
                        "title": "Known",
                        "author": "Danilo Vieira",
                        "banner": { "url": "https://images.prismic.io/banner.png" },
                        "content": [
                            { "heading": "Intro", "body": [{ "type": "paragraph", "text": "Hi", "spans": [] }] }
                        ]
                    }
                }]
            })
        } else {
            json!({ "page": 1, "next_page": null, "results": [] })
        };
        Json(body)
    }

    async fn start_fake_repo() -> Arc<FakeRepo> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let repo = Arc::new(FakeRepo {
            base: format!("http://{}", addr),
            searches: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/v2", get(api_root))
            .route("/api/v2/documents/search", get(search))
            .route("/down/api/v2", get(unavailable))
            .with_state(repo.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        repo
    }

    fn client(repo: &FakeRepo, path: &str) -> PrismicClient {
        PrismicClient::new(
            &format!("{}{}", repo.base, path),
            Some("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_by_type_sends_query() {
        let repo = start_fake_repo().await;
        let client = client(&repo, "/api/v2/");
        assert_eq!(client.endpoint(), format!("{}/api/v2", repo.base));

        let options = QueryOptions::new()
            .fetch(["posts.title", "posts.subtitle", "posts.author"])
            .page_size(6);
        let response: SearchResponse<SummaryFields> =
            client.get_by_type("posts", &options).await.unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].data.title, "First");
        assert!(response.next_page.is_some());

        let searches = repo.searches.lock().unwrap();
        let params = &searches[0];
        assert_eq!(params["ref"], "master-ref");
        assert_eq!(params["q"], "[[at(document.type,\"posts\")]]");
        assert_eq!(params["fetch"], "posts.title,posts.subtitle,posts.author");
        assert_eq!(params["pageSize"], "6");
        assert_eq!(params["access_token"], "secret");
    }

    #[tokio::test]
    async fn test_next_page_token() {
        let repo = start_fake_repo().await;
        let client = client(&repo, "/api/v2");

        let first: SearchResponse<SummaryFields> = client
            .get_by_type("posts", &QueryOptions::new().page_size(6))
            .await
            .unwrap();
        let token = first.next_page.unwrap();

        let second: SearchResponse<SummaryFields> = client.get_next_page(&token).await.unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(second.results[0].slugs, vec!["third"]);
        assert!(second.next_page.is_none());

        let searches = repo.searches.lock().unwrap();
        assert_eq!(searches[1]["access_token"], "secret");
    }

    #[tokio::test]
    async fn test_get_by_uid() {
        let repo = start_fake_repo().await;
        let client = client(&repo, "/api/v2");

        let post: Document<DetailFields> = client
            .get_by_uid("posts", "known-post", &QueryOptions::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            post.data.banner.and_then(|banner| banner.url).as_deref(),
            Some("https://images.prismic.io/banner.png")
        );
        assert_eq!(post.data.content[0].body[0].text, "Hi");

        let searches = repo.searches.lock().unwrap();
        assert_eq!(searches[0]["q"], "[[at(my.posts.uid,\"known-post\")]]");
        assert_eq!(searches[0]["pageSize"], "1");
        assert!(!searches[0].contains_key("fetch"));
    }

    #[tokio::test]
    async fn test_get_by_uid_not_found() {
        let repo = start_fake_repo().await;
        let client = client(&repo, "/api/v2");

        let post: Option<Document<DetailFields>> = client
            .get_by_uid("posts", "missing", &QueryOptions::new())
            .await
            .unwrap();
        assert!(post.is_none());
    }

    #[tokio::test]
    async fn test_unavailable_repository() {
        let repo = start_fake_repo().await;
        let client = client(&repo, "/down/api/v2");

        let result: Result<SearchResponse<SummaryFields>, PrismicError> =
            client.get_by_type("posts", &QueryOptions::new()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, PrismicError::Status { status: 503, .. }));
        assert!(err.is_unavailable());
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("plain-slug"), "plain-slug");
        assert_eq!(escape_literal("a\"b"), "a\\\"b");
    }

    #[test]
    fn test_without_query() {
        assert_eq!(
            without_query("https://x.prismic.io/api/v2/documents/search?ref=a&access_token=t"),
            "https://x.prismic.io/api/v2/documents/search"
        );
        assert_eq!(without_query("https://x.prismic.io/api/v2"), "https://x.prismic.io/api/v2");
    }
}
