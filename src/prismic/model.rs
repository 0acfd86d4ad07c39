//! Prismic REST API v2 payloads
//!
//! Only the fields the blog reads are modelled; serde drops the rest.

use serde::{Deserialize, Deserializer};

/// Deserialize a text field, treating `null` as an empty string
///
/// Prismic sends `null` for key text fields left empty in the editor.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Response of `GET <endpoint>`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRoot {
    #[serde(default)]
    pub refs: Vec<ApiRef>,
}

/// A content release reference
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// Response of `GET <endpoint>/documents/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<D> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    /// Opaque token (a URL) for the following page, `null` on the last one
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    pub results: Vec<Document<D>>,
}

/// A Prismic document with its custom-type fields in `data`
#[derive(Debug, Clone, Deserialize)]
pub struct Document<D> {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    /// Slug aliases, most recent first
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub slugs: Vec<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    pub data: D,
}

/// Fields selected by the listing query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
}

/// Fields of a full post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    /// `None` when the field is missing or `null`
    #[serde(default)]
    pub banner: Option<Image>,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub content: Vec<ContentBlock>,
}

/// Image field; an empty image comes back as `{}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Repeatable group item: a heading and its rich-text body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlock {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub heading: String,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub body: Vec<RichTextNode>,
}

/// One rich-text element (paragraph, list item, ...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}
