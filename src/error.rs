//! Error types for the generation flows

use thiserror::Error;

use crate::prismic::PrismicError;

/// A CMS record that breaks the shape the pages rely on
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("document {document_id} has no slugs")]
    MissingSlug { document_id: String },

    #[error("document {document_id} has no banner image")]
    MissingBanner { document_id: String },

    #[error("invalid publication date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure of one generation request
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cms(#[from] PrismicError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
