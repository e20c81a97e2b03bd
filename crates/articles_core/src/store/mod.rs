//! Remote article collection contracts and HTTP implementation.
//!
//! # Responsibility
//! - Define the five collection operations the repository depends on.
//! - Keep transport details (URLs, status handling) out of the repository.
//!
//! # Invariants
//! - Non-success HTTP statuses are errors, never silently acknowledged.
//! - Create/update bodies carry exactly the `ArticlePayload` fields.

use crate::model::article::{Article, ArticleId};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;

pub use http::HttpArticleStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by remote collection operations.
#[derive(Debug)]
pub enum StoreError {
    /// Request could not be sent or the response body could not be read.
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status { status: u16, url: String },
    /// Base URL or derived path is not a valid URL.
    InvalidUrl(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status { status, url } => write!(f, "request to {url} failed with status {status}"),
            Self::InvalidUrl(message) => write!(f, "invalid store url: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } => None,
            Self::InvalidUrl(_) => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<url::ParseError> for StoreError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value.to_string())
    }
}

/// Server acknowledgement for a mutation.
///
/// The body is opaque text (the demo server answers e.g. `insert complete`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: u16,
    pub body: String,
}

/// Remote article collection.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Reads every record of the collection.
    async fn list(&self) -> StoreResult<Vec<Article>>;
    /// Creates one record; the store assigns its identifier.
    async fn create(&self, article: &Article) -> StoreResult<Ack>;
    /// Replaces the writable fields of record `id`.
    async fn update(&self, id: &ArticleId, article: &Article) -> StoreResult<Ack>;
    /// Deletes record `id`.
    async fn delete(&self, id: &ArticleId) -> StoreResult<Ack>;
    /// Deletes every record of the collection.
    async fn delete_all(&self) -> StoreResult<Ack>;
}
