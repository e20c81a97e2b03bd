//! `reqwest`-backed article store.
//!
//! # Responsibility
//! - Map collection operations onto the `/articles` REST surface.
//! - Turn non-success statuses into `StoreError::Status`.
//!
//! # Invariants
//! - The collection URL is resolved once, at construction.
//! - Record ids are percent-encoded as a single path segment.

use super::{Ack, ArticleStore, StoreError, StoreResult};
use crate::model::article::{Article, ArticleId};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::{Duration, Instant};
use url::Url;

const COLLECTION_PATH: &str = "articles";

/// HTTP client for a remote `/articles` collection.
#[derive(Debug, Clone)]
pub struct HttpArticleStore {
    client: Client,
    collection_url: Url,
}

impl HttpArticleStore {
    /// Creates a store rooted at `base_url` with a default client.
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a store whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> StoreResult<Self> {
        Ok(Self {
            client,
            collection_url: collection_url(base_url)?,
        })
    }

    /// Returns the resolved `/articles` URL.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn record_url(&self, id: &ArticleId) -> StoreResult<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::InvalidUrl(format!("`{}` cannot be a base", self.collection_url))
            })?
            .push(id.as_str());
        Ok(url)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: Method,
        url: &Url,
    ) -> StoreResult<Response> {
        let started_at = Instant::now();
        let response = request.send().await?;
        debug!(
            "event=store_request module=store method={} url={} status={} duration_ms={}",
            method,
            url,
            response.status().as_u16(),
            started_at.elapsed().as_millis()
        );

        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn acknowledge(
        &self,
        method: Method,
        url: Url,
        article: Option<&Article>,
    ) -> StoreResult<Ack> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(article) = article {
            request = request.json(&article.payload());
        }

        let response = self.send(request, method, &url).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Ack { status, body })
    }
}

#[async_trait]
impl ArticleStore for HttpArticleStore {
    async fn list(&self) -> StoreResult<Vec<Article>> {
        let url = self.collection_url.clone();
        let request = self.client.get(url.clone());
        let response = self.send(request, Method::GET, &url).await?;
        Ok(response.json::<Vec<Article>>().await?)
    }

    async fn create(&self, article: &Article) -> StoreResult<Ack> {
        self.acknowledge(Method::POST, self.collection_url.clone(), Some(article))
            .await
    }

    async fn update(&self, id: &ArticleId, article: &Article) -> StoreResult<Ack> {
        let url = self.record_url(id)?;
        self.acknowledge(Method::PUT, url, Some(article)).await
    }

    async fn delete(&self, id: &ArticleId) -> StoreResult<Ack> {
        let url = self.record_url(id)?;
        self.acknowledge(Method::DELETE, url, None).await
    }

    async fn delete_all(&self) -> StoreResult<Ack> {
        self.acknowledge(Method::DELETE, self.collection_url.clone(), None)
            .await
    }
}

fn collection_url(base_url: &str) -> StoreResult<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidUrl(
            "base url cannot be empty".to_string(),
        ));
    }

    // `Url::join` replaces the last segment unless the base ends with `/`.
    let mut base = Url::parse(trimmed)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(COLLECTION_PATH)?)
}
