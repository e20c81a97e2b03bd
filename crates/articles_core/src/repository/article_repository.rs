//! Article repository: load-or-seed bootstrap and mutation forwarding.
//!
//! # Responsibility
//! - Sort list results newest-first and hold them for rendering.
//! - Seed an empty remote collection from the fixture, then reload once.
//! - Forward create/update/delete/delete-all to the `ArticleStore`.
//!
//! # Invariants
//! - Dated articles sort before undated ones; ties keep input order.
//! - `fetch_all` replaces the local collection; `load_all` appends.
//! - The seed path lists the remote collection at most twice.

use crate::fixture::{read_fixture, FixtureError};
use crate::model::article::{Article, ArticleId};
use crate::render::{ArticleRenderer, RenderError};
use crate::store::{Ack, ArticleStore, StoreError};
use chrono::Utc;
use futures::future::try_join_all;
use log::{error, info};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug)]
pub enum RepositoryError {
    Store(StoreError),
    Fixture(FixtureError),
    Render(RenderError),
    /// Operation addresses a record by id but the article has none.
    MissingId,
    /// Remote collection is empty and the fixture has nothing to seed.
    EmptyFixture(PathBuf),
    /// Seed requests were acknowledged but the reload came back empty.
    SeedNotPersisted { created: usize },
}

impl Display for RepositoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Fixture(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::MissingId => write!(f, "article has no id; it was never persisted"),
            Self::EmptyFixture(path) => {
                write!(f, "fixture `{}` contains no articles to seed", path.display())
            }
            Self::SeedNotPersisted { created } => write!(
                f,
                "{created} seed articles were acknowledged but the collection is still empty"
            ),
        }
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Fixture(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<FixtureError> for RepositoryError {
    fn from(value: FixtureError) -> Self {
        Self::Fixture(value)
    }
}

impl From<RenderError> for RepositoryError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

/// How `fetch_all` obtained the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Remote collection already had `loaded` articles.
    Loaded { loaded: usize },
    /// Remote collection was empty; `created` fixture articles were inserted
    /// and `loaded` came back on reload.
    Seeded { created: usize, loaded: usize },
}

impl FetchOutcome {
    pub fn loaded(&self) -> usize {
        match self {
            Self::Loaded { loaded } | Self::Seeded { loaded, .. } => *loaded,
        }
    }
}

/// Owner of the local article collection.
pub struct ArticleRepository<S: ArticleStore> {
    store: S,
    fixture_path: PathBuf,
    articles: Vec<Article>,
}

impl<S: ArticleStore> ArticleRepository<S> {
    pub fn new(store: S, fixture_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            fixture_path: fixture_path.into(),
            articles: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fixture_path(&self) -> &Path {
        &self.fixture_path
    }

    /// Local collection, newest first.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }

    pub fn find(&self, id: &ArticleId) -> Option<&Article> {
        self.articles
            .iter()
            .find(|article| article.id.as_ref() == Some(id))
    }

    /// Sorts `rows` newest-first and appends them to the local collection.
    ///
    /// Existing entries are kept; reloading without [`Self::clear`] duplicates
    /// records.
    pub fn load_all(&mut self, mut rows: Vec<Article>) {
        sort_newest_first(&mut rows);
        self.articles.extend(rows);
    }

    /// Loads the remote collection, seeding it from the fixture when empty.
    ///
    /// The returned future resolving to `Ok` is the completion signal: the
    /// local collection is populated at that point.
    ///
    /// # Errors
    /// - Any store failure, on the first list, a seed create or the reload.
    /// - `Fixture`/`EmptyFixture` when the seed data cannot be used.
    /// - `SeedNotPersisted` when the reload after seeding is still empty.
    pub async fn fetch_all(&mut self) -> RepositoryResult<FetchOutcome> {
        let started_at = Instant::now();
        let rows = self.list_remote().await?;
        if !rows.is_empty() {
            let loaded = self.replace_all(rows);
            info!(
                "event=fetch_all module=repository status=ok mode=load count={} duration_ms={}",
                loaded,
                started_at.elapsed().as_millis()
            );
            return Ok(FetchOutcome::Loaded { loaded });
        }

        let created = self.seed_from_fixture().await?;
        let rows = self.list_remote().await?;
        if rows.is_empty() {
            let err = RepositoryError::SeedNotPersisted { created };
            error!("event=fetch_all module=repository status=error mode=seed error={err}");
            return Err(err);
        }

        let loaded = self.replace_all(rows);
        info!(
            "event=fetch_all module=repository status=ok mode=seed created={} count={} duration_ms={}",
            created,
            loaded,
            started_at.elapsed().as_millis()
        );
        Ok(FetchOutcome::Seeded { created, loaded })
    }

    /// Deletes the whole remote collection and clears the local copy.
    pub async fn truncate_all(&mut self) -> RepositoryResult<Ack> {
        let ack = logged("truncate_all", self.store.delete_all().await)?;
        self.articles.clear();
        Ok(ack)
    }

    /// Creates `article` remotely.
    ///
    /// The ack does not carry the new id, so the local collection is left
    /// as is; call [`Self::fetch_all`] to see the stored record.
    pub async fn insert(&self, article: &Article) -> RepositoryResult<Ack> {
        logged("insert", self.store.create(article).await)
    }

    /// Deletes `article` remotely and drops it from the local collection.
    pub async fn delete(&mut self, article: &Article) -> RepositoryResult<Ack> {
        let id = article.id.as_ref().ok_or(RepositoryError::MissingId)?;
        self.delete_by_id(id).await
    }

    pub async fn delete_by_id(&mut self, id: &ArticleId) -> RepositoryResult<Ack> {
        let ack = logged("delete", self.store.delete(id).await)?;
        self.articles
            .retain(|existing| existing.id.as_ref() != Some(id));
        Ok(ack)
    }

    /// Pushes the writable fields of `article` and refreshes the local copy.
    pub async fn update(&mut self, article: &Article) -> RepositoryResult<Ack> {
        let id = article.id.as_ref().ok_or(RepositoryError::MissingId)?;
        let ack = logged("update", self.store.update(id, article).await)?;
        if let Some(existing) = self
            .articles
            .iter_mut()
            .find(|existing| existing.id.as_ref() == Some(id))
        {
            *existing = article.clone();
        }
        Ok(ack)
    }

    /// Renders the local collection in order.
    pub fn render_all(&self, renderer: &ArticleRenderer) -> RepositoryResult<Vec<String>> {
        let now = Utc::now();
        self.articles
            .iter()
            .map(|article| renderer.render_at(article, now).map_err(RepositoryError::from))
            .collect()
    }

    async fn list_remote(&self) -> RepositoryResult<Vec<Article>> {
        Ok(logged_quiet("list", self.store.list().await)?)
    }

    async fn seed_from_fixture(&self) -> RepositoryResult<usize> {
        let fixture = match read_fixture(&self.fixture_path).await {
            Ok(fixture) => fixture,
            Err(err) => {
                error!("event=seed module=repository status=error error={err}");
                return Err(err.into());
            }
        };
        if fixture.is_empty() {
            error!(
                "event=seed module=repository status=error error_code=empty_fixture fixture={}",
                self.fixture_path.display()
            );
            return Err(RepositoryError::EmptyFixture(self.fixture_path.clone()));
        }

        info!(
            "event=seed module=repository status=start fixture={} count={}",
            self.fixture_path.display(),
            fixture.len()
        );
        let acks = try_join_all(fixture.iter().map(|article| self.store.create(article)));
        let acks = logged_quiet("seed", acks.await)?;
        Ok(acks.len())
    }

    fn replace_all(&mut self, rows: Vec<Article>) -> usize {
        self.articles.clear();
        self.load_all(rows);
        self.articles.len()
    }
}

/// Orders articles newest-first; undated ones go last in input order.
pub fn sort_newest_first(rows: &mut [Article]) {
    rows.sort_by_cached_key(|article| Reverse(article.published_at()));
}

fn logged(operation: &str, result: Result<Ack, StoreError>) -> RepositoryResult<Ack> {
    match result {
        Ok(ack) => {
            info!(
                "event={} module=repository status=ok http_status={} ack={}",
                operation, ack.status, ack.body
            );
            Ok(ack)
        }
        Err(err) => {
            error!("event={operation} module=repository status=error error={err}");
            Err(err.into())
        }
    }
}

fn logged_quiet<T>(operation: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if let Err(err) = &result {
        error!("event={operation} module=repository status=error error={err}");
    }
    result
}
