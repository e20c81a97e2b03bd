//! Model layer for the article-publishing demo.
//!
//! Fetches articles from a remote `/articles` collection, seeds it from a
//! bundled fixture when empty, renders articles to HTML and forwards
//! create/update/delete calls.

pub mod config;
pub mod fixture;
pub mod logging;
pub mod model;
pub mod render;
pub mod repository;
pub mod store;

pub use config::{load_config, AppConfig, ConfigError, LogConfig};
pub use fixture::{
    load_fixture, parse_fixture, read_fixture, FixtureError, DEFAULT_FIXTURE_PATH,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{parse_published_on, Article, ArticleId, ArticlePayload};
pub use render::{
    article_days_ago, article_status, days_ago, markdown_to_html, publish_status, ArticleRenderer,
    RenderError, RenderedArticle, DRAFT_STATUS, UNDATED_STATUS,
};
pub use repository::article_repository::{
    sort_newest_first, ArticleRepository, FetchOutcome, RepositoryError, RepositoryResult,
};
pub use store::{Ack, ArticleStore, HttpArticleStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
