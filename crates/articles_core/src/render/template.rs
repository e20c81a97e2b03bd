use super::{RenderError, RenderResult, RenderedArticle};
use crate::model::article::Article;
use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use std::path::Path;

/// Registry name of the article template.
pub const ARTICLE_TEMPLATE_NAME: &str = "article";

/// Template shipped with the crate.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../templates/article.hbs");

/// Renders articles through a compiled Handlebars template.
///
/// The template sees a [`RenderedArticle`]: `body` is already HTML and must be
/// emitted with a triple-stash (`{{{body}}}`); every other field is escaped by
/// the default `{{field}}` form.
pub struct ArticleRenderer {
    registry: Handlebars<'static>,
}

impl ArticleRenderer {
    /// Compiles `template` as the article template.
    pub fn from_template_str(template: &str) -> RenderResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(ARTICLE_TEMPLATE_NAME, template)?;
        Ok(Self { registry })
    }

    /// Reads and compiles the template at `path`.
    pub fn from_template_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_template_str(&template)
    }

    /// Uses the template shipped with the crate.
    pub fn bundled() -> RenderResult<Self> {
        Self::from_template_str(BUNDLED_TEMPLATE)
    }

    /// Builds the display view of `article` at `now`.
    pub fn view(&self, article: &Article, now: DateTime<Utc>) -> RenderedArticle {
        RenderedArticle::from_article(article, now)
    }

    /// Renders `article` as of the current time.
    pub fn render(&self, article: &Article) -> RenderResult<String> {
        self.render_at(article, Utc::now())
    }

    /// Renders `article` as of `now`.
    pub fn render_at(&self, article: &Article, now: DateTime<Utc>) -> RenderResult<String> {
        self.render_view(&self.view(article, now))
    }

    pub fn render_view(&self, view: &RenderedArticle) -> RenderResult<String> {
        Ok(self.registry.render(ARTICLE_TEMPLATE_NAME, view)?)
    }
}
