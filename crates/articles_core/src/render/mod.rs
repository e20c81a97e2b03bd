//! Article rendering pipeline.
//!
//! # Responsibility
//! - Convert Markdown bodies to HTML.
//! - Derive display-only fields (`daysAgo`, `publishStatus`).
//! - Feed the derived view into the `article` Handlebars template.
//!
//! # Invariants
//! - Rendering reads the source `Article` and never mutates it.
//! - Markdown conversion runs exactly once per rendered view.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod markdown;
mod template;
mod view;

pub use markdown::markdown_to_html;
pub use template::{ArticleRenderer, ARTICLE_TEMPLATE_NAME, BUNDLED_TEMPLATE};
pub use view::{
    article_days_ago, article_status, days_ago, publish_status, RenderedArticle, DRAFT_STATUS,
    UNDATED_STATUS,
};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug)]
pub enum RenderError {
    /// Template text failed to compile.
    Template(handlebars::TemplateError),
    /// Template evaluation failed.
    Render(handlebars::RenderError),
    /// Template file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read template `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Template(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::Template(value)
    }
}

impl From<handlebars::RenderError> for RenderError {
    fn from(value: handlebars::RenderError) -> Self {
        Self::Render(value)
    }
}
