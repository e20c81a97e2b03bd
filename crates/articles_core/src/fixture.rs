//! Bundled seed dataset.
//!
//! The fixture is a JSON array of article payloads used to populate an empty
//! remote collection.

use crate::model::article::Article;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default fixture location, relative to the working directory.
pub const DEFAULT_FIXTURE_PATH: &str = "data/articles.json";

#[derive(Debug)]
pub enum FixtureError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read fixture `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid fixture json: {err}"),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Reads and decodes the fixture at `path`.
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<Article>, FixtureError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixture(&text)
}

/// Reads and decodes the fixture at `path` without blocking the runtime.
pub async fn read_fixture(path: impl AsRef<Path>) -> Result<Vec<Article>, FixtureError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_fixture(&text)
}

/// Decodes fixture text. The top-level value must be an array.
pub fn parse_fixture(text: &str) -> Result<Vec<Article>, FixtureError> {
    Ok(serde_json::from_str(text)?)
}
