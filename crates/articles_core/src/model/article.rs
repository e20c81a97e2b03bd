//! Article record and its write payload.
//!
//! # Responsibility
//! - Decode article payloads from list responses and fixture files.
//! - Produce the fixed field subset sent on create/update.
//! - Interpret `publishedOn` as a publication instant.
//!
//! # Invariants
//! - `id` is never part of a write payload.
//! - An absent, `null` or blank `publishedOn` marks a draft.
//! - Fields outside the typed set are kept verbatim in `extra`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Opaque identifier assigned by the remote store.
///
/// The server may hand out numeric or textual ids; both decode into the same
/// textual form used when building `/articles/{id}` paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ArticleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for ArticleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(Self(text)),
            RawId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}

/// Key older servers use for the record id.
const LEGACY_ID_KEY: &str = "article_id";

/// Canonical article record.
///
/// Serialized with camelCase keys (`authorUrl`, `publishedOn`) to match the
/// collection endpoint. When a row has no `id`, the store's `article_id`
/// column supplies it; `article_id` itself stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    pub author: String,
    pub author_url: Option<String>,
    pub category: String,
    pub title: String,
    /// Markdown source. Rendering never overwrites it.
    pub body: String,
    /// Raw publication date as stored remotely; see [`Article::published_at`].
    pub published_on: Option<String>,
    /// Columns this crate does not model (joins, audit fields).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of an incoming row, before `id` is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleRecord {
    #[serde(default)]
    id: Option<ArticleId>,
    #[serde(default, deserialize_with = "string_or_null")]
    author: String,
    #[serde(default)]
    author_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_null")]
    category: String,
    #[serde(default, deserialize_with = "string_or_null")]
    title: String,
    #[serde(default, deserialize_with = "string_or_null")]
    body: String,
    #[serde(default)]
    published_on: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Article {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ArticleRecord::deserialize(deserializer)?;
        let id = match record.id {
            Some(id) => Some(id),
            None => match record.extra.get(LEGACY_ID_KEY) {
                None | Some(Value::Null) => None,
                Some(value) => Some(
                    ArticleId::deserialize(value).map_err(<D::Error as de::Error>::custom)?,
                ),
            },
        };

        Ok(Self {
            id,
            author: record.author,
            author_url: record.author_url,
            category: record.category,
            title: record.title,
            body: record.body,
            published_on: record.published_on,
            extra: record.extra,
        })
    }
}

/// Fields submitted on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload<'a> {
    pub author: &'a str,
    pub author_url: Option<&'a str>,
    pub body: &'a str,
    pub category: &'a str,
    pub published_on: Option<&'a str>,
    pub title: &'a str,
}

impl Article {
    /// Creates an unpersisted draft.
    pub fn new(
        author: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            category: category.into(),
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Decodes an article from an arbitrary key/value payload.
    ///
    /// Missing text fields default to empty strings; unknown keys land in
    /// `extra`.
    pub fn from_value(payload: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload)
    }

    pub fn with_id(mut self, id: impl Into<ArticleId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_author_url(mut self, author_url: impl Into<String>) -> Self {
        self.author_url = Some(author_url.into());
        self
    }

    pub fn with_published_on(mut self, published_on: impl Into<String>) -> Self {
        self.published_on = Some(published_on.into());
        self
    }

    /// Returns the non-blank raw `publishedOn` value.
    pub fn published_on(&self) -> Option<&str> {
        self.published_on
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn is_draft(&self) -> bool {
        self.published_on().is_none()
    }

    /// Parsed publication instant.
    ///
    /// Returns `None` for drafts and for values that are not a recognized
    /// date; use [`parse_published_on`] to tell the two apart.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_on().and_then(parse_published_on)
    }

    /// Builds the write payload. The identifier is never included, and a
    /// blank `publishedOn` is sent as `null`.
    pub fn payload(&self) -> ArticlePayload<'_> {
        ArticlePayload {
            author: &self.author,
            author_url: self.author_url.as_deref(),
            body: &self.body,
            category: &self.category,
            published_on: self.published_on(),
            title: &self.title,
        }
    }
}

/// Parses a `publishedOn` value.
///
/// Accepted forms:
/// - RFC 3339 timestamps (`2015-02-18T08:00:00.000Z`)
/// - naive timestamps (`2015-02-18T08:00:00`), read as UTC
/// - calendar dates (`2015-02-18`), read as midnight UTC
pub fn parse_published_on(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::parse_published_on;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_calendar_date_as_utc_midnight() {
        let parsed = parse_published_on("2015-02-18").expect("date should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 2, 18, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_published_on("2015-02-18T02:00:00+02:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 2, 18, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_timestamp_as_utc() {
        let parsed = parse_published_on("2015-02-18T08:30:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 2, 18, 8, 30, 0).unwrap());
    }

    #[test]
    fn rejects_free_text() {
        assert_eq!(parse_published_on("last tuesday"), None);
    }
}
