use super::markdown_to_html;
use crate::model::article::{Article, ArticleId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Status shown for articles without a publication date.
pub const DRAFT_STATUS: &str = "(draft)";

/// Status shown when `publishedOn` is set but is not a recognized date.
pub const UNDATED_STATUS: &str = "(undated)";

/// Context keys owned by the view; passthrough fields never replace them.
const VIEW_KEYS: [&str; 9] = [
    "id",
    "author",
    "authorUrl",
    "category",
    "title",
    "body",
    "publishedOn",
    "daysAgo",
    "publishStatus",
];

/// Display-ready projection of an [`Article`].
///
/// This is the context handed to the `article` template, so its keys use the
/// same camelCase names as the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    pub author: String,
    pub author_url: Option<String>,
    pub category: String,
    pub title: String,
    /// HTML converted from the source Markdown.
    pub body: String,
    pub published_on: Option<String>,
    /// `None` for drafts and unrecognized dates.
    pub days_ago: Option<i64>,
    pub publish_status: String,
    /// Source `extra`, minus any key that collides with a view field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderedArticle {
    /// Builds the view of `article` as seen at `now`.
    pub fn from_article(article: &Article, now: DateTime<Utc>) -> Self {
        let extra = article
            .extra
            .iter()
            .filter(|(key, _)| !VIEW_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            id: article.id.clone(),
            author: article.author.clone(),
            author_url: article.author_url.clone(),
            category: article.category.clone(),
            title: article.title.clone(),
            body: markdown_to_html(&article.body),
            published_on: article.published_on().map(str::to_string),
            days_ago: article_days_ago(article, now),
            publish_status: article_status(article, now),
            extra,
        }
    }
}

/// Whole days elapsed between `published` and `now`, truncated toward zero.
///
/// Future dates yield negative values.
pub fn days_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published).num_days()
}

/// Human-readable publication status.
pub fn publish_status(days_ago: Option<i64>) -> String {
    match days_ago {
        Some(days) => format!("published {days} days ago"),
        None => DRAFT_STATUS.to_string(),
    }
}

/// Days since `article` was published, if it has a recognized date.
pub fn article_days_ago(article: &Article, now: DateTime<Utc>) -> Option<i64> {
    article
        .published_at()
        .map(|published| days_ago(published, now))
}

/// Status line for `article` at `now`.
///
/// Unrecognized dates get [`UNDATED_STATUS`] instead of failing.
pub fn article_status(article: &Article, now: DateTime<Utc>) -> String {
    match article_days_ago(article, now) {
        Some(days) => publish_status(Some(days)),
        None if article.is_draft() => DRAFT_STATUS.to_string(),
        None => UNDATED_STATUS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        article_status, days_ago, publish_status, RenderedArticle, DRAFT_STATUS, UNDATED_STATUS,
    };
    use crate::model::article::Article;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn days_ago_truncates_partial_days() {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = published + Duration::days(3) + Duration::hours(23);
        assert_eq!(days_ago(published, now), 3);
    }

    #[test]
    fn days_ago_is_negative_for_future_dates() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let published = now + Duration::days(2);
        assert_eq!(days_ago(published, now), -2);
    }

    #[test]
    fn publish_status_formats_both_states() {
        assert_eq!(publish_status(Some(12)), "published 12 days ago");
        assert_eq!(publish_status(None), DRAFT_STATUS);
    }

    #[test]
    fn blank_published_on_is_a_draft() {
        let article = Article::new("a", "c", "t", "b").with_published_on("   ");
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let view = RenderedArticle::from_article(&article, now);
        assert_eq!(view.days_ago, None);
        assert_eq!(view.published_on, None);
        assert_eq!(view.publish_status, "(draft)");
    }

    #[test]
    fn unparseable_published_on_is_undated() {
        let article = Article::new("a", "c", "t", "b").with_published_on("someday");
        let view = RenderedArticle::from_article(&article, Utc::now());
        assert_eq!(view.days_ago, None);
        assert_eq!(view.published_on.as_deref(), Some("someday"));
        assert_eq!(view.publish_status, UNDATED_STATUS);
        assert_eq!(article_status(&article, Utc::now()), UNDATED_STATUS);
    }
}
