use articles_core::{
    Article, ArticleId, ArticleRepository, ArticleStore, FetchOutcome, HttpArticleStore,
    StoreError,
};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_article() -> Article {
    Article::new("Ada", "engineering", "Cache lines", "Measure *first*.")
        .with_id(7_i64)
        .with_author_url("http://example.org/ada")
        .with_published_on("2015-03-02")
}

fn sample_payload() -> serde_json::Value {
    json!({
        "author": "Ada",
        "authorUrl": "http://example.org/ada",
        "body": "Measure *first*.",
        "category": "engineering",
        "publishedOn": "2015-03-02",
        "title": "Cache lines"
    })
}

#[tokio::test]
async fn list_reads_the_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"article_id": 1, "title": "one", "author": "a", "category": "c", "body": "b", "publishedOn": "2015-01-01"},
            {"article_id": 2, "title": "two", "author": "a", "category": "c", "body": "b", "publishedOn": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let rows = store.list().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, Some(ArticleId::new("1")));
    assert!(rows[1].is_draft());
}

#[tokio::test]
async fn create_posts_the_six_fields_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .and(body_json(sample_payload()))
        .respond_with(ResponseTemplate::new(200).set_body_string("insert complete"))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let ack = store.create(&sample_article()).await.unwrap();

    assert_eq!(ack.status, 200);
    assert_eq!(ack.body, "insert complete");
}

#[tokio::test]
async fn update_puts_to_the_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/articles/7"))
        .and(body_json(sample_payload()))
        .respond_with(ResponseTemplate::new(200).set_body_string("update complete"))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let article = sample_article();
    let ack = store
        .update(article.id.as_ref().unwrap(), &article)
        .await
        .unwrap();

    assert_eq!(ack.body, "update complete");
}

#[tokio::test]
async fn delete_and_delete_all_use_delete_method() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/articles/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("delete complete"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("delete all complete"))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let one = store.delete(&ArticleId::new("7")).await.unwrap();
    let all = store.delete_all().await.unwrap();

    assert_eq!(one.body, "delete complete");
    assert_eq!(all.body, "delete all complete");
}

#[tokio::test]
async fn error_status_is_not_acknowledged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let err = store.create(&sample_article()).await.unwrap_err();

    match err {
        StoreError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/articles"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let store = HttpArticleStore::new("http://127.0.0.1:9").unwrap();
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}

#[tokio::test]
async fn fetch_all_seeds_an_empty_server_from_the_fixture() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("insert complete"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"article_id": 1, "title": "older", "author": "a", "category": "c", "body": "b", "publishedOn": "2015-01-01"},
            {"article_id": 2, "title": "newer", "author": "a", "category": "c", "body": "b", "publishedOn": "2015-06-01"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut fixture = tempfile::NamedTempFile::new().unwrap();
    fixture
        .write_all(
            br#"[
                {"title": "older", "author": "a", "category": "c", "body": "b", "publishedOn": "2015-01-01"},
                {"title": "newer", "author": "a", "category": "c", "body": "b", "publishedOn": "2015-06-01"}
            ]"#,
        )
        .unwrap();

    let store = HttpArticleStore::new(&server.uri()).unwrap();
    let mut repo = ArticleRepository::new(store, fixture.path());
    let outcome = repo.fetch_all().await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Seeded {
            created: 2,
            loaded: 2
        }
    );
    assert_eq!(repo.articles()[0].title, "newer");

    let posted = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .map(|request| request.body_json::<serde_json::Value>().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(posted.len(), 2);
    assert!(posted.iter().all(|body| body.get("id").is_none()));
}
