//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetch, listing and extraction cycle end-to-end.

use habr_harvest::config::{Config, UserAgentConfig};
use habr_harvest::crawler::{
    build_http_client, fetch_page, run_harvest, FetchResult, Harvester, RetryPolicy,
};
use habr_harvest::{ArticleCollection, HarvestError, TextType, Topic};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, max_pages: u32, output_dir: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.user_agent = UserAgentConfig {
        value: "TestHarvester/1.0".to_string(),
    };
    config.fetch.max_retries = 1;
    config.fetch.timeout_secs = Some(5);
    config.crawl.max_pages = max_pages;
    config.output.directory = output_dir.to_string();
    config
}

fn listing_page(hrefs: &[&str]) -> String {
    let snippets: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<article class="tm-articles-list__item">
                    <h2><a class="tm-title__link" href="{href}">title</a></h2>
                    <a class="tm-article-snippet__readmore" href="{href}">Читать далее</a>
                </article>"#
            )
        })
        .collect();
    format!("<html><body><div class=\"tm-articles-list\">{snippets}</div></body></html>")
}

fn article_page(title: &str, author: Option<&str>, body_version: u8) -> String {
    let author = author
        .map(|name| format!(r#"<a class="tm-user-info__username" href="/ru/users/{name}/">{name}</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>
            <div class="tm-article-presenter">
                {author}
                <span class="tm-article-datetime-published"><time datetime="2021-01-02T07:30:00.000Z" title="2021-01-02, 10:30">2 янв</time></span>
                <h1 class="tm-title tm-title_h1" lang="ru">{title}</h1>
                <div class="article-formatted-body article-formatted-body article-formatted-body_version-{body_version}">
                    <p>Body of {title}.</p>
                </div>
                <div class="tm-publication-hubs">
                    <span class="tm-publication-hub__link-container"><a href="/ru/hub/rust/"><span>Rust</span><span> *</span></a></span>
                </div>
            </div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_retries_six_times_then_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(6)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
    let url = format!("{}/broken", mock_server.uri());

    let result = fetch_page(&client, &url, &RetryPolicy::default()).await;

    match result {
        FetchResult::HttpError {
            status_code,
            attempts,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(attempts, 6);
        }
        other => panic!("expected HttpError, got {:?}", other),
    }
    // The .expect(6) above is verified when the server drops
}

#[tokio::test]
async fn test_client_errors_are_retried_like_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
    let policy = RetryPolicy {
        max_retries: 2,
        delay: Duration::ZERO,
    };

    let result = fetch_page(&client, &format!("{}/missing", mock_server.uri()), &policy).await;
    assert_eq!(result.attempts(), Some(3));
}

#[tokio::test]
async fn test_fetch_recovers_after_transient_failures() {
    let mock_server = MockServer::start().await;

    // Mounted first, so it answers until exhausted
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
    let result = fetch_page(
        &client,
        &format!("{}/flaky", mock_server.uri()),
        &RetryPolicy::default(),
    )
    .await;

    match result {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "ok");
        }
        other => panic!("expected Success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestHarvester/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(
        &UserAgentConfig {
            value: "TestHarvester/1.0".to_string(),
        },
        None,
    )
    .unwrap();

    let result = fetch_page(
        &client,
        &format!("{}/ua", mock_server.uri()),
        &RetryPolicy::default(),
    )
    .await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_crawl_topic_collects_articles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/ru/flows/develop/news/page1",
        listing_page(&["/ru/news/1/", "/ru/news/2/"]),
    )
    .await;
    mount_html(&mock_server, "/ru/news/1/", article_page("First", Some("alice"), 1)).await;
    mount_html(&mock_server, "/ru/news/2/", article_page("Second", None, 2)).await;

    let config = create_test_config(&base_url, 1, "unused");
    let harvester = Harvester::new(config).expect("Failed to create harvester");
    let mut collection = ArticleCollection::new();

    let stats = harvester
        .crawl_topic(Topic::Develop, TextType::News, &mut collection)
        .await;

    assert_eq!(stats.pages_scanned, 1);
    assert_eq!(stats.links_found, 2);
    assert_eq!(stats.articles_added, 2);
    assert_eq!(stats.article_failures, 0);

    let articles = collection.articles();
    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].title(), "First");
    assert_eq!(articles[0].author(), Some("alice"));
    assert_eq!(articles[0].link(), format!("{}/ru/news/1/", base_url));
    assert_eq!(articles[0].body(), "Body of First.");
    assert_eq!(articles[0].tags(), ["Rust".to_string()]);
    assert_eq!(articles[0].topic(), Topic::Develop);

    assert_eq!(articles[1].title(), "Second");
    assert_eq!(articles[1].author(), None);
    assert_eq!(articles[1].body(), "Body of Second.");
}

#[tokio::test]
async fn test_bad_article_does_not_abort_topic() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/ru/flows/admin/news/page1",
        listing_page(&["/ru/news/broken/", "/ru/news/gone/", "/ru/news/good/"]),
    )
    .await;
    // Page missing its byline and body
    mount_html(
        &mock_server,
        "/ru/news/broken/",
        r#"<html><body><h1 class="tm-title tm-title_h1">Broken</h1></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/ru/news/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/ru/news/good/", article_page("Good", None, 1)).await;

    let harvester = Harvester::new(create_test_config(&base_url, 1, "unused")).unwrap();
    let mut collection = ArticleCollection::new();

    let stats = harvester
        .crawl_topic(Topic::Admin, TextType::News, &mut collection)
        .await;

    assert_eq!(stats.links_found, 3);
    assert_eq!(stats.article_failures, 2);
    assert_eq!(stats.articles_added, 1);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.articles()[0].title(), "Good");
}

#[tokio::test]
async fn test_crawl_survives_total_failure() {
    let mock_server = MockServer::start().await;

    // Every listing page fails: 3 pages x (1 + 1 retry)
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(6)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&mock_server.uri(), 3, "unused")).unwrap();
    let mut collection = ArticleCollection::new();

    let stats = harvester
        .crawl_topic(Topic::Design, TextType::Articles, &mut collection)
        .await;

    assert_eq!(stats.pages_scanned, 3);
    assert_eq!(stats.listing_failures, 3);
    assert_eq!(stats.links_found, 0);
    assert!(collection.is_empty());
}

#[tokio::test]
async fn test_empty_pages_are_scanned_to_the_limit() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/ru/flows/popsci/news/page1",
        listing_page(&["/ru/news/7/"]),
    )
    .await;
    mount_html(&mock_server, "/ru/news/7/", article_page("Seven", None, 1)).await;

    // Pages 2..=4 list nothing
    for page in 2..=4 {
        Mock::given(method("GET"))
            .and(path(format!("/ru/flows/popsci/news/page{}", page)))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let harvester = Harvester::new(create_test_config(&mock_server.uri(), 4, "unused")).unwrap();
    let mut collection = ArticleCollection::new();

    let stats = harvester
        .crawl_topic(Topic::Popsci, TextType::News, &mut collection)
        .await;

    assert_eq!(stats.pages_scanned, 4);
    assert_eq!(stats.empty_pages, 3);
    assert_eq!(collection.len(), 1);
}

#[tokio::test]
async fn test_stop_on_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ru/flows/marketing/news/page1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ru/flows/marketing/news/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 5, "unused");
    config.crawl.stop_on_empty_page = true;

    let harvester = Harvester::new(config).unwrap();
    let mut collection = ArticleCollection::new();

    let stats = harvester
        .crawl_topic(Topic::Marketing, TextType::News, &mut collection)
        .await;

    assert_eq!(stats.pages_scanned, 1);
    assert_eq!(stats.empty_pages, 1);
}

#[tokio::test]
async fn test_invalid_names_make_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&mock_server.uri(), 2, "unused")).unwrap();
    let mut collection = ArticleCollection::new();

    for (topic, text_type) in [("develop", "blogs"), ("hardware", "news"), ("", "")] {
        let result = harvester
            .crawl_topic_by_name(topic, text_type, &mut collection)
            .await;
        assert!(matches!(result, Err(HarvestError::InvalidArgument(_))));
    }

    assert!(collection.is_empty());
}

#[tokio::test]
async fn test_full_harvest_exports_deduplicated_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output_dir = tempfile::tempdir().unwrap();

    // The same article is listed under two topics and twice on one page
    mount_html(
        &mock_server,
        "/ru/flows/develop/news/page1",
        listing_page(&["/ru/news/1/", "/ru/news/1/", "/ru/news/2/"]),
    )
    .await;
    mount_html(
        &mock_server,
        "/ru/flows/admin/news/page1",
        listing_page(&["/ru/news/1/"]),
    )
    .await;
    mount_html(&mock_server, "/ru/news/1/", article_page("One", Some("bob"), 1)).await;
    mount_html(&mock_server, "/ru/news/2/", article_page("Two", None, 2)).await;

    let mut config = create_test_config(&base_url, 1, output_dir.path().to_str().unwrap());
    config.crawl.topics = vec![Topic::Develop, Topic::Admin];

    let (csv_path, stats) = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(csv_path, output_dir.path().join("news.csv"));
    assert_eq!(stats.total_articles(), 4);
    // Same article under another topic is a distinct record
    assert_eq!(stats.exported_rows, 3);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["name", "publication_date", "text", "link", "author", "tags", "topic"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(&rows[0][0], "One");
    assert_eq!(&rows[0][1], "2021-01-02 10:30:00");
    assert_eq!(&rows[0][2], "Body of One.");
    assert_eq!(rows[0][3], format!("{}/ru/news/1/", base_url));
    assert_eq!(&rows[0][4], "bob");
    assert_eq!(&rows[0][5], r#"["Rust"]"#);
    assert_eq!(&rows[0][6], "develop");

    assert_eq!(&rows[1][0], "Two");
    assert_eq!(&rows[1][4], "");

    assert_eq!(&rows[2][0], "One");
    assert_eq!(&rows[2][6], "admin");
}
