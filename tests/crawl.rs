//! End-to-end crawl behavior against a mock site.

use site_atlas::{Crawl, MalformedLinkPolicy};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page, asserting it is fetched exactly once
async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(1)
        .mount(server)
        .await;
}

/// Builds a page body with root-relative links
fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect();
    format!(
        "<html><body><h1>{}</h1><main><p>About {}.</p></main>{}</body></html>",
        title, title, anchors
    )
}

#[tokio::test]
async fn acyclic_graph_visits_each_page_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page("A", &["/c"])).await;
    mount_page(&server, "/b", page("B", &[])).await;
    mount_page(&server, "/c", page("C", &[])).await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 4);
    let a = &result["127.0.0.1/a"];
    assert_eq!(a.h1, "A");
    assert_eq!(a.first_paragraph, "About A.");
    assert_eq!(a.outgoing_links, vec![format!("{}/c", server.uri())]);
}

#[tokio::test]
async fn cyclic_graph_terminates() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a"])).await;
    mount_page(&server, "/a", page("A", &["/"])).await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.contains_key("127.0.0.1"));
    assert!(result.contains_key("127.0.0.1/a"));
}

#[tokio::test]
async fn self_linking_seed_yields_one_record() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/"])).await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn trailing_slash_variants_share_one_record() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a", "/a/"])).await;
    // Whichever variant claims first is the one fetched
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page("A", &[]), "text/html"))
        .expect(0..=1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page("A", &[]), "text/html"))
        .expect(0..=1)
        .mount(&server)
        .await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.contains_key("127.0.0.1/a"));
}

#[tokio::test]
async fn page_budget_caps_recorded_pages() {
    let server = MockServer::start().await;
    let home = page("Home", &["/a", "/b", "/c", "/d"]);
    for (route, title) in [("/a", "A"), ("/b", "B"), ("/c", "C"), ("/d", "D")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page(title, &[]), "text/html"))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(home, "text/html"))
        .mount(&server)
        .await;

    let result = Crawl::new(&server.uri())
        .with_max_pages(2)
        .run()
        .await
        .unwrap();

    assert!(result.len() <= 2, "got {} pages", result.len());
    assert!(!result.is_empty());
}

#[tokio::test]
async fn concurrency_of_one_serializes_fetches() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/p1", "/p2", "/p3", "/p4"])).await;
    let delay = Duration::from_millis(100);
    for route in ["/p1", "/p2", "/p3", "/p4"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(page("Leaf", &[]), "text/html")
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let start = Instant::now();
    let result = Crawl::new(&server.uri())
        .with_max_concurrency(1)
        .run()
        .await
        .unwrap();

    assert_eq!(result.len(), 5);
    // Four delayed fetches through a single slot cannot overlap
    assert!(
        start.elapsed() >= delay * 4,
        "fetches overlapped: {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn off_domain_links_are_skipped_silently() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        page("Home", &["https://other.invalid/elsewhere", "/a"]),
    )
    .await;
    mount_page(&server, "/a", page("A", &[])).await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn xml_resources_are_not_fetched() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/sitemap.xml", "/a"])).await;
    mount_page(&server, "/a", page("A", &[])).await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn fetch_failures_do_not_stop_the_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/missing", "/plain", "/a"])).await;
    mount_page(&server, "/a", page("A", &[])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not html", "text/plain"))
        .mount(&server)
        .await;

    let result = Crawl::new(&server.uri()).run().await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(!result.contains_key("127.0.0.1/missing"));
    assert!(!result.contains_key("127.0.0.1/plain"));
}

#[tokio::test]
async fn malformed_reference_aborts_crawl_by_default() {
    let server = MockServer::start().await;
    let html = r#"<html><body><a href="invalid">bad</a></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&server)
        .await;

    let err = Crawl::new(&server.uri()).run().await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid URL found: invalid");
}

#[tokio::test]
async fn skip_malformed_policy_keeps_crawling() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/bad", "/a"])).await;
    mount_page(&server, "/a", page("A", &[])).await;
    let bad = r#"<html><body><h1>Bad</h1><a href="mailto:x@y.z">contact</a></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bad, "text/html"))
        .mount(&server)
        .await;

    let result = Crawl::new(&server.uri())
        .with_malformed_link_policy(MalformedLinkPolicy::SkipPage)
        .run()
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    assert!(!result.contains_key("127.0.0.1/bad"));
}
