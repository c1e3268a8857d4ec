use listing_harvester::config::HttpConfig;
use listing_harvester::harvester::{DocumentFetcher, HttpFetcher};
use listing_harvester::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_config() -> HttpConfig {
    let mut config = HttpConfig {
        user_agent: "TestAgent/1.0".to_string(),
        timeout_secs: 1,
        connect_timeout_secs: 1,
        ..HttpConfig::default()
    };
    config
        .headers
        .insert("Accept-Language".to_string(), "pl-PL".to_string());
    config
}

#[tokio::test]
async fn test_fetch_returns_body_and_sends_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/cat/action+"))
        .and(header("user-agent", "TestAgent/1.0"))
        .and(header("accept-language", "pl-PL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>ok</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/movie/cat/action+", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html><body>ok</body></html>");
}

#[tokio::test]
async fn test_fetch_keeps_pagination_tokens_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/cat/action+page[2]+"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page two"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/movie/cat/action+page[2]+", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "page two");
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();

    let result = fetcher.fetch(&format!("{}/missing", mock_server.uri())).await;
    assert_eq!(result, Err(FetchError::Status { code: 404 }));

    let result = fetcher.fetch(&format!("{}/broken", mock_server.uri())).await;
    assert_eq!(result, Err(FetchError::Status { code: 500 }));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/slow", mock_server.uri())).await;

    assert_eq!(result, Err(FetchError::Timeout));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Reserve a free port, then close it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let fetcher = HttpFetcher::new(&http_config()).unwrap();
    let result = fetcher.fetch(&format!("http://127.0.0.1:{}/gone", port)).await;

    assert!(matches!(result, Err(FetchError::Network { .. })));
}
