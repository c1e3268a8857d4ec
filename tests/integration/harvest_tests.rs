use listing_harvester::model::{FailureReason, NO_RATING};
use listing_harvester::{filter_by_rating, Config, FetchError, HarvestError, Harvester};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.page_token = "page".to_string();
    config.http.timeout_secs = 5;
    config.aggregator.max_concurrent_requests = 3;
    config.aggregator.max_retries = 1;
    config.aggregator.retry_delay_ms = 0;
    config
}

fn listing_page(entries: &[(&str, &str)]) -> String {
    let entries: String = entries
        .iter()
        .map(|(title, rating)| {
            format!(
                r#"<div class="movies-list-item">
                    <div class="title"><a href="/movie/show/{0}">{0}</a></div>
                    <div class="sum-vote">{1}</div>
                </div>"#,
                title, rating
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="movies-list">{}</div></body></html>"#,
        entries
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_directory(server: &MockServer) {
    mount_page(
        server,
        "/movie/cat/+",
        r#"<html><body>
            <div class="col-md-4 menu-wrap">
                <ul>
                    <li><a href="/movie/cat/action">Akcja</a></li>
                    <li><a href="/movie/cat/drama">Dramat</a></li>
                    <li><a href="/movie/cat/comedy">Komedia</a></li>
                </ul>
            </div>
        </body></html>"#
            .to_string(),
    )
    .await;
}

#[tokio::test]
async fn test_full_harvest_cycle() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_directory(&mock_server).await;
    mount_page(
        &mock_server,
        "/movie/cat/action+",
        listing_page(&[("heat", "7.9"), ("ronin", "n/a")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/movie/cat/action+page[2]+",
        listing_page(&[("drive", "6.8")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/movie/cat/drama+",
        listing_page(&[("amadeus", "8.4"), ("her", "4.1")]),
    )
    .await;

    // Status errors are not retried
    Mock::given(method("GET"))
        .and(path("/movie/cat/drama+page[2]+"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&base_url)).expect("Failed to build harvester");

    let directory = harvester.discover_categories().await.unwrap();
    assert_eq!(
        directory.names().collect::<Vec<_>>(),
        vec!["Akcja", "Dramat", "Komedia"]
    );
    assert_eq!(
        directory.get("Akcja").unwrap().url,
        format!("{}/movie/cat/action", base_url)
    );

    let selected = directory.select(&["Akcja", "Dramat"]).unwrap();
    let result = harvester.list_categories(&selected, 2).await.unwrap();

    // Every request is accounted for exactly once
    assert_eq!(result.total_requests(), 4);
    assert_eq!(result.successes.len(), 3);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].request.category_name, "Dramat");
    assert_eq!(result.failures[0].request.page_index, 2);
    assert_eq!(
        result.failures[0].reason,
        FailureReason::Fetch(FetchError::Status { code: 500 })
    );

    // Submission order: Akcja p1, Akcja p2, Dramat p1
    let titles: Vec<_> = result.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["heat", "ronin", "drive", "amadeus", "her"]);
    assert_eq!(
        result.items[0].detail_url,
        format!("{}/movie/show/heat", base_url)
    );

    let pages: Vec<_> = result
        .pages()
        .map(|(request, items)| (request.category_name.as_str(), request.page_index, items.len()))
        .collect();
    assert_eq!(pages, vec![("Akcja", 1, 2), ("Akcja", 2, 1), ("Dramat", 1, 2)]);

    let kept = filter_by_rating(result.items.clone(), 5.0);
    let kept_titles: Vec<_> = kept.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(kept_titles, vec!["heat", "drive", "amadeus"]);

    let all_numeric = filter_by_rating(result.items, 0.0);
    assert_eq!(all_numeric.len(), 4);
}

#[tokio::test]
async fn test_missing_rating_gets_sentinel() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/movie/cat/action+",
        r#"<div class="movies-list-item"><div class="title"><a href="/movie/show/x">X</a></div></div>"#
            .to_string(),
    )
    .await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let result = harvester
        .list_items(&format!("{}/movie/cat/action", base_url), 1)
        .await
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].rating, NO_RATING);
    assert!(filter_by_rating(result.items, 0.0).is_empty());
}

#[tokio::test]
async fn test_directory_structure_changed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/movie/cat/+",
        r#"<html><body><nav class="categories"><a href="/movie/cat/action">Akcja</a></nav></body></html>"#
            .to_string(),
    )
    .await;

    let harvester = Harvester::new(create_test_config(&mock_server.uri())).unwrap();
    let result = harvester.discover_categories().await;

    assert!(matches!(result, Err(HarvestError::StructureNotFound { .. })));
}

#[tokio::test]
async fn test_empty_directory_is_not_an_error() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/movie/cat/+",
        r#"<html><body><div class="col-md-4 menu-wrap"></div></body></html>"#.to_string(),
    )
    .await;

    let harvester = Harvester::new(create_test_config(&mock_server.uri())).unwrap();
    let directory = harvester.discover_categories().await.unwrap();

    assert!(directory.is_empty());
}

#[tokio::test]
async fn test_every_page_failing_returns_empty_items() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let result = harvester
        .list_items(&format!("{}/movie/cat/action", base_url), 3)
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert!(result.is_total_failure());
    assert_eq!(result.failures.len(), 3);
    let indexes: Vec<_> = result.failures.iter().map(|f| f.request.page_index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}
