//! Transport tests against mock HAProxy endpoints


use haproxy_collector::fetch::{
    BasicAuth, FetchError, HttpFetcher, SocketAddress, SocketFetcher, StatsFetcher, Transport,
    ensure_csv_suffix,
};
use haproxy_collector::filter::ProxyFilter;
use haproxy_collector::stats::{Field, parse_snapshot};
use test_helpers::{MockResponse, spawn_stats_page, stats_payload, stats_row};

fn sample_payload() -> String {
    stats_payload(&[
        stats_row("web", "FRONTEND", &[(Field::SCur, 12), (Field::ReqTot, 100)]),
        stats_row("web", "srv1", &[(Field::SCur, 7)]),
        stats_row("app", "BACKEND", &[(Field::QCur, 3)]),
    ])
}

#[tokio::test]
async fn test_http_fetch_returns_body() {
    let page = spawn_stats_page(vec![MockResponse::ok(sample_payload())]).await;
    let fetcher = HttpFetcher::new(ensure_csv_suffix(&page.url()), None).unwrap();

    let body = fetcher.fetch().await.unwrap();
    assert_eq!(body, sample_payload());

    let snapshot = parse_snapshot(&body, &ProxyFilter::unfiltered("host1")).unwrap();
    assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["web", "app"]);

    let requests = page.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /stats;csv "));
}

#[tokio::test]
async fn test_http_non_200_is_error() {
    let page = spawn_stats_page(vec![MockResponse::status(500)]).await;
    let fetcher = HttpFetcher::new(ensure_csv_suffix(&page.url()), None).unwrap();

    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::UnexpectedStatus { status: 500, .. }));
    assert!(err.is_bad_response());
}

#[tokio::test]
async fn test_http_unauthorized_logs_at_error() {
    let page = spawn_stats_page(vec![MockResponse::status(401)]).await;
    let fetcher = HttpFetcher::new(ensure_csv_suffix(&page.url()), None).unwrap();

    let err = fetcher.fetch().await.unwrap_err();
    assert_eq!(err.log_level(), tracing::Level::ERROR);
}

#[tokio::test]
async fn test_http_empty_body_is_error() {
    let page = spawn_stats_page(vec![MockResponse::ok("")]).await;
    let fetcher = HttpFetcher::new(ensure_csv_suffix(&page.url()), None).unwrap();

    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody { .. }));
}

#[tokio::test]
async fn test_http_sends_basic_auth() {
    let page = spawn_stats_page(vec![MockResponse::ok(sample_payload())]).await;
    let auth = BasicAuth::new("admin", Some("secret".to_string()));
    let fetcher = HttpFetcher::new(ensure_csv_suffix(&page.url()), Some(auth)).unwrap();

    fetcher.fetch().await.unwrap();

    // base64("admin:secret")
    let head = page.requests().remove(0).to_ascii_lowercase();
    assert!(head.contains("authorization: basic ywrtaw46c2vjcmv0"));
}

#[tokio::test]
async fn test_http_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = HttpFetcher::new(format!("http://{}/stats;csv", addr), None).unwrap();
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn test_transport_builds_http_fetcher() {
    let page = spawn_stats_page(vec![MockResponse::ok(sample_payload())]).await;
    let transport = Transport::Http {
        url: ensure_csv_suffix(&page.url()),
        auth: None,
    };

    let fetcher = transport.build_fetcher().unwrap();
    assert_eq!(fetcher.fetch().await.unwrap(), sample_payload());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unix_socket_sends_show_stat() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haproxy.sock");
    let (commands, _server) = test_helpers::spawn_stats_socket(&path, vec![sample_payload()]);

    let fetcher = SocketFetcher::new(SocketAddress::Unix(path.clone()));
    let body = fetcher.fetch().await.unwrap();

    assert_eq!(body, sample_payload());
    assert_eq!(commands.lock().unwrap().as_slice(), ["show stat\n"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unix_socket_reconnects_each_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haproxy.sock");
    let second = stats_payload(&[stats_row("web", "FRONTEND", &[(Field::ReqTot, 200)])]);
    let (commands, _server) =
        test_helpers::spawn_stats_socket(&path, vec![sample_payload(), second.clone()]);

    let fetcher = SocketFetcher::new(SocketAddress::Unix(path));
    assert_eq!(fetcher.fetch().await.unwrap(), sample_payload());
    assert_eq!(fetcher.fetch().await.unwrap(), second);
    assert_eq!(commands.lock().unwrap().len(), 2);
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_unix_socket_is_connect_error() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = SocketFetcher::new(SocketAddress::Unix(dir.path().join("absent.sock")));

    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Connect { .. }));
}
