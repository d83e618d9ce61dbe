use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use seoanalyzer::{Error, FetchError, PageFetcher, PipelineConfig};

/// Serves a single canned HTTP response, optionally after a delay.
async fn serve_once(status_line: &'static str, body: &'static str, delay: Duration) -> String {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    serve_raw(response, delay).await
}

/// Writes `response` verbatim to the first connection.
async fn serve_raw(response: String, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{}/", addr)
}

fn fetcher(timeout_secs: u64) -> PageFetcher {
    PageFetcher::new(&PipelineConfig {
        request_timeout_secs: timeout_secs,
        ..Default::default()
    })
    .expect("fetcher")
}

#[tokio::test]
async fn fetches_and_parses_page() {
    let url = serve_once(
        "200 OK",
        "<html><head><title>Hello</title></head><body><h1>Hi</h1><p>Some body text</p></body></html>",
        Duration::ZERO,
    )
    .await;

    let page = fetcher(5).fetch(&url).await.expect("fetch");
    assert_eq!(page.title.as_deref(), Some("Hello"));
    assert_eq!(page.h1.as_deref(), Some("Hi"));
    assert_eq!(page.url, url);
}

#[tokio::test]
async fn http_error_status_is_classified() {
    let url = serve_once("404 Not Found", "missing", Duration::ZERO).await;

    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Fetch(FetchError::HttpStatus { status: 404, .. })
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn slow_server_times_out() {
    let url = serve_once("200 OK", "late", Duration::from_secs(5)).await;

    let err = fetcher(1).fetch(&url).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Timeout(1))));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn refused_connection_is_classified() {
    // Bind then drop to obtain a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = fetcher(5)
        .fetch(&format!("http://{}/", addr))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::ConnectionFailed(_))));
}

#[tokio::test]
async fn malformed_body_is_a_request_error() {
    // Valid headers, then a chunk size that is not hexadecimal.
    let response = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\
                    Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
                    zz\r\n<html></html>\r\n0\r\n\r\n"
        .to_string();
    let url = serve_raw(response, Duration::ZERO).await;

    let err = fetcher(5).fetch(&url).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Request(_))));
    assert!(!err.is_retryable());
}
