//! End-to-end tests: bind an ephemeral-port listener, run the serve loop,
//! and issue raw HTTP/1.1 requests over a TCP stream.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use nocache_serve::server;

const NO_CACHE_LINES: &[&str] = &[
    "cache-control: no-store, no-cache, must-revalidate, max-age=0",
    "pragma: no-cache",
    "expires: 0",
];

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nocache-serve-e2e-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn start_server(root: PathBuf) -> SocketAddr {
    let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, Arc::new(root)));
    addr
}

/// Send one request and return (header block lowercased, body bytes).
async fn request(addr: SocketAddr, method: &str, path: &str) -> (String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let raw = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator in response");
    let head = String::from_utf8_lossy(&response[..split]).to_lowercase();
    let body = response[split + 4..].to_vec();
    (head, body)
}

fn assert_no_cache_headers(head: &str) {
    for line in NO_CACHE_LINES {
        assert!(head.contains(line), "missing `{line}` in:\n{head}");
    }
}

#[tokio::test]
async fn serves_index_html_with_no_cache_headers() {
    let root = temp_root("index");
    std::fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "GET", "/index.html").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert_eq!(body, b"<h1>hi</h1>");
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn file_bytes_are_unmodified() {
    let root = temp_root("bytes");
    let content: Vec<u8> = (0u8..=255).collect();
    std::fs::write(root.join("blob.bin"), &content).unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "GET", "/blob.bin").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert!(head.contains("content-type: application/octet-stream"));
    assert_eq!(body, content);
}

#[tokio::test]
async fn not_found_still_carries_no_cache_headers() {
    let root = temp_root("notfound");
    let addr = start_server(root).await;

    let (head, _) = request(addr, "GET", "/does-not-exist.txt").await;
    assert!(head.starts_with("http/1.1 404"), "{head}");
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn directory_listing_carries_no_cache_headers() {
    let root = temp_root("listing");
    std::fs::write(root.join("a.txt"), "a").unwrap();
    std::fs::create_dir_all(root.join("sub")).unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "GET", "/").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert_no_cache_headers(&head);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Directory listing for /"));
    assert!(html.contains("a.txt"));
    assert!(html.contains("sub/"));
}

#[tokio::test]
async fn index_file_takes_precedence_over_listing() {
    let root = temp_root("precedence");
    std::fs::write(root.join("index.html"), "<p>home</p>").unwrap();
    std::fs::write(root.join("other.txt"), "x").unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "GET", "/").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert_eq!(body, b"<p>home</p>");
}

#[tokio::test]
async fn directory_without_slash_redirects() {
    let root = temp_root("redirect");
    std::fs::create_dir_all(root.join("docs")).unwrap();
    let addr = start_server(root).await;

    let (head, _) = request(addr, "GET", "/docs").await;
    assert!(head.starts_with("http/1.1 301"), "{head}");
    assert!(head.contains("location: /docs/"));
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn head_returns_headers_without_body() {
    let root = temp_root("head");
    std::fs::write(root.join("page.html"), "<h1>hi</h1>").unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "HEAD", "/page.html").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert!(head.contains("content-length: 11"));
    assert!(body.is_empty());
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn method_not_allowed_carries_no_cache_headers() {
    let root = temp_root("method");
    let addr = start_server(root).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"DELETE / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let head = String::from_utf8_lossy(&response).to_lowercase();
    assert!(head.starts_with("http/1.1 405"), "{head}");
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn range_request_returns_partial_content() {
    let root = temp_root("range");
    std::fs::write(root.join("data.txt"), "0123456789").unwrap();
    let addr = start_server(root).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /data.txt HTTP/1.1\r\nHost: localhost\r\nRange: bytes=2-5\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let split = response.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8_lossy(&response[..split]).to_lowercase();
    let body = &response[split + 4..];

    assert!(head.starts_with("http/1.1 206"), "{head}");
    assert!(head.contains("content-range: bytes 2-5/10"));
    assert_eq!(body, b"2345");
    assert_no_cache_headers(&head);
}

#[tokio::test]
async fn traversal_outside_root_is_not_found() {
    let parent = temp_root("traversal-parent");
    std::fs::write(parent.join("secret.txt"), "s").unwrap();
    let root = parent.join("webroot");
    std::fs::create_dir_all(&root).unwrap();
    let addr = start_server(root).await;

    let (head, _) = request(addr, "GET", "/%2e%2e/secret.txt").await;
    assert!(head.starts_with("http/1.1 404"), "{head}");
}

#[tokio::test]
async fn percent_encoded_names_are_decoded() {
    let root = temp_root("decode");
    std::fs::write(root.join("hello world.txt"), "space").unwrap();
    let addr = start_server(root).await;

    let (head, body) = request(addr, "GET", "/hello%20world.txt").await;
    assert!(head.starts_with("http/1.1 200"), "{head}");
    assert_eq!(body, b"space");
}

#[tokio::test]
async fn occupied_port_refuses_to_bind() {
    let first = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = first.local_addr().unwrap();
    assert!(server::create_listener(addr).is_err());
}
