//! End-to-end: real sockets through the listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use webcore::config::PagesConfig;
use webcore::handlers;
use webcore::http::connection::ConnectionOptions;
use webcore::http::parser::Limits;
use webcore::routing::{Dispatcher, MemoryFiles, StaticLoader};
use webcore::server::listener::serve;
use webcore::store::MemoryStore;

async fn start(options: ConnectionOptions) -> SocketAddr {
    let store = Arc::new(MemoryStore::new());
    let pages = PagesConfig::default();
    let dispatcher = Arc::new(Dispatcher::new(
        StaticLoader::new(
            MemoryFiles::new()
                .with_file("/index.html", "<a>로그인</a>")
                .with_file("/user/list.html", "<tbody><tr></tr></tbody>"),
        ),
        handlers::routes(store.clone(), &pages),
        store.clone(),
        store,
        pages,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, dispatcher, options));
    addr
}

async fn exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    let head = response.split("\r\n\r\n").next()?;
    head.lines()
        .filter_map(|l| l.split_once(": "))
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

#[tokio::test]
async fn test_static_page_round_trip() {
    let addr = start(ConnectionOptions::default()).await;

    let response = exchange(addr, b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(header(&response, "Content-Type"), Some("text/html"));
    assert_eq!(header(&response, "Connection"), Some("close"));
    assert!(response.ends_with("\r\n\r\n<a>로그인</a>"));
}

#[tokio::test]
async fn test_malformed_request_gets_400() {
    let addr = start(ConnectionOptions::default()).await;

    let response = exchange(addr, b"GET /index.html\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.ends_with("400 Bad Request"));
}

#[tokio::test]
async fn test_unknown_route_gets_404() {
    let addr = start(ConnectionOptions::default()).await;

    let response = exchange(addr, b"GET /nowhere HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_sign_up_login_and_list() {
    let addr = start(ConnectionOptions::default()).await;

    let form = "userId=alice&password=pw&name=Alice&email=alice%40example.com";
    let create = format!(
        "POST /user/create HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
        form.len(),
        form
    );
    let response = exchange(addr, create.as_bytes()).await;
    assert!(response.starts_with("HTTP/1.1 302 Found\r\n"));

    let form = "userId=alice&password=pw";
    let login = format!(
        "POST /user/login HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
        form.len(),
        form
    );
    let response = exchange(addr, login.as_bytes()).await;
    let cookie = header(&response, "Set-Cookie").unwrap();
    let sid = cookie.split(';').next().unwrap().to_string();

    let list = format!("GET /user/list.html HTTP/1.1\r\nCookie: {sid}\r\n\r\n");
    let response = exchange(addr, list.as_bytes()).await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("<td>alice</td><td>Alice</td><td>alice@example.com</td>"));

    let index = format!("GET /index.html HTTP/1.1\r\nCookie: {sid}\r\n\r\n");
    let response = exchange(addr, index.as_bytes()).await;
    assert!(response.ends_with("<a>Alice</a>"));
}

#[tokio::test]
async fn test_list_without_session_redirects() {
    let addr = start(ConnectionOptions::default()).await;

    let response = exchange(addr, b"GET /user/list.html HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 302 Found\r\n"));
    assert_eq!(header(&response, "Location"), Some("/user/login.html"));
    assert_eq!(header(&response, "Content-Length"), None);
    assert!(response.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_body_split_across_writes() {
    let addr = start(ConnectionOptions::default()).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"POST /user/login HTTP/1.1\r\nContent-Length: 24\r\n\r\nuserId=")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream.write_all(b"nobody&password=x").await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    let response = String::from_utf8(out).unwrap();

    assert_eq!(header(&response, "Location"), Some("/user/login_failed.html"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let addr = start(ConnectionOptions {
        limits: Limits {
            max_header_bytes: 1024,
            max_body_bytes: 4,
        },
        ..ConnectionOptions::default()
    })
    .await;

    let response = exchange(addr, b"POST /user/login HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello").await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_idle_client_is_disconnected() {
    let addr = start(ConnectionOptions {
        read_timeout: Duration::from_millis(100),
        ..ConnectionOptions::default()
    })
    .await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();

    let mut out = Vec::new();
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut out)).await;

    assert!(read.is_ok(), "server should close the idle connection");
    assert!(out.is_empty());
}
