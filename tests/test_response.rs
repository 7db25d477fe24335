use webcore::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Found.as_u16(), 302);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Found.reason_phrase(), "Found");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body_bytes(), b"Hello, World!");
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(response.headers.get("x-custom").unwrap(), "value");
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    let content_length = response.headers.get("Content-Length").unwrap();
    assert_eq!(content_length, body.len().to_string());
}

#[test]
fn test_response_builder_overrides_stale_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "4");
}

#[test]
fn test_response_builder_keeps_insertion_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-cache")
        .header("X-Frame-Options", "DENY")
        .body(b"{}".to_vec())
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k).collect();
    assert_eq!(
        names,
        vec!["Content-Type", "Cache-Control", "X-Frame-Options", "Content-Length"]
    );
}

#[test]
fn test_response_builder_replacing_header_keeps_position() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("A", "1")
        .header("B", "2")
        .header("a", "3")
        .build();

    let pairs: Vec<(&str, &str)> = response.headers.iter().collect();
    assert_eq!(pairs[0], ("A", "3"));
    assert_eq!(pairs[1], ("B", "2"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert!(response.body.is_none());
    assert_eq!(response.headers.get("Content-Length").unwrap(), "0");
}

#[test]
fn test_redirect_has_location_and_no_body() {
    let response = Response::redirect("/user/login.html");

    assert_eq!(response.status, StatusCode::Found);
    assert_eq!(response.headers.get("Location"), Some("/user/login.html"));
    assert!(response.body.is_none());
    assert!(!response.headers.contains_key("Content-Length"));
    assert!(!response.headers.contains_key("Content-Type"));
}

#[test]
fn test_redirect_builder_drops_body_and_entity_headers() {
    let response = ResponseBuilder::new(StatusCode::Found)
        .header("Location", "/")
        .header("Content-Type", "text/html")
        .body(b"ignored".to_vec())
        .build();

    assert!(response.body.is_none());
    assert_eq!(response.headers.len(), 1);
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok("text/css", b"body{}".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.headers.get("Content-Type"), Some("text/css"));
    assert_eq!(response.headers.get("Content-Length"), Some("6"));
}

#[test]
fn test_content_length_counts_bytes_not_chars() {
    let response = Response::html("로그인");

    assert_eq!(response.headers.get("Content-Length"), Some("9"));
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body_bytes(), b"404 Not Found");
}

#[test]
fn test_response_internal_error_helper() {
    let response = Response::internal_error();

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.body_bytes(), b"500 Internal Server Error");
}
