use crate::http::request::{header_ignore_case, parse_cookies, split_target, Method, Request};
use std::collections::HashMap;

/// Default cap on the request line plus header block.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 16 * 1024;
/// Default cap on a declared request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("request line must be `METHOD target VERSION`")]
    InvalidRequest,
    #[error("unsupported method: {0:?}")]
    InvalidMethod(String),
    #[error("header line without `name: value` separator")]
    InvalidHeader,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("header block exceeds {0} bytes")]
    HeadersTooLarge(usize),
    #[error("body of {0} bytes exceeds the limit")]
    BodyTooLarge(usize),
    #[error("incomplete request")]
    Incomplete,
}

/// Size limits applied while parsing.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Parses one request from the front of `buf` with default limits.
///
/// Returns the request and the number of bytes it occupied, or
/// `ParseError::Incomplete` when more input is needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_with_limits(buf, &Limits::default())
}

pub fn parse_with_limits(buf: &[u8], limits: &Limits) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > limits.max_header_bytes => {
            return Err(ParseError::HeadersTooLarge(limits.max_header_bytes));
        }
        None => return Err(ParseError::Incomplete),
    };
    if headers_end > limits.max_header_bytes {
        return Err(ParseError::HeadersTooLarge(limits.max_header_bytes));
    }

    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let &[method_str, target, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequest);
    };
    if !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequest);
    }

    let method =
        Method::from_str(method_str).ok_or_else(|| ParseError::InvalidMethod(method_str.to_string()))?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        headers.insert(key.to_string(), value.trim().to_string());
    }

    // Body
    let content_length = header_ignore_case(&headers, "Content-Length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if content_length > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge(content_length));
    }

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let (path, query) = split_target(target);
    let cookies = header_ignore_case(&headers, "Cookie")
        .map(parse_cookies)
        .unwrap_or_default();

    let request = Request {
        method,
        path,
        query,
        version: version.to_string(),
        headers,
        cookies,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
