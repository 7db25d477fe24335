use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Every method the parser recognizes. Static resources are only served for
/// GET; everything else goes through the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection by the parser and never modified afterwards.
/// `path` never contains the query suffix; that lives in `query`.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path without the query string (e.g., "/index.html")
    pub path: String,
    /// Everything after the first `?` of the request target, if any
    pub query: Option<String>,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, names kept exactly as received
    pub headers: HashMap<String, String>,
    /// Cookies from the `Cookie` header
    pub cookies: HashMap<String, String>,
    /// Request body, exactly `Content-Length` bytes
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use webcore::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request target. A `?` splits it into path and query, the
    /// same way the parser does.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let method = self.method.ok_or("method missing")?;
        let target = self.path.ok_or("path missing")?;
        let (path, query) = split_target(&target);
        let cookies = header_ignore_case(&self.headers, "Cookie")
            .map(parse_cookies)
            .unwrap_or_default();

        Ok(Request {
            method,
            path,
            query,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            cookies,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    ///
    /// # Arguments
    ///
    /// * `key` - Header name to look up
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        header_ignore_case(&self.headers, "Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Looks up a cookie by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|v| v.as_str())
    }

    /// The `"METHOD path"` key used to find a dynamic handler.
    pub fn route_key(&self) -> String {
        route_key(self.method, &self.path)
    }
}

/// Joins a method and a path into a route table key.
///
/// ```
/// # use webcore::http::request::{route_key, Method};
/// assert_eq!(route_key(Method::POST, "/users"), "POST /users");
/// ```
pub fn route_key(method: Method, path: &str) -> String {
    format!("{} {}", method, path)
}

/// Splits a request target on the first `?` and normalizes the path part.
pub(crate) fn split_target(target: &str) -> (String, Option<String>) {
    match target.split_once('?') {
        Some((path, query)) => (normalize_path(path), Some(query.to_string())),
        None => (normalize_path(target), None),
    }
}

/// Collapses repeated `/` and drops `.` segments.
///
/// `..` is left in place; the static loader refuses such paths. A trailing
/// `/` survives.
///
/// ```
/// # use webcore::http::request::normalize_path;
/// assert_eq!(normalize_path("/user//./list.html"), "/user/list.html");
/// assert_eq!(normalize_path("/docs/"), "/docs/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        normalized.push('/');
        normalized.push_str(segment);
    }

    let trailing = path.ends_with('/') || path.ends_with("/.");
    if normalized.is_empty() || trailing {
        normalized.push('/');
    }
    normalized
}

/// Parses a `Cookie` header value (`a=1; b=2`).
///
/// Pieces without `=` are skipped rather than rejected; a bad cookie never
/// fails the request.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

pub(crate) fn header_ignore_case<'a>(
    headers: &'a HashMap<String, String>,
    name: &str,
) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
        .map(|v| v.as_str())
}
