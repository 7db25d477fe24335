use crate::http::headers::Headers;

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `Found` (302): Redirect, carries a `Location` header and no body
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): No static resource and no handler
/// - `InternalServerError` (500): Resource or store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webcore::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, StatusCode::Found)
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Responses built through [`ResponseBuilder`] always carry a
/// `Content-Length` matching the body, except redirects, which have no body
/// and carry `Location` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in insertion order
    pub headers: Headers,
    /// Response body, absent for redirects
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use webcore::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.headers.get("Content-Length"), Some("2"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the final Response.
    ///
    /// Content-Length is always recomputed from the body. Redirects drop the
    /// body together with Content-Length and Content-Type.
    pub fn build(mut self) -> Response {
        if self.status.is_redirect() {
            self.headers.remove("Content-Length");
            self.headers.remove("Content-Type");
            self.body = None;
        } else {
            let len = self.body.as_ref().map_or(0, Vec::len);
            self.headers.insert("Content-Length", len.to_string());
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with the given body and content type.
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(body)
            .build()
    }

    /// Creates a 200 OK `text/html` response.
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::ok("text/html", body)
    }

    /// Creates a short plain-text response, used for errors.
    pub fn text(status: StatusCode, message: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(message.as_bytes().to_vec())
            .build()
    }

    /// Creates a 302 redirect to `location`.
    pub fn redirect(location: &str) -> Self {
        ResponseBuilder::new(StatusCode::Found)
            .header("Location", location)
            .build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::text(StatusCode::BadRequest, "400 Bad Request")
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::text(StatusCode::NotFound, "404 Not Found")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::text(StatusCode::InternalServerError, "500 Internal Server Error")
    }

    /// The body bytes, empty when absent.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}
