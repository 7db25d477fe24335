//! Content type lookup by file extension.

use std::path::Path;

/// The path has no extension, or one missing from the table.
///
/// Not a failure for the caller: it means "not a static resource".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no content type known for {path:?}")]
pub struct UnknownExtension {
    pub path: String,
}

const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("eot", "application/vnd.ms-fontobject"),
];

/// Maps a path's extension (the text after the last `.` of the file name)
/// to a MIME type.
///
/// ```
/// # use webcore::http::mime::content_type_for;
/// assert_eq!(content_type_for("/index.html").unwrap(), "text/html");
/// assert!(content_type_for("/user/create").is_err());
/// ```
pub fn content_type_for(path: &str) -> Result<&'static str, UnknownExtension> {
    let unknown = || UnknownExtension {
        path: path.to_string(),
    };

    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(unknown)?;

    MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .ok_or_else(unknown)
}

pub fn is_html(content_type: &str) -> bool {
    content_type == "text/html"
}
