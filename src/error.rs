//! Request failures and their translation into responses.

use crate::http::parser::ParseError;
use crate::http::response::{Response, StatusCode};
use crate::store::StoreError;

/// Everything that can go wrong between parsing a request and producing its
/// response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    #[error("invalid form: {0}")]
    InvalidForm(String),

    #[error("no static resource or handler for {route}")]
    RouteNotFound { route: String },

    #[error("cannot read {path}: {source}")]
    ResourceAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session/user lookup failed: {0}")]
    UpstreamLookup(#[from] StoreError),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Malformed(_) | DispatchError::InvalidForm(_) => StatusCode::BadRequest,
            DispatchError::RouteNotFound { .. } => StatusCode::NotFound,
            DispatchError::ResourceAccess { .. } | DispatchError::UpstreamLookup(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Turns the failure into a complete error response.
    ///
    /// Internal details stay in the logs; the client only sees the status
    /// line repeated as plain text.
    pub fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::BadRequest => tracing::warn!(error = %self, "rejecting request"),
            StatusCode::NotFound => tracing::debug!(error = %self, "nothing to serve"),
            _ => tracing::error!(error = %self, "request failed"),
        }

        match status {
            StatusCode::BadRequest => Response::bad_request(),
            StatusCode::NotFound => Response::not_found(),
            _ => Response::internal_error(),
        }
    }
}
