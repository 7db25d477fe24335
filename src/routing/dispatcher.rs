use std::sync::Arc;

use crate::config::PagesConfig;
use crate::error::DispatchError;
use crate::http::mime::is_html;
use crate::http::request::{normalize_path, Method, Request};
use crate::http::response::Response;
use crate::routing::rewrite::{render_user_rows, substitute};
use crate::routing::router::Router;
use crate::routing::static_files::{StaticFile, StaticLoader, StaticLookup};
use crate::store::{SessionStore, User, UserStore};

/// Decides between static files and dynamic handlers and runs the choice.
///
/// Immutable after construction; one instance is shared by every
/// connection.
pub struct Dispatcher {
    static_files: StaticLoader,
    router: Router,
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    pages: PagesConfig,
}

impl Dispatcher {
    pub fn new(
        static_files: StaticLoader,
        router: Router,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        mut pages: PagesConfig,
    ) -> Self {
        // Request paths are normalized by the parser.
        pages.user_list_path = normalize_path(&pages.user_list_path);
        Self {
            static_files,
            router,
            sessions,
            users,
            pages,
        }
    }

    /// Produces the response for `req`. Failures become error responses.
    pub fn handle(&self, req: &Request) -> Response {
        self.dispatch(req).unwrap_or_else(DispatchError::into_response)
    }

    /// Static resources win for GET; everything else goes to the route table.
    pub fn dispatch(&self, req: &Request) -> Result<Response, DispatchError> {
        if req.method == Method::GET {
            if let StaticLookup::Found(file) = self.static_files.load(&req.path)? {
                tracing::debug!(path = %req.path, content_type = file.content_type, "serving static");
                return self.serve_static(req, file);
            }
        }

        let key = req.route_key();
        let handler = self
            .router
            .lookup(&key)
            .ok_or_else(|| DispatchError::RouteNotFound { route: key.clone() })?;

        tracing::debug!(route = %key, "invoking handler");
        handler(req.body.as_slice())
    }

    fn serve_static(&self, req: &Request, file: StaticFile) -> Result<Response, DispatchError> {
        let is_list_page = req.path == self.pages.user_list_path;
        let html = is_html(file.content_type);

        let user = if html || is_list_page {
            self.session_user(req)?
        } else {
            None
        };

        if is_list_page && user.is_none() {
            tracing::debug!(path = %req.path, "list page without session, redirecting");
            return Ok(Response::redirect(&self.pages.login_path));
        }

        let mut body = file.bytes;

        if let Some(user) = user.as_ref().filter(|_| html) {
            body = substitute(&body, &self.pages.login_placeholder, &user.name);
        }

        if is_list_page {
            let rows = render_user_rows(&self.users.all_users()?);
            body = substitute(&body, &self.pages.user_rows_placeholder, &rows);
        }

        Ok(Response::ok(file.content_type, body))
    }

    /// The logged-in user, if the session cookie names a live session.
    fn session_user(&self, req: &Request) -> Result<Option<User>, DispatchError> {
        match req.cookie(&self.pages.session_cookie) {
            Some(session_id) => Ok(self.sessions.user_for_session(session_id)?),
            None => Ok(None),
        }
    }
}
