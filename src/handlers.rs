//! Dynamic handlers for user sign-up and login.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::PagesConfig;
use crate::error::DispatchError;
use crate::http::request::Method;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routing::Router;
use crate::store::{MemoryStore, StoreError, User};

/// Builds the route table the server runs with.
pub fn routes(store: Arc<MemoryStore>, pages: &PagesConfig) -> Router {
    let create_store = store.clone();
    let home = pages.home_path.clone();
    let login_home = pages.home_path.clone();
    let login_failed = pages.login_failed_path.clone();
    let cookie = pages.session_cookie.clone();

    Router::new()
        .route(Method::POST, "/user/create", move |body| {
            create_user(&create_store, body, &home)
        })
        .route(Method::POST, "/user/login", move |body| {
            login(&store, body, &cookie, &login_home, &login_failed)
        })
}

/// Registers a user from a `userId`/`password`/`name`/`email` form.
pub fn create_user(store: &MemoryStore, body: &[u8], home: &str) -> Result<Response, DispatchError> {
    let mut form = parse_form(body);
    let user = User {
        user_id: required(&mut form, "userId")?,
        password: required(&mut form, "password")?,
        name: required(&mut form, "name")?,
        email: required(&mut form, "email")?,
    };

    match store.add_user(user) {
        Ok(()) => Ok(Response::redirect(home)),
        Err(StoreError::DuplicateUser(id)) => Err(DispatchError::InvalidForm(format!(
            "user id {id:?} is taken"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Checks a `userId`/`password` form and opens a session on success.
pub fn login(
    store: &MemoryStore,
    body: &[u8],
    cookie: &str,
    home: &str,
    failed: &str,
) -> Result<Response, DispatchError> {
    let mut form = parse_form(body);
    let user_id = required(&mut form, "userId")?;
    let password = required(&mut form, "password")?;

    match store.login(&user_id, &password)? {
        Some(session_id) => {
            tracing::info!(user_id = %user_id, "login succeeded");
            Ok(ResponseBuilder::new(StatusCode::Found)
                .header("Location", home)
                .header("Set-Cookie", format!("{cookie}={session_id}; Path=/"))
                .build())
        }
        None => {
            tracing::info!(user_id = %user_id, "login failed");
            Ok(Response::redirect(failed))
        }
    }
}

fn parse_form(body: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

fn required(form: &mut HashMap<String, String>, field: &str) -> Result<String, DispatchError> {
    form.remove(field)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DispatchError::InvalidForm(format!("missing field {field:?}")))
}
