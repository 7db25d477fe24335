//! Session-dependent rewriting of HTML pages.
//!
//! Pages mark where dynamic content goes with a literal placeholder, and
//! every occurrence of it is replaced. A page that happens to contain the
//! placeholder text elsewhere gets that text replaced too.

use crate::store::User;

/// Replaces every occurrence of `placeholder` in `body` with `replacement`.
///
/// Bodies that are not UTF-8 are returned unchanged.
pub fn substitute(body: &[u8], placeholder: &str, replacement: &str) -> Vec<u8> {
    match std::str::from_utf8(body) {
        Ok(text) if !placeholder.is_empty() => text.replace(placeholder, replacement).into_bytes(),
        _ => body.to_vec(),
    }
}

/// One table row per user, numbered from 1 in store order.
///
/// Values are inserted as-is; they come from the user store, not the request.
pub fn render_user_rows(users: &[User]) -> String {
    users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            format!(
                "<tr><th scope=\"row\">{}</th><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                user.user_id,
                user.name,
                user.email
            )
        })
        .collect()
}
