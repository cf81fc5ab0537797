//! Cookie helpers for the session indicator and UI preference cookies.

use axum::http::{header::COOKIE, header::SET_COOKIE, HeaderMap, HeaderValue};

/// Extract a cookie value from request headers by name.
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookie_header| cookie_header.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let (cookie_name, cookie_value) = cookie.split_once('=')?;
            if cookie_name == name {
                Some(cookie_value)
            } else {
                None
            }
        })
}

/// Build a Set-Cookie header value that deletes the cookie at path `/`.
pub fn build_clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", name)
}

/// Append a clearing Set-Cookie header for the session cookie.
pub fn add_clear_session_cookie(headers: &mut HeaderMap, name: &str) {
    if let Ok(value) = HeaderValue::from_str(&build_clear_cookie(name)) {
        headers.append(SET_COOKIE, value);
    }
}
