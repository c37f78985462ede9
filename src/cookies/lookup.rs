//! Lookup of inbound cookies.
//!
//! Absence is not an error here: a missing cookie is `None` (or an empty
//! map), with a debug line for diagnostics.

use crate::cookies::Cookie;
use crate::net::Request;
use std::collections::BTreeMap;

/// Returns the first cookie named exactly `name` (case-sensitive).
pub fn find_cookie<'a>(cookies: &'a [Cookie], name: &str) -> Option<&'a Cookie> {
    if cookies.is_empty() {
        log::debug!("request has no cookies, can't find the cookie:[{}]", name);
        return None;
    }

    let found = cookies.iter().find(|c| c.name == name);
    if found.is_none() {
        log::debug!("can't find the cookie:[{}]", name);
    }
    found
}

/// Returns the value of the cookie named `name` sent with `request`.
pub fn cookie_value<R: Request + ?Sized>(request: &R, name: &str) -> Option<String> {
    find_cookie(request.cookies(), name).map(|c| c.value.clone())
}

/// Collects all cookies into a name -> value map.
///
/// Later duplicates overwrite earlier ones.
pub fn cookies_to_map(cookies: &[Cookie]) -> BTreeMap<String, String> {
    cookies
        .iter()
        .map(|c| (c.name.clone(), c.value.clone()))
        .collect()
}
