//! Emitting cookies onto a response.
//!
//! ## Deleting cookies
//! A browser only drops a cookie when the deletion carries the **same path**
//! (and domain) the cookie was created with. Callers that created a cookie
//! with a custom path must pass that path again, e.g. through
//! [`delete_cookie_with_path`]. Otherwise the deletion is silently ignored by
//! the browser.

use crate::config::CookieConfig;
use crate::cookies::{validate_with, Cookie, CookieSpec, DELETE_MAX_AGE};
use crate::errors::WebError;
use crate::net::Response;

/// Converts a validated spec into the cookie that goes on the wire.
///
/// `path`, `domain` and `comment` are only copied when non-empty, so an
/// empty domain behaves exactly like an unset one. Negative max-ages become
/// session cookies.
pub fn to_transport_cookie(spec: &CookieSpec) -> Cookie {
    Cookie {
        name: spec.name.clone(),
        value: spec.value.clone(),
        max_age: (spec.max_age >= 0).then_some(spec.max_age),
        path: non_empty(&spec.path),
        domain: non_empty(&spec.domain),
        comment: non_empty(&spec.comment),
        version: spec.version,
        secure: spec.secure,
        http_only: spec.http_only,
    }
}

/// Validates `spec` and appends it to `response` with the default config.
///
/// Fails with [`WebError::InvalidCookie`] before the response is touched if
/// the spec is invalid, and with [`WebError::Io`] if the response refuses the
/// cookie (e.g. it is already committed).
///
/// A spec with `max_age == 0` is emitted as a deletion: its value is
/// dropped and its path/domain are kept so the deletion targets the same
/// cookie.
pub fn add_cookie<R: Response + ?Sized>(spec: &CookieSpec, response: &mut R) -> Result<(), WebError> {
    add_cookie_with(spec, response, &CookieConfig::default())
}

/// Same as [`add_cookie`] with an explicit [`CookieConfig`].
pub fn add_cookie_with<R: Response + ?Sized>(
    spec: &CookieSpec,
    response: &mut R,
    config: &CookieConfig,
) -> Result<(), WebError> {
    validate_with(spec, config)?;

    if spec.is_deletion() {
        let deletion = CookieSpec {
            value: String::new(),
            max_age: DELETE_MAX_AGE,
            ..spec.clone()
        };
        let cookie = to_transport_cookie(&deletion);
        log::debug!("deleting cookie:[{}]", cookie);
        response.add_cookie(&cookie)?;
        return Ok(());
    }

    let cookie = to_transport_cookie(spec);
    log::debug!("adding cookie:[{}]", cookie);
    response.add_cookie(&cookie)?;
    Ok(())
}

/// Deletes the cookie `name` that was created without a custom path.
pub fn delete_cookie<R: Response + ?Sized>(name: &str, response: &mut R) -> Result<(), WebError> {
    add_cookie(&CookieSpec::new(name, "", DELETE_MAX_AGE), response)
}

/// Deletes the cookie `name` that was created with `path`.
pub fn delete_cookie_with_path<R: Response + ?Sized>(
    name: &str,
    path: &str,
    response: &mut R,
) -> Result<(), WebError> {
    let spec = CookieSpec::builder(name).max_age(DELETE_MAX_AGE).path(path).build();
    add_cookie(&spec, response)
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::ValidationError;
    use crate::net::BufferedResponse;
    use http::header::SET_COOKIE;
    use std::io::Write;

    fn set_cookies(response: &BufferedResponse) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn add_cookie_writes_name_value_and_max_age() {
        let mut response = BufferedResponse::new();
        add_cookie(&CookieSpec::new("shopName", "feilong", 86400), &mut response).unwrap();

        let headers = set_cookies(&response);
        assert_eq!(headers.len(), 1);
        assert!(headers[0].contains("shopName=feilong; Max-Age=86400"));
    }

    #[test]
    fn delete_with_path_writes_zero_max_age_and_path() {
        let mut response = BufferedResponse::new();
        delete_cookie_with_path("shopName", "/member", &mut response).unwrap();

        assert_eq!(set_cookies(&response), vec!["shopName=; Max-Age=0; Path=/member"]);
    }

    #[test]
    fn delete_without_path() {
        let mut response = BufferedResponse::new();
        delete_cookie("shopName", &mut response).unwrap();
        assert_eq!(set_cookies(&response), vec!["shopName=; Max-Age=0"]);
    }

    #[test]
    fn zero_max_age_drops_value_and_keeps_scope() {
        let spec = CookieSpec::builder("shopName")
            .value("feilong")
            .max_age(0)
            .path("/member")
            .domain("example.com")
            .build();

        let mut response = BufferedResponse::new();
        add_cookie(&spec, &mut response).unwrap();

        let parsed = Cookie::parse_set_cookie(&set_cookies(&response)[0]).unwrap();
        assert_eq!(parsed.value, "");
        assert_eq!(parsed.max_age, Some(0));
        assert_eq!(parsed.path.as_deref(), Some("/member"));
        assert_eq!(parsed.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn empty_scope_attributes_are_not_copied() {
        let spec = CookieSpec {
            path: Some(String::new()),
            domain: Some(String::new()),
            comment: Some(String::new()),
            ..CookieSpec::new("a", "1", 60)
        };

        let cookie = to_transport_cookie(&spec);
        assert!(cookie.path.is_none());
        assert!(cookie.domain.is_none());
        assert!(cookie.comment.is_none());
        assert_eq!(cookie.to_string(), "a=1; Max-Age=60");
    }

    #[test]
    fn negative_max_age_is_session_cookie() {
        assert_eq!(to_transport_cookie(&CookieSpec::new("a", "1", -1)).max_age, None);
        assert_eq!(to_transport_cookie(&CookieSpec::new("a", "1", -42)).max_age, None);
    }

    #[test]
    fn emitted_header_parses_back_to_same_cookie() {
        let specs = vec![
            CookieSpec::new("plain", "v", 10),
            CookieSpec::new("empty", "", -1),
            CookieSpec::builder("scoped")
                .value("x%3Dy")
                .max_age(3600)
                .path("/member")
                .domain("shop.example.com")
                .secure(true)
                .http_only(true)
                .build(),
            CookieSpec::builder("flags").value("1").max_age(5).http_only(true).build(),
            CookieSpec::builder("dotted")
                .value("1")
                .max_age(60)
                .path("/")
                .domain(".example.com")
                .build(),
        ];

        for spec in specs {
            let mut response = BufferedResponse::new();
            add_cookie(&spec, &mut response).unwrap();

            let parsed = Cookie::parse_set_cookie(&set_cookies(&response)[0]).unwrap();
            assert_eq!(parsed.name, spec.name);
            assert_eq!(parsed.value, spec.value);
            assert_eq!(parsed.path, spec.path);
            assert_eq!(parsed.domain, spec.domain);
            assert_eq!(parsed.secure, spec.secure);
            assert_eq!(parsed.http_only, spec.http_only);
        }
    }

    #[test]
    fn invalid_spec_leaves_response_untouched() {
        let mut response = BufferedResponse::new();
        let err = add_cookie(&CookieSpec::new("", "x", 60), &mut response).unwrap_err();

        assert!(matches!(err, WebError::InvalidCookie(ValidationError::MissingName)));
        assert!(set_cookies(&response).is_empty());
    }

    #[test]
    fn injected_path_is_rejected_before_emission() {
        let spec = CookieSpec::builder("sid")
            .value("1")
            .max_age(60)
            .path("/member; Domain=evil.example")
            .build();

        let mut response = BufferedResponse::new();
        let err = add_cookie(&spec, &mut response).unwrap_err();
        assert!(matches!(err, WebError::InvalidCookie(ValidationError::InvalidAttribute("path"))));
        assert!(set_cookies(&response).is_empty());
    }

    #[test]
    fn newline_in_path_is_an_error_not_a_dropped_cookie() {
        let spec = CookieSpec::builder("sid").value("1").path("/a\nb").build();

        let mut response = BufferedResponse::new();
        assert!(add_cookie(&spec, &mut response).is_err());
        assert!(set_cookies(&response).is_empty());
    }

    #[test]
    fn refused_cookie_surfaces_as_io_error() {
        let mut response = BufferedResponse::new();
        response.writer().unwrap().write_all(b"body").unwrap();

        let err = add_cookie(&CookieSpec::new("a", "1", 60), &mut response).unwrap_err();
        assert!(matches!(err, WebError::Io(_)));
    }

    #[test]
    fn several_cookies_append() {
        let mut response = BufferedResponse::new();
        add_cookie(&CookieSpec::new("a", "1", 60), &mut response).unwrap();
        add_cookie(&CookieSpec::new("b", "2", 60), &mut response).unwrap();
        assert_eq!(set_cookies(&response).len(), 2);
    }
}
