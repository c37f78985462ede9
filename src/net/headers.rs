//! Response header and body helpers.
//!
//! ## No-cache headers
//! No single header disables caching across every browser cache
//! implementation; `Cache-Control: no-cache` alone is honored inconsistently
//! without `no-store`. [`set_no_cache_headers`] therefore always writes the
//! triplet `Cache-Control`, `Pragma` and `Expires` (a date in the past), the
//! same thing as the classic HTML meta tags:
//!
//! ```text
//! <meta http-equiv="Cache-Control" content="no-cache" />
//! <meta http-equiv="Pragma" content="no-cache" />
//! <meta http-equiv="Expires" content="0" />
//! ```

use crate::config::DEFAULT_CHARACTER_ENCODING;
use crate::errors::WebError;
use crate::net::Response;
use chrono::{DateTime, Utc};
use http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use http::HeaderValue;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;

const NO_CACHE_CONTROL: &str = "no-cache,no-store,max-age=0";
const NO_CACHE_PRAGMA: &str = "no-cache,no-store";
const JSON_MIME: &str = "application/json";

/// Disables client and proxy caching for this response.
pub fn set_no_cache_headers<R: Response + ?Sized>(response: &mut R) {
    response.set_header(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL));
    response.set_header(PRAGMA, HeaderValue::from_static(NO_CACHE_PRAGMA));
    response.set_date_header(EXPIRES, DateTime::<Utc>::UNIX_EPOCH);
}

/// Lets clients cache the response for `max_age` seconds.
///
/// `max_age <= 0` means "do not cache" and sets the no-cache headers instead.
pub fn set_cache_header<R: Response + ?Sized>(response: &mut R, max_age: i64) {
    if max_age <= 0 {
        set_no_cache_headers(response);
        return;
    }
    match HeaderValue::from_str(&format!("max-age={}", max_age)) {
        Ok(v) => response.set_header(CACHE_CONTROL, v),
        Err(e) => log::warn!("invalid cache max-age [{}]: {}", max_age, e),
    }
}

/// Redirects the client to `url`.
///
/// Callers must not write to the response afterwards. I/O failures are
/// surfaced as [`WebError::Io`].
pub fn redirect<R: Response + ?Sized>(response: &mut R, url: &str) -> Result<(), WebError> {
    log::debug!("redirecting to:[{}]", url);
    response.send_redirect(url)?;
    Ok(())
}

/// Writes `content` as the response body.
///
/// The content type and encoding are applied **before** the writer is
/// acquired; setting them later has no effect. The writer is flushed but
/// not closed; the container owns the stream. Calling `write` again on the
/// same response appends to the body already written.
pub fn write<R, T>(
    response: &mut R,
    content: &T,
    content_type: Option<&str>,
    encoding: Option<&str>,
) -> Result<(), WebError>
where
    R: Response + ?Sized,
    T: Display + ?Sized,
{
    if let Some(ct) = content_type.filter(|ct| !ct.is_empty()) {
        response.set_content_type(ct);
    }
    if let Some(enc) = encoding.filter(|enc| !enc.is_empty()) {
        response.set_character_encoding(enc);
    }

    let writer = response.writer()?;
    write!(writer, "{}", content)?;
    writer.flush()?;
    Ok(())
}

/// Serializes `value` as JSON and writes it with an
/// `application/json;charset=<encoding>` content type (UTF-8 by default).
pub fn write_json<R, T>(response: &mut R, value: &T, encoding: Option<&str>) -> Result<(), WebError>
where
    R: Response + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    let encoding = encoding.unwrap_or(DEFAULT_CHARACTER_ENCODING);
    let content_type = format!("{};charset={}", JSON_MIME, encoding);
    write(response, json.as_str(), Some(&content_type), Some(encoding))
}
