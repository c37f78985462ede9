//! Outbound response model.
//!
//! [`Response`] is the contract the helpers write through. [`BufferedResponse`]
//! is a **fully buffered** implementation holding the status code, headers and
//! body bytes in memory.
//!
//! ## Commit rules
//! - Headers must be set before the writer is acquired. Acquiring the writer
//!   commits the response; later header changes are ignored (and logged).
//! - `add_cookie` and `send_redirect` on a committed response fail with an
//!   I/O error, as does a cookie that can't be encoded as a header value.
//! - The writer is the same buffer every time it is acquired; repeated
//!   writes append to the body.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.

use crate::cookies::Cookie;
use chrono::{DateTime, Utc};
use http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use std::io::{self, Write};

/// IMF-fixdate, the preferred HTTP-date format.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The parts of an outbound response the helpers rely on.
pub trait Response {
    /// Appends a `Set-Cookie` header for `cookie`.
    ///
    /// Fails if the response is committed or the cookie can't be encoded.
    fn add_cookie(&mut self, cookie: &Cookie) -> io::Result<()>;

    /// Sets `name`, replacing any previous values.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Appends a value for `name`, keeping previous values.
    fn add_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Sets `name` to `when` formatted as an HTTP date.
    fn set_date_header(&mut self, name: HeaderName, when: DateTime<Utc>);

    fn set_content_type(&mut self, content_type: &str);

    fn set_character_encoding(&mut self, encoding: &str);

    /// Redirects the client to `location`.
    ///
    /// Nothing may be written to the response afterwards.
    fn send_redirect(&mut self, location: &str) -> io::Result<()>;

    /// Returns the body writer, committing the response. Later calls return
    /// the same writer, positioned after what was already written.
    fn writer(&mut self) -> io::Result<&mut dyn Write>;

    fn is_committed(&self) -> bool;
}

/// Simple in-memory response.
#[derive(Debug)]
pub struct BufferedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    content_type: Option<String>,
    character_encoding: Option<String>,
    committed: bool,
}

impl Default for BufferedResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
            content_type: None,
            character_encoding: None,
            committed: false,
        }
    }
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns `false` (and logs) when the response is committed.
    fn writable(&self, what: &str) -> bool {
        if self.committed {
            log::warn!("response already committed, ignoring {}", what);
        }
        !self.committed
    }

    fn sync_content_type(&mut self) {
        let Some(content_type) = &self.content_type else {
            return;
        };
        let full = match &self.character_encoding {
            Some(enc) if !content_type.contains("charset=") => format!("{};charset={}", content_type, enc),
            _ => content_type.clone(),
        };
        match HeaderValue::from_str(&full) {
            Ok(v) => {
                self.headers.insert(CONTENT_TYPE, v);
            }
            Err(e) => log::warn!("invalid content type [{}]: {}", full, e),
        }
    }
}

impl Response for BufferedResponse {
    fn add_cookie(&mut self, cookie: &Cookie) -> io::Result<()> {
        if self.committed {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("response already committed, can't add cookie [{}]", cookie.name),
            ));
        }
        let value = HeaderValue::from_str(&cookie.to_set_cookie())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.headers.append(SET_COOKIE, value);
        Ok(())
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.writable(name.as_str()) {
            self.headers.insert(name, value);
        }
    }

    fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.writable(name.as_str()) {
            self.headers.append(name, value);
        }
    }

    fn set_date_header(&mut self, name: HeaderName, when: DateTime<Utc>) {
        let formatted = when.format(HTTP_DATE_FORMAT).to_string();
        match HeaderValue::from_str(&formatted) {
            Ok(v) => self.set_header(name, v),
            Err(e) => log::warn!("invalid date header [{}]: {}", formatted, e),
        }
    }

    fn set_content_type(&mut self, content_type: &str) {
        if self.writable("content type") {
            self.content_type = Some(content_type.to_string());
            self.sync_content_type();
        }
    }

    fn set_character_encoding(&mut self, encoding: &str) {
        if self.writable("character encoding") {
            self.character_encoding = Some(encoding.to_string());
            self.sync_content_type();
        }
    }

    fn send_redirect(&mut self, location: &str) -> io::Result<()> {
        if self.committed {
            return Err(io::Error::new(io::ErrorKind::Other, "response already committed"));
        }
        let value = HeaderValue::from_str(location)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        self.status = StatusCode::FOUND;
        self.headers.insert(LOCATION, value);
        self.body.clear();
        self.committed = true;
        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut dyn Write> {
        self.committed = true;
        Ok(&mut self.body)
    }

    fn is_committed(&self) -> bool {
        self.committed
    }
}
