//! Transport-level cookie and its wire formats.
//!
//! [`Cookie`] is what actually goes over the wire. Outbound cookies render
//! through [`Display`](std::fmt::Display) as a `Set-Cookie` header value;
//! inbound cookies come from the request's `Cookie` header via
//! [`parse_cookie_header`].
//!
//! ## Outbound attribute order
//! `name=value; Max-Age=N; Path=P; Domain=D; Comment=C; Version=V; Secure; HttpOnly`
//!
//! - `Max-Age` is left out for session cookies (`max_age == None`).
//! - `Comment` and `Version` are only written for versions above 0; the
//!   Netscape draft (version 0) has no comment attribute.
//! - Values are written raw. Validation rejects anything that would break
//!   the header grammar before a cookie gets here.
//!
//! See also: RFC 6265 (HTTP State Management Mechanism).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cookie as sent in a `Set-Cookie` header or received in a `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value (not URL-decoded).
    pub value: String,

    /// Lifetime in seconds. `None` means no `Max-Age` attribute (session cookie).
    pub max_age: Option<i64>,

    /// Path scoping (e.g., `"/"`).
    pub path: Option<String>,

    /// Domain scoping (host-only if `None`).
    pub domain: Option<String>,

    /// Legacy comment attribute.
    pub comment: Option<String>,

    /// Legacy protocol version.
    pub version: Option<u8>,

    /// If `true`, cookie is sent only over HTTPS.
    pub secure: bool,

    /// If `true`, cookie is blocked from access by client-side scripts.
    pub http_only: bool,
}

impl Cookie {
    /// Creates a bare name/value cookie, as found in a request.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            path: None,
            domain: None,
            comment: None,
            version: None,
            secure: false,
            http_only: false,
        }
    }

    /// Returns the `Set-Cookie` header value for this cookie.
    pub fn to_set_cookie(&self) -> String {
        self.to_string()
    }

    /// Parses a single `Set-Cookie` header value.
    ///
    /// Attribute names are matched case-insensitively, attribute values are
    /// kept verbatim (a leading dot on `Domain` included), unknown attributes
    /// are ignored. Returns `None`
    /// when there is no `name=value` pair or the name is empty.
    pub fn parse_set_cookie(header: &str) -> Option<Cookie> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(name, value.trim());

        for part in parts {
            let part = part.trim();
            if let Some((k, v)) = part.split_once('=') {
                let v = v.trim();
                match k.trim().to_ascii_lowercase().as_str() {
                    "max-age" => cookie.max_age = v.parse().ok(),
                    "path" => cookie.path = Some(v.to_string()),
                    "domain" => cookie.domain = Some(v.to_string()),
                    "comment" => cookie.comment = Some(v.to_string()),
                    "version" => cookie.version = v.parse().ok(),
                    _ => {}
                }
            } else if part.eq_ignore_ascii_case("secure") {
                cookie.secure = true;
            } else if part.eq_ignore_ascii_case("httponly") {
                cookie.http_only = true;
            }
        }

        Some(cookie)
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;

        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={}", path)?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }
        if let Some(version) = self.version.filter(|v| *v > 0) {
            if let Some(comment) = &self.comment {
                write!(f, "; Comment={}", comment)?;
            }
            write!(f, "; Version={}", version)?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

/// Parses an inbound `Cookie` request header (`a=1; b=2`).
///
/// Order and duplicates are preserved. Pairs without `=` or with an empty
/// name are skipped.
pub fn parse_cookie_header(header: &str) -> Vec<Cookie> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Cookie::new(name, value.trim()))
        })
        .collect()
}
