//! Logical cookie description.
//!
//! [`CookieSpec`] is what callers build before anything touches a response.
//! It lives for one request/response exchange: it is validated, converted
//! into a transport [`Cookie`](super::Cookie) and dropped.
//!
//! ```rust
//! use webglue::cookies::CookieSpec;
//!
//! let spec = CookieSpec::builder("shopName")
//!     .value("feilong")
//!     .max_age(86400)
//!     .path("/member")
//!     .http_only(true)
//!     .build();
//!
//! assert_eq!(spec.path.as_deref(), Some("/member"));
//! assert!(!spec.is_deletion());
//! ```

use serde::{Deserialize, Serialize};

/// Max-age of a cookie that lives until the client closes.
pub const SESSION_MAX_AGE: i64 = -1;

/// Max-age that tells the client to drop the cookie immediately.
pub const DELETE_MAX_AGE: i64 = 0;

/// A cookie as described by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSpec {
    /// Cookie name (case-sensitive). Must be non-empty.
    pub name: String,

    /// Raw cookie value. The empty string is allowed.
    pub value: String,

    /// Lifetime in seconds.
    ///
    /// `-1` (or any negative value) is a session cookie, `0` deletes the
    /// cookie, a positive value expires the cookie after that many seconds.
    pub max_age: i64,

    /// Path scoping. A deletion only takes effect when it carries the same
    /// path the cookie was created with.
    pub path: Option<String>,

    /// Domain scoping. An empty string is treated like `None`.
    pub domain: Option<String>,

    /// If `true`, the cookie is only sent over secure transport.
    pub secure: bool,

    /// If `true`, the cookie is hidden from client-side scripts.
    pub http_only: bool,

    /// Legacy descriptive comment (RFC 2109).
    pub comment: Option<String>,

    /// Legacy cookie protocol version. `0`/`None` is the Netscape draft.
    pub version: Option<u8>,
}

impl CookieSpec {
    /// Creates a cookie with the given name, value and max-age and no
    /// scoping or security attributes.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V, max_age: i64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age,
            path: None,
            domain: None,
            secure: false,
            http_only: false,
            comment: None,
            version: None,
        }
    }

    pub fn builder<N: Into<String>>(name: N) -> CookieSpecBuilder {
        CookieSpecBuilder {
            inner: CookieSpec::new(name, "", SESSION_MAX_AGE),
        }
    }

    /// Returns `true` if emitting this cookie deletes it on the client.
    pub fn is_deletion(&self) -> bool {
        self.max_age == DELETE_MAX_AGE
    }

    /// Returns `true` if the cookie only lives for the browser session.
    pub fn is_session(&self) -> bool {
        self.max_age < 0
    }
}

/// Fluent builder for [`CookieSpec`].
///
/// Building never fails; validation happens when the cookie is emitted.
#[derive(Debug, Clone)]
pub struct CookieSpecBuilder {
    inner: CookieSpec,
}

impl CookieSpecBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CookieSpec)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn value<S: Into<String>>(self, value: S) -> Self { self.map(|c| c.value = value.into()) }
    pub fn max_age(self, seconds: i64) -> Self { self.map(|c| c.max_age = seconds) }
    pub fn path<S: Into<String>>(self, path: S) -> Self { self.map(|c| c.path = Some(path.into())) }
    pub fn domain<S: Into<String>>(self, domain: S) -> Self { self.map(|c| c.domain = Some(domain.into())) }
    pub fn secure(self, on: bool) -> Self { self.map(|c| c.secure = on) }
    pub fn http_only(self, on: bool) -> Self { self.map(|c| c.http_only = on) }
    pub fn comment<S: Into<String>>(self, comment: S) -> Self { self.map(|c| c.comment = Some(comment.into())) }
    pub fn version(self, version: u8) -> Self { self.map(|c| c.version = Some(version)) }

    pub fn build(self) -> CookieSpec {
        self.inner
    }
}
