//! Cookies: [`CookieSpec`], the transport [`Cookie`], validation, lookup and emission.
//!
//! A [`CookieSpec`] is the logical description a caller fills in. It is
//! validated, converted into a [`Cookie`] and handed to a
//! [`Response`](crate::net::Response), which renders it as a `Set-Cookie`
//! header. Inbound cookies are parsed from the request's `Cookie` header into
//! the same [`Cookie`] type (name and value only).
//!
//! ```rust
//! use webglue::cookies::{add_cookie, CookieSpec};
//! use webglue::net::BufferedResponse;
//!
//! let mut response = BufferedResponse::new();
//! add_cookie(&CookieSpec::new("shopName", "feilong", 86400), &mut response).unwrap();
//!
//! let header = response.headers().get("set-cookie").unwrap();
//! assert_eq!(header, "shopName=feilong; Max-Age=86400");
//! ```

mod cookies;
mod cookie;
mod validate;
mod lookup;
mod emit;

pub use cookies::CookieSpec;
pub use cookies::CookieSpecBuilder;
pub use cookies::{DELETE_MAX_AGE, SESSION_MAX_AGE};

pub use cookie::parse_cookie_header;
pub use cookie::Cookie;

pub use validate::{check, validate, validate_opt, validate_with, CookieWarning, ValidationError};

pub use lookup::{cookie_value, cookies_to_map, find_cookie};

pub use emit::{add_cookie, add_cookie_with, delete_cookie, delete_cookie_with_path, to_transport_cookie};
