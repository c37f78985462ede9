//! Cookie validation.
//!
//! Hard failures ([`ValidationError`]) are caller contract violations and
//! stop emission before the response is touched. Soft findings
//! ([`CookieWarning`]) are logged and emission carries on.

use crate::config::CookieConfig;
use crate::cookies::CookieSpec;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("cookie spec can't be null/empty")]
    NullSpec,

    #[error("cookie name can't be null/empty")]
    MissingName,

    #[error("cookie name {0:?} is not a valid token")]
    InvalidName(String),

    #[error("value of cookie {0:?} contains characters not allowed in a cookie value")]
    InvalidValue(String),

    #[error("cookie {0} contains ';' or control characters")]
    InvalidAttribute(&'static str),
}

/// Non-fatal findings about a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieWarning {
    /// The value is longer than the configured limit; browsers may drop it.
    ValueTooLong { name: String, len: usize, max: usize },
}

impl fmt::Display for CookieWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieWarning::ValueTooLong { name, len, max } => write!(
                f,
                "cookie [{name}] value length {len} exceeds {max}, browsers may silently drop it"
            ),
        }
    }
}

/// Validates `spec` with the default [`CookieConfig`].
pub fn validate(spec: &CookieSpec) -> Result<(), ValidationError> {
    validate_with(spec, &CookieConfig::default())
}

/// Validates an optional spec; `None` fails with [`ValidationError::NullSpec`].
pub fn validate_opt(spec: Option<&CookieSpec>) -> Result<(), ValidationError> {
    match spec {
        Some(spec) => validate(spec),
        None => Err(ValidationError::NullSpec),
    }
}

/// Validates `spec` and logs every soft warning.
pub fn validate_with(spec: &CookieSpec, config: &CookieConfig) -> Result<(), ValidationError> {
    for warning in check(spec, config)? {
        log::warn!("{}", warning);
    }
    Ok(())
}

/// Validates `spec` and returns the soft warnings instead of logging them.
pub fn check(spec: &CookieSpec, config: &CookieConfig) -> Result<Vec<CookieWarning>, ValidationError> {
    if spec.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !spec.name.bytes().all(is_token_byte) {
        return Err(ValidationError::InvalidName(spec.name.clone()));
    }
    if !spec.value.bytes().all(is_cookie_octet) {
        return Err(ValidationError::InvalidValue(spec.name.clone()));
    }
    for (attribute, value) in [("path", &spec.path), ("domain", &spec.domain), ("comment", &spec.comment)] {
        if value.as_deref().is_some_and(|v| !v.bytes().all(is_attribute_byte)) {
            return Err(ValidationError::InvalidAttribute(attribute));
        }
    }

    let mut warnings = Vec::new();
    let len = spec.value.chars().count();
    if len > config.max_value_len {
        warnings.push(CookieWarning::ValueTooLong {
            name: spec.name.clone(),
            len,
            max: config.max_value_len,
        });
    }
    Ok(warnings)
}

/// RFC 7230 `tchar`.
fn is_token_byte(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.'
        | b'^' | b'_' | b'`' | b'|' | b'~')
        || b.is_ascii_alphanumeric()
}

/// RFC 6265 `av-octet`: anything but CTLs and `;`.
fn is_attribute_byte(b: u8) -> bool {
    b != b';' && b != 0x7F && b >= 0x20
}

/// RFC 6265 `cookie-octet`, widened to accept non-ASCII UTF-8 bytes.
fn is_cookie_octet(b: u8) -> bool {
    match b {
        0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E => true,
        0x80..=0xFF => true,
        _ => false,
    }
}
