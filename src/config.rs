//! Helper configuration.
//!
//! [`CookieConfig`] controls cookie validation limits and [`LoggingConfig`]
//! controls what the logging listeners report. Both provide defaults via
//! [`Default`] and a fluent builder that validates on `build()`.
//!
//! # Examples
//!
//! ```rust
//! use webglue::config::CookieConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = CookieConfig::builder()
//!     .max_value_len(2048)
//!     .build()?;
//! assert_eq!(cfg.max_value_len, 2048);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `max_value_len`: cookie values longer than this are reported as a soft
//!   warning (default: 4000). Browsers may silently drop bigger cookies.
//! - `excluded_attribute_keys`: context attribute names the context attribute
//!   listener never logs (container internals, large blobs).

use std::fmt;

/// Value length above which a cookie triggers a warning.
pub const DEFAULT_MAX_COOKIE_VALUE_LEN: usize = 4000;

/// Character encoding used by the response writers when none is given.
pub const DEFAULT_CHARACTER_ENCODING: &str = "UTF-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub max_value_len: usize,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            max_value_len: DEFAULT_MAX_COOKIE_VALUE_LEN,
        }
    }
}

impl CookieConfig {
    pub fn builder() -> CookieConfigBuilder {
        CookieConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CookieConfigBuilder {
    inner: CookieConfig,
}

impl CookieConfigBuilder {
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.inner.max_value_len = len;
        self
    }

    pub fn build(self) -> Result<CookieConfig, ConfigError> {
        if self.inner.max_value_len == 0 {
            return Err(ConfigError::ZeroValueLength);
        }
        Ok(self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub excluded_attribute_keys: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            excluded_attribute_keys: Vec::new(),
        }
    }
}

impl LoggingConfig {
    pub fn builder() -> LoggingConfigBuilder {
        LoggingConfigBuilder::default()
    }

    /// Returns `true` when `name` must not show up in attribute log lines.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_attribute_keys.iter().any(|k| k == name)
    }
}

/// Builder for [`LoggingConfig`], mirroring [`CookieConfigBuilder`].
#[derive(Debug, Clone, Default)]
pub struct LoggingConfigBuilder {
    inner: LoggingConfig,
}

impl LoggingConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut LoggingConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn exclude_attribute<S: Into<String>>(self, key: S) -> Self {
        self.map(|c| c.excluded_attribute_keys.push(key.into()))
    }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut LoggingConfig)) -> Self {
        self.map(f)
    }

    /// Validate and build the final config.
    pub fn build(self) -> Result<LoggingConfig, ConfigError> {
        if self.inner.excluded_attribute_keys.iter().any(|k| k.is_empty()) {
            return Err(ConfigError::EmptyExcludedKey);
        }
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroValueLength,
    EmptyExcludedKey,
    InvalidContextPath(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroValueLength => write!(f, "max_value_len must be at least 1"),
            ConfigError::EmptyExcludedKey => write!(f, "excluded attribute keys must not be empty"),
            ConfigError::InvalidContextPath(p) =>
                write!(f, "context path {p:?} must be empty or start with '/' and not end with '/'"),
        }
    }
}
impl std::error::Error for ConfigError {}
